// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{NlcError, Result};

use super::Settings;

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::nlc_home().join("config.json")
    }

    /// Load settings from a specific path. A missing file yields defaults.
    ///
    /// A file that does not parse is a configuration error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            NlcError::Config(format!(
                "Invalid configuration in {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load settings for editing. Values that do not fit their key are
    /// dropped with a warning, so a `config` subcommand can replace them.
    pub fn load_lenient(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut map = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::warn!(
                    path = %path.display(),
                    "configuration is not a JSON object, starting from defaults"
                );
                return Ok(Self::default());
            }
        };

        map.retain(|key, value| {
            let single = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
            let fits = serde_json::from_value::<Settings>(single).is_ok();
            if !fits {
                tracing::warn!(key = %key, "ignoring invalid configuration value");
            }
            fits
        });

        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Save settings to a specific path, merging with existing file content
    /// to preserve unknown keys from hand edits.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let new_value = serde_json::to_value(self)?;

        let merged = if path.exists() {
            let existing_content = std::fs::read_to_string(path)?;
            match serde_json::from_str::<Value>(&existing_content) {
                Ok(existing_value) => merge(existing_value, new_value),
                Err(_) => new_value, // Corrupt file, overwrite entirely.
            }
        } else {
            new_value
        };

        let content = serde_json::to_string_pretty(&merged)?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Get the nlc home directory (~/.nlc or $NLC_HOME).
    pub fn nlc_home() -> PathBuf {
        if let Ok(home) = std::env::var("NLC_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nlc")
    }
}

fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                base_map.insert(key, value);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::default();
        settings.provider = Provider::LmStudio;
        settings.model_name = "qwen2.5-coder".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.provider, Provider::LmStudio);
        assert_eq!(loaded.model_name, "qwen2.5-coder");
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"THEME": "dark", "MODEL_NAME": "old"}"#).unwrap();

        let mut settings = Settings::load_from(&path).unwrap();
        settings.model_name = "new".to_string();
        settings.save_to(&path).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["THEME"], "dark");
        assert_eq!(raw["MODEL_NAME"], "new");
    }

    #[test]
    fn test_save_overwrites_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        Settings::default().save_to(&path).unwrap();
        assert!(Settings::load_from(&path).is_ok());
    }

    #[test]
    fn test_load_unsupported_provider_keeps_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"PROVIDER": "nope"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.provider, Provider::Unsupported("nope".to_string()));
    }

    #[test]
    fn test_load_wrong_value_type_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"MODEL_NAME": 42}"#).unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, NlcError::Config(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_load_lenient_drops_only_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"MODEL_NAME": 42, "OPENAI_API_KEY": "sk-kept", "THEME": "dark"}"#,
        )
        .unwrap();

        let settings = Settings::load_lenient(&path).unwrap();
        assert_eq!(settings.model_name, crate::config::DEFAULT_MODEL);
        assert_eq!(settings.api_key.as_deref(), Some("sk-kept"));
    }

    #[test]
    fn test_load_lenient_non_object_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(Settings::load_lenient(&path).unwrap(), Settings::default());
    }
}
