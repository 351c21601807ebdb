// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Line-numbered file loading for `--file`

use std::path::Path;

use crate::error::Result;

/// Prefix every line with its 1-based index, as `"<n>> <line>"`.
///
/// Lines are split on `\n` only, so a trailing newline yields a final empty
/// numbered line.
pub fn number_lines(content: &str) -> String {
    content
        .split('\n')
        .enumerate()
        .map(|(idx, line)| format!("{}> {}", idx + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a file and number its lines, or `None` when it does not exist.
///
/// Bytes that are not valid UTF-8 become U+FFFD.
pub fn load_with_line_numbers(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    Ok(Some(number_lines(&String::from_utf8_lossy(&bytes))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_number_lines_basic() {
        assert_eq!(
            number_lines("#!/bin/bash\necho hi"),
            "1> #!/bin/bash\n2> echo hi"
        );
    }

    #[test]
    fn test_number_lines_trailing_newline() {
        assert_eq!(number_lines("a\n"), "1> a\n2> ");
    }

    #[test]
    fn test_number_lines_empty() {
        assert_eq!(number_lines(""), "1> ");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let loaded = load_with_line_numbers(&dir.path().join("missing.sh")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deploy.sh");
        std::fs::write(&path, "#!/bin/bash\necho deploy").unwrap();

        let loaded = load_with_line_numbers(&path).unwrap();
        assert_eq!(loaded.as_deref(), Some("1> #!/bin/bash\n2> echo deploy"));
    }

    #[test]
    fn test_load_non_utf8_file_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.sh");
        std::fs::write(&path, b"echo caf\xe9\nexit 0").unwrap();

        let loaded = load_with_line_numbers(&path).unwrap();
        assert_eq!(loaded.as_deref(), Some("1> echo caf\u{FFFD}\n2> exit 0"));
    }

    proptest! {
        #[test]
        fn prop_every_line_is_numbered(lines in proptest::collection::vec("[^\n]*", 1..20)) {
            let content = lines.join("\n");
            let numbered = number_lines(&content);
            let out: Vec<&str> = numbered.split('\n').collect();

            prop_assert_eq!(out.len(), lines.len());
            for (idx, (numbered_line, original)) in out.iter().zip(&lines).enumerate() {
                prop_assert_eq!(numbered_line.to_string(), format!("{}> {}", idx + 1, original));
            }
        }
    }
}
