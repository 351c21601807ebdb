// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::Path;
use std::process::Output;

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nlc::cli::{Cli, Commands, ConfigCommands};
use nlc::config::{Provider, Settings};

// ==================== Parsing ====================

#[test]
fn test_parse_do_command() {
    let cli = Cli::try_parse_from(["nlc", "do", "list", "files"]).expect("Valid command parsing");
    if let Commands::Do(args) = cli.command {
        assert_eq!(args.request, vec!["list", "files"]);
    } else {
        panic!("Expected Do command");
    }
}

#[test]
fn test_parse_config_show() {
    let cli = Cli::try_parse_from(["nlc", "config", "show"]).expect("Valid command parsing");
    assert!(matches!(
        cli.command,
        Commands::Config(args) if matches!(args.command, ConfigCommands::Show)
    ));
}

#[test]
fn test_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["nlc", "chat"]).is_err());
}

// ==================== Binary ====================

async fn nlc(cwd: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nlc"))
        .arg("--config")
        .arg(config)
        .args(args)
        .current_dir(cwd)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .env("NLC_HOME", cwd.join(".nlc-home"))
        .output()
        .await
        .expect("binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(path: &Path, value: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

#[tokio::test]
async fn test_config_key_is_saved_and_masked() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = nlc(dir.path(), &config, &["config", "key", "sk-abcdefghijklmnop"]).await;
    assert!(output.status.success());
    assert!(stdout(&output).contains("✔ OpenAI API key saved successfully."));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["OPENAI_API_KEY"], "sk-abcdefghijklmnop");

    let shown = nlc(dir.path(), &config, &["config", "show"]).await;
    let text = stdout(&shown);
    assert!(text.contains("OPENAI_API_KEY: sk-...mnop"));
    assert!(!text.contains("sk-abcdefghijklmnop"));
}

#[tokio::test]
async fn test_config_invalid_provider_reports_without_failing() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = nlc(dir.path(), &config, &["config", "provider", "anthropic"]).await;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Invalid provider. Supported: openai, lmstudio"));
    assert!(!config.exists());
}

#[tokio::test]
async fn test_unsupported_stored_provider_is_reported_then_repaired() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "ollama", "MODEL_NAME": "x", "OPENAI_API_KEY": "sk-stored"}),
    );

    let output = nlc(dir.path(), &config, &["do", "list", "files"]).await;
    assert!(output.status.success());
    assert!(stderr(&output).contains("✖ Invalid provider. Supported: openai, lmstudio"));

    let repaired = nlc(dir.path(), &config, &["config", "provider", "openai"]).await;
    assert!(repaired.status.success(), "stderr: {}", stderr(&repaired));
    assert!(stdout(&repaired).contains("✔ Switched to OpenAI."));

    let saved = Settings::load_from(&config).unwrap();
    assert_eq!(saved.provider, Provider::OpenAi);
    assert_eq!(saved.model_name, "x");
    assert_eq!(saved.api_key.as_deref(), Some("sk-stored"));
}

#[tokio::test]
async fn test_do_unreadable_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(&config, json!({"MODEL_NAME": 42}));

    let output = nlc(dir.path(), &config, &["do", "list", "files"]).await;
    assert!(output.status.success());
    assert!(stderr(&output).contains("Invalid configuration in"));

    let repaired = nlc(dir.path(), &config, &["config", "model", "gpt-4o"]).await;
    assert!(repaired.status.success(), "stderr: {}", stderr(&repaired));
    assert_eq!(Settings::load_from(&config).unwrap().model_name, "gpt-4o");
}

#[tokio::test]
async fn test_do_without_api_key_reports_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = nlc(dir.path(), &config, &["do", "list", "files"]).await;

    assert!(output.status.success());
    assert!(stderr(&output)
        .contains("OpenAI API key not found. Please set it using: nlc config key <your-api-key>"));
}

#[tokio::test]
async fn test_do_missing_file_never_contacts_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "lmstudio", "MODEL_NAME": "local", "BASE_URL": format!("{}/v1", server.uri())}),
    );

    let output = nlc(
        dir.path(),
        &config,
        &["do", "fix", "it", "--file", "missing.sh"],
    )
    .await;

    assert!(output.status.success());
    assert!(stderr(&output)
        .contains("File not found: \"missing.sh\". Please check the path and try again."));
    server.verify().await;
}

#[tokio::test]
async fn test_do_backend_error_fails_process() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "lmstudio", "MODEL_NAME": "local", "BASE_URL": format!("{}/v1", server.uri())}),
    );

    let output = nlc(dir.path(), &config, &["do", "list", "files"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("500"));
}

#[tokio::test]
async fn test_do_prints_text_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"content": "Use `df -h` to see disk usage."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "lmstudio", "MODEL_NAME": "local", "BASE_URL": format!("{}/v1", server.uri())}),
    );

    let output = nlc(dir.path(), &config, &["do", "how", "much", "disk"]).await;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Use `df -h` to see disk usage."));
}

#[tokio::test]
async fn test_do_error_tool_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "error",
                            "arguments": "{\"errorMessage\":\"I can only help with terminal tasks.\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "lmstudio", "MODEL_NAME": "local", "BASE_URL": format!("{}/v1", server.uri())}),
    );

    let output = nlc(dir.path(), &config, &["do", "order", "a", "pizza"]).await;

    assert!(output.status.success());
    assert!(stderr(&output).contains("✖ I can only help with terminal tasks."));
}

#[tokio::test]
async fn test_do_relative_file_reaches_backend_numbered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"content": "Add `set -x` near the top."}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    write_config(
        &config,
        json!({"PROVIDER": "lmstudio", "MODEL_NAME": "local", "BASE_URL": format!("{}/v1", server.uri())}),
    );
    std::fs::write(dir.path().join("deploy.sh"), "#!/bin/bash\nrsync -a dist/ host:/srv").unwrap();

    let output = nlc(
        dir.path(),
        &config,
        &["do", "add", "logging", "--file", "deploy.sh"],
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body["messages"][2]["content"],
        "Here is the script `deploy.sh`:\n\n1> #!/bin/bash\n2> rsync -a dist/ host:/srv\n\n---\n\nTask: add logging"
    );
}
