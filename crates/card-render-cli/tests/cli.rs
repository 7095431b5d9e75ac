use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, value.to_string()).expect("write fixture");
    path
}

fn sample_card() -> Value {
    json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "TextBlock", "text": "Hello"},
            {"type": "Carousel"},
            {"type": "Input.Text", "id": "name"}
        ],
        "actions": [{"type": "Action.Submit", "title": "Send"}]
    })
}

fn card_render() -> Command {
    let mut cmd = Command::cargo_bin("card-render").expect("binary exists");
    cmd.env_remove("CARD_RENDER_HOST_CONFIG");
    cmd
}

#[test]
fn render_prints_ui_tree_and_warnings() {
    let dir = TempDir::new().unwrap();
    let card = write_json(dir.path(), "card.json", &sample_card());

    let output = card_render().arg("render").arg(&card).output().unwrap();
    assert!(output.status.success());
    let rendered: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["root"]["kind"], json!("Border"));
    assert_eq!(rendered["input_ids"], json!(["name"]));
    assert_eq!(rendered["warnings"][0]["status_code"], json!("unknownElementType"));
}

#[test]
fn parse_reads_stdin_and_normalizes_card() {
    card_render()
        .args(["parse", "-"])
        .write_stdin(sample_card().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Input.Text\""))
        .stdout(predicate::str::contains("Carousel").and(predicate::str::contains("/body/1")));
}

#[test]
fn fail_policy_rejects_unknown_types() {
    let dir = TempDir::new().unwrap();
    let card = write_json(dir.path(), "card.json", &sample_card());

    card_render()
        .args(["parse", "--policy", "fail"])
        .arg(&card)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: card rejected"));
}

#[test]
fn deny_warnings_fails_when_card_has_warnings() {
    let dir = TempDir::new().unwrap();
    let card = write_json(dir.path(), "card.json", &sample_card());

    card_render()
        .args(["render", "--deny-warnings"])
        .arg(&card)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("1 warning(s)"));
}

#[test]
fn host_config_from_env_disables_interactivity() {
    let dir = TempDir::new().unwrap();
    let card = write_json(dir.path(), "card.json", &sample_card());
    let config = write_json(
        dir.path(),
        "host.json",
        &json!({"supportsInteractivity": false}),
    );

    let output = card_render()
        .arg("render")
        .arg(&card)
        .env("CARD_RENDER_HOST_CONFIG", &config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let rendered: Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes: Vec<&str> = rendered["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|warning| warning["status_code"].as_str())
        .collect();
    assert_eq!(
        codes,
        vec![
            "unknownElementType",
            "interactivityNotSupported",
            "interactivityNotSupported"
        ]
    );
}

#[test]
fn invalid_host_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let card = write_json(dir.path(), "card.json", &sample_card());
    let config = write_json(
        dir.path(),
        "host.json",
        &json!({"separator": {"lineColor": "grey"}}),
    );

    card_render()
        .arg("render")
        .arg(&card)
        .arg("--host-config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("host config failed"));
}

#[test]
fn missing_card_file_is_reported() {
    card_render()
        .args(["render", "does-not-exist.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("card file failed"));
}

#[test]
fn types_lists_builtin_registrations() {
    card_render()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input.Toggle"))
        .stdout(predicate::str::contains("Action.ShowCard"))
        .stdout(predicate::str::contains("element_renderers"));
}
