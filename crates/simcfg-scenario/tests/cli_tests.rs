use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use simcfg_core::ContentHash;
use simcfg_scenario::{LayoutHint, Scenario};
use simcfg_test_utils::{current_mapping, CURRENT_YAML, LEGACY_YAML};

fn simcfg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simcfg"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn check_passes_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "scenario.yaml", CURRENT_YAML);

    let output = simcfg(&["check", &file]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validation results"));
    assert!(stdout.contains("root: Passed"));
}

#[test]
fn check_reports_failures_with_non_zero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = CURRENT_YAML.replace("use_reconnect_node: true", "use_reconnect_node: false");
    let file = write(dir.path(), "scenario.yml", &yaml);

    let output = simcfg(&["check", &file, "--json"]);
    assert!(!output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(tree["root"]["blue"]["action_set"]["group"].is_array());
}

#[test]
fn strict_check_fails() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = CURRENT_YAML.replace("max_steps: 1000", "max_steps: 0");
    let file = write(dir.path(), "scenario.yaml", &yaml);

    let output = simcfg(&["check", &file, "--strict"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("max_steps"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed validation"));
}

#[test]
fn check_reads_json_and_legacy() {
    let dir = tempfile::tempdir().unwrap();
    let legacy: serde_json::Value = serde_yaml::from_str(LEGACY_YAML).unwrap();
    let file = write(dir.path(), "legacy.json", &legacy.to_string());

    assert!(simcfg(&["check", &file, "--layout", "legacy"]).status.success());
    assert!(simcfg(&["check", &file]).status.success());
}

#[test]
fn migrate_writes_current_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "legacy.yaml", LEGACY_YAML);
    let output_path = dir.path().join("migrated.yaml");
    let output_arg = output_path.to_string_lossy().into_owned();

    let output = simcfg(&["migrate", &input, "--output", &output_arg]);
    assert!(output.status.success());

    let migrated = fs::read_to_string(&output_path).unwrap();
    let scenario = Scenario::create_from_yaml(&migrated, LayoutHint::Current).unwrap();
    let expected = Scenario::create_from_mapping(&current_mapping(), LayoutHint::Current).unwrap();
    assert_eq!(scenario, expected);
}

#[test]
fn defaults_are_valid() {
    let output = simcfg(&["defaults", "--json"]);
    assert!(output.status.success());
    let json = String::from_utf8_lossy(&output.stdout);
    let scenario = Scenario::create_from_json(&json, LayoutHint::Infer).unwrap();
    assert!(scenario.is_passed());
    assert_eq!(scenario, Scenario::new().unwrap());
}

#[test]
fn missing_file_is_an_error() {
    let output = simcfg(&["check", "/nonexistent/scenario.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[derive(Debug, serde::Deserialize)]
struct HashOutput {
    content_hash: ContentHash,
    passed: bool,
}

#[test]
fn hash_is_layout_independent() {
    let dir = tempfile::tempdir().unwrap();
    let current = write(dir.path(), "current.yaml", CURRENT_YAML);
    let legacy = write(dir.path(), "legacy.yaml", LEGACY_YAML);

    let output = simcfg(&["hash", &current, "--json"]);
    assert!(output.status.success());
    let parsed: HashOutput = serde_json::from_slice(&output.stdout).unwrap();
    let expected = Scenario::create_from_mapping(&current_mapping(), LayoutHint::Current).unwrap();
    assert_eq!(parsed.content_hash, expected.content_hash());
    assert!(parsed.passed);

    let plain = simcfg(&["hash", &legacy]);
    assert_eq!(
        String::from_utf8_lossy(&plain.stdout).trim(),
        expected.content_hash().to_string()
    );

    let short = simcfg(&["hash", &legacy, "--short"]);
    assert_eq!(
        String::from_utf8_lossy(&short.stdout).trim(),
        expected.content_hash().short()
    );
}
