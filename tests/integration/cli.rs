//! Integration tests for the json-loader binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TEMPLATE: &str = r#"{"StringValue": "", "NumberValue": 0}"#;

fn run(file: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_json-loader");
    let mut command = Command::new(bin);
    for (key, _) in std::env::vars() {
        if key.starts_with("JSON_LOADER") {
            command.env_remove(key);
        }
    }
    command
        .arg(file)
        .arg("--template")
        .arg(TEMPLATE)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_missing_file_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");

    let output = run(&file, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not be found."),
        "stderr should name the missing file: {}",
        stderr
    );
    assert!(!file.exists());
}

#[test]
fn test_create_writes_scaffold_and_prints_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");

    let output = run(&file, &["--create", "--fail-on-file-not-found", "false"]);

    assert!(
        output.status.success(),
        "json-loader should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let expected = "{\n    \"StringValue\": \"\",\n    \"NumberValue\": 0\n}";
    assert_eq!(fs::read_to_string(&file).unwrap(), expected);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), expected);
}

#[test]
fn test_stored_values_are_printed() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    fs::write(&file, r#"{"NumberValue": 42, "Unknown": true}"#).unwrap();

    let output = run(&file, &["--update"]);

    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"StringValue": "", "NumberValue": 42})
    );
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "{\n    \"StringValue\": \"\",\n    \"NumberValue\": 42\n}"
    );
}

#[test]
fn test_object_is_default_custom_message() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    fs::write(&file, r#"{"StringValue": "", "NumberValue": 0}"#).unwrap();

    let output = run(&file, &["--fail-on-object-is-default", "Nothing configured."]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing configured."));
}

#[test]
fn test_options_file_is_applied() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    let options_file = temp_dir.path().join("options.toml");
    fs::write(
        &options_file,
        "write_on_load = \"create\"\nfail_on_file_not_found = false\n",
    )
    .unwrap();

    let output = run(&file, &["--options", options_file.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "options file should allow creation: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(file.exists());
}

#[test]
fn test_verbose_narrates_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    fs::write(&file, r#"{"StringValue": "x"}"#).unwrap();

    let output = run(&file, &["--verbose"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Value of Property 'StringValue' is set from '' to 'x'."));
    assert!(stderr.contains("Value for property 'NumberValue' wasn't found"));
}

#[test]
fn test_verbose_from_options_file_narrates_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    let options_file = temp_dir.path().join("options.toml");
    fs::write(&file, r#"{"StringValue": "x"}"#).unwrap();
    fs::write(&options_file, "[console_options]\nverbose = true\n").unwrap();

    let output = run(&file, &["--options", options_file.to_str().unwrap()]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Value of Property 'StringValue' is set from '' to 'x'."),
        "verbose options should reach the log output: {}",
        stderr
    );
}

#[test]
fn test_legacy_verbose_from_options_file_narrates_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.json");
    let options_file = temp_dir.path().join("options.json");
    fs::write(&file, r#"{"StringValue": "x", "NumberValue": 0}"#).unwrap();
    fs::write(&options_file, r#"{ "verbose_logging": true }"#).unwrap();

    let output = run(&file, &["--options", options_file.to_str().unwrap()]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is deprecated"));
    assert!(stderr.contains(&format!("File '{}' won't be updated.", file.display())));
}
