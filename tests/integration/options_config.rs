//! Integration tests for loading options from files

use super::test_utils::{Fixture, TestClass1};
use json_loader::config::OptionsLoader;
use json_loader::{FailPolicy, Level, WriteOnLoad};
use tempfile::TempDir;

#[test]
fn test_options_file_drives_a_load() {
    let temp_dir = TempDir::new().unwrap();
    let options_file = temp_dir.path().join("options.json");
    std::fs::write(
        &options_file,
        r#"{
    "write_on_load": "create",
    "fail_on_file_not_found": false,
    "console_options": { "verbose": true }
}"#,
    )
    .unwrap();

    let options = OptionsLoader::load_from_file(&options_file).unwrap();
    assert_eq!(options.write_on_load, WriteOnLoad::CREATE);
    assert_eq!(options.fail_on_file_not_found, FailPolicy::Off);

    let fixture = Fixture::new();
    fixture
        .loader()
        .load(&fixture.path, TestClass1::default(), &options)
        .unwrap();

    assert!(fixture.exists());
    assert_eq!(
        fixture.sink.messages(Level::Error)[0],
        format!(
            "Settings file '{}' didn't exist, but a scaffolding has been created.",
            fixture.file()
        )
    );
}

#[test]
fn test_numeric_write_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let options_file = temp_dir.path().join("options.toml");
    std::fs::write(&options_file, "write_on_load = 3\n").unwrap();

    let options = OptionsLoader::load_from_file(&options_file).unwrap();
    assert_eq!(options.write_on_load, WriteOnLoad::CREATE | WriteOnLoad::UPDATE);
}
