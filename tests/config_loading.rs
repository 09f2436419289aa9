// tests/config_loading.rs

use std::error::Error;
use std::io::Write;

use ca_packager::config::{ConfigFile, DataFile, load_and_validate, resolve_config};
use ca_packager::errors::PackagerError;
use ca_packager_test_utils::builders::ConfigFileBuilder;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn partial_override_keeps_remaining_defaults() -> TestResult {
    let file = write_config(
        r#"
[build]
name = "CA_Update_Test"
windowed = false

[tool]
install = ["python", "-m", "pip", "install", "pyinstaller"]
"#,
    )?;

    let cfg = load_and_validate(file.path())?;
    let defaults = ConfigFile::default();

    assert_eq!(cfg.build.name, "CA_Update_Test");
    assert!(!cfg.build.windowed);
    assert_eq!(cfg.build.entry, defaults.build.entry);
    assert_eq!(cfg.build.hidden_imports, defaults.build.hidden_imports);
    assert_eq!(cfg.build.collect_all, defaults.build.collect_all);
    assert_eq!(cfg.tool.program, "pyinstaller");
    assert_eq!(cfg.tool.install[0], "python");
    Ok(())
}

#[test]
fn add_data_dest_defaults_to_bundle_root() -> TestResult {
    let file = write_config(
        r#"
[[build.add_data]]
source = "CA_Tracking_System.py"

[[build.add_data]]
source = "icons"
dest = "icons"
"#,
    )?;

    let cfg = load_and_validate(file.path())?;
    assert_eq!(
        cfg.build.add_data,
        vec![
            DataFile {
                source: "CA_Tracking_System.py".to_string(),
                dest: ".".to_string(),
            },
            DataFile {
                source: "icons".to_string(),
                dest: "icons".to_string(),
            },
        ]
    );
    Ok(())
}

#[test]
fn invalid_hidden_import_returns_config_error() -> TestResult {
    let file = write_config(
        r#"
[build]
hidden_imports = ["pandas", "not a module"]
"#,
    )?;

    match load_and_validate(file.path()) {
        Err(PackagerError::ConfigError(msg)) => {
            assert!(msg.contains("hidden_imports"));
            assert!(msg.contains("not a module"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn unknown_key_is_a_toml_error() -> TestResult {
    let file = write_config(
        r#"
[build]
one_file = true
"#,
    )?;

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PackagerError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn non_python_entry_is_rejected() {
    let raw = ConfigFileBuilder::new().entry("CA_Tracking_GUI.exe").raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(PackagerError::ConfigError(_))
    ));
}

#[test]
fn path_like_name_is_rejected() {
    let raw = ConfigFileBuilder::new().name("dist/CA_Update").raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(PackagerError::ConfigError(_))
    ));
}

#[test]
fn empty_install_command_is_rejected() {
    let raw = ConfigFileBuilder::new().install_command(&[]).raw();
    match ConfigFile::try_from(raw) {
        Err(PackagerError::ConfigError(msg)) => assert!(msg.contains("[tool].install")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn explicit_missing_config_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope.toml");

    assert!(matches!(
        resolve_config(Some(&path)),
        Err(PackagerError::IoError(_))
    ));
}

#[test]
fn builtin_configuration_is_valid() -> TestResult {
    let defaults = ConfigFile::default();
    let revalidated = ConfigFile::try_from(ConfigFileBuilder::new().raw())?;
    assert_eq!(defaults.build, revalidated.build);
    assert_eq!(defaults.tool, revalidated.tool);
    Ok(())
}
