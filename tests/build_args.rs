// tests/build_args.rs

use std::path::PathBuf;

use ca_packager::config::model::DATA_SEPARATOR;
use ca_packager::config::{BuildConfig, ConfigFile};
use ca_packager::exec::display_command;
use ca_packager_test_utils::builders::ConfigFileBuilder;

#[test]
fn default_configuration_renders_fixed_argv() {
    let args = BuildConfig::default().pyinstaller_args();

    let expected: Vec<String> = vec![
        "--name=CA_Update".to_string(),
        "--onefile".to_string(),
        "--windowed".to_string(),
        format!("--add-data=CA_Tracking_System.py{DATA_SEPARATOR}."),
        "--hidden-import=pandas".to_string(),
        "--hidden-import=openpyxl".to_string(),
        "--hidden-import=tkinter".to_string(),
        "--hidden-import=tkinter.filedialog".to_string(),
        "--collect-all=pandas".to_string(),
        "--collect-all=openpyxl".to_string(),
        "--clean".to_string(),
        "CA_Tracking_GUI.py".to_string(),
    ];
    assert_eq!(args, expected);
}

#[cfg(windows)]
#[test]
fn windows_uses_semicolon_data_separator() {
    assert_eq!(DATA_SEPARATOR, ';');
}

#[test]
fn distpath_only_emitted_when_overridden() {
    let default_args = BuildConfig::default().pyinstaller_args();
    assert!(!default_args.iter().any(|a| a.starts_with("--distpath")));

    let cfg = ConfigFileBuilder::new().dist_dir("out").build();
    let args = cfg.build.pyinstaller_args();
    assert!(args.contains(&"--distpath=out".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("CA_Tracking_GUI.py"));
}

#[test]
fn extra_data_files_keep_declaration_order() {
    let cfg = ConfigFileBuilder::new().add_data("assets/logo.png", "assets").build();
    let args = cfg.build.pyinstaller_args();
    let data_args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| a.starts_with("--add-data="))
        .collect();

    assert_eq!(data_args.len(), 2);
    assert!(data_args[0].contains("CA_Tracking_System.py"));
    assert_eq!(
        data_args[1],
        format!("--add-data=assets/logo.png{DATA_SEPARATOR}assets")
    );
}

#[test]
fn output_path_is_dist_executable() {
    let cfg = ConfigFile::default();
    let expected = PathBuf::from("dist").join(format!("CA_Update{}", std::env::consts::EXE_SUFFIX));
    assert_eq!(cfg.build.output_path(), expected);
}

#[test]
fn display_command_quotes_separator_arguments() {
    let line = display_command(
        "pyinstaller",
        &["--add-data=a b;.".to_string(), "--clean".to_string()],
    );
    assert_eq!(line, "pyinstaller \"--add-data=a b;.\" --clean");
}
