// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_APP_NAME: &str = "CA_Update";
pub const DEFAULT_ENTRY_SCRIPT: &str = "CA_Tracking_GUI.py";
pub const DEFAULT_DATA_FILE: &str = "CA_Tracking_System.py";
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_HIDDEN_IMPORTS: [&str; 4] = ["pandas", "openpyxl", "tkinter", "tkinter.filedialog"];
pub const DEFAULT_COLLECT_ALL: [&str; 2] = ["pandas", "openpyxl"];

pub const DEFAULT_TOOL_PROGRAM: &str = "pyinstaller";

/// Separator PyInstaller expects between source and destination in
/// `--add-data`.
#[cfg(windows)]
pub const DATA_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const DATA_SEPARATOR: char = ':';

/// Top-level configuration as read from a TOML override file.
///
/// ```toml
/// [build]
/// name = "CA_Update"
/// entry = "CA_Tracking_GUI.py"
/// hidden_imports = ["pandas", "openpyxl", "tkinter", "tkinter.filedialog"]
///
/// [[build.add_data]]
/// source = "CA_Tracking_System.py"
/// dest = "."
///
/// [tool]
/// program = "pyinstaller"
/// install = ["pip", "install", "pyinstaller"]
/// ```
///
/// Every field is optional; anything left out keeps the built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tool: ToolConfig,
}

/// Validated configuration. Construct through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub build: BuildConfig,
    pub tool: ToolConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(build: BuildConfig, tool: ToolConfig) -> Self {
        Self { build, tool }
    }
}

impl Default for ConfigFile {
    /// The compiled-in configuration. Always valid.
    fn default() -> Self {
        Self::new_unchecked(BuildConfig::default(), ToolConfig::default())
    }
}

/// The fixed option set handed to the packaging tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output name (`--name`); also the executable's file stem.
    pub name: String,

    /// Entry-point script, passed as the last positional argument.
    pub entry: String,

    /// `--onefile`
    pub onefile: bool,

    /// `--windowed` (no console window)
    pub windowed: bool,

    /// Data files embedded into the bundle (`--add-data`).
    pub add_data: Vec<DataFile>,

    /// `--hidden-import`, one per entry, in order.
    pub hidden_imports: Vec<String>,

    /// `--collect-all`, one per entry, in order.
    pub collect_all: Vec<String>,

    /// `--clean`
    pub clean: bool,

    /// Where the tool writes the artifact. `--distpath` is only emitted when
    /// this differs from `dist`.
    pub dist_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            entry: DEFAULT_ENTRY_SCRIPT.to_string(),
            onefile: true,
            windowed: true,
            add_data: vec![DataFile {
                source: DEFAULT_DATA_FILE.to_string(),
                dest: ".".to_string(),
            }],
            hidden_imports: DEFAULT_HIDDEN_IMPORTS.iter().map(|s| s.to_string()).collect(),
            collect_all: DEFAULT_COLLECT_ALL.iter().map(|s| s.to_string()).collect(),
            clean: true,
            dist_dir: DEFAULT_DIST_DIR.to_string(),
        }
    }
}

/// One `--add-data` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataFile {
    pub source: String,
    #[serde(default = "default_data_dest")]
    pub dest: String,
}

fn default_data_dest() -> String {
    ".".to_string()
}

impl DataFile {
    /// `source;dest` on Windows, `source:dest` elsewhere.
    pub fn to_arg_value(&self) -> String {
        format!("{}{}{}", self.source, DATA_SEPARATOR, self.dest)
    }
}

impl BuildConfig {
    /// Render the configuration into the packaging tool's argv (program name
    /// excluded). Order is fixed: name, onefile, windowed, add-data,
    /// hidden-imports, collect-all, distpath, clean, entry script.
    pub fn pyinstaller_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        args.push(format!("--name={}", self.name));
        if self.onefile {
            args.push("--onefile".to_string());
        }
        if self.windowed {
            args.push("--windowed".to_string());
        }
        for data in &self.add_data {
            args.push(format!("--add-data={}", data.to_arg_value()));
        }
        for module in &self.hidden_imports {
            args.push(format!("--hidden-import={module}"));
        }
        for package in &self.collect_all {
            args.push(format!("--collect-all={package}"));
        }
        if self.dist_dir != DEFAULT_DIST_DIR {
            args.push(format!("--distpath={}", self.dist_dir));
        }
        if self.clean {
            args.push("--clean".to_string());
        }
        args.push(self.entry.clone());

        args
    }

    /// File name of the produced executable for the host platform.
    pub fn executable_name(&self) -> String {
        format!("{}{}", self.name, std::env::consts::EXE_SUFFIX)
    }

    /// Path of the produced artifact, relative to the working directory.
    ///
    /// `dist/CA_Update.exe` on Windows with the default configuration.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.dist_dir).join(self.executable_name())
    }

    /// Every input file the tool reads from the working directory.
    pub fn input_files(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.entry.as_str()).chain(self.add_data.iter().map(|d| d.source.as_str()))
    }
}

/// How to check for and install the packaging tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Executable invoked for the presence check and the build.
    pub program: String,

    /// Arguments for the presence check; exit status 0 means installed.
    pub check: Vec<String>,

    /// Full install command line (program first).
    pub install: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOL_PROGRAM.to_string(),
            check: vec!["--version".to_string()],
            install: vec![
                "pip".to_string(),
                "install".to_string(),
                DEFAULT_TOOL_PROGRAM.to_string(),
            ],
        }
    }
}
