// src/config/validate.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{BuildConfig, ConfigFile, RawConfigFile, ToolConfig};
use crate::errors::{PackagerError, Result};

/// Dotted Python module path, e.g. `tkinter.filedialog`.
static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module name regex is valid")
});

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PackagerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_build(&raw.build)?;
        validate_tool(&raw.tool)?;
        Ok(ConfigFile::new_unchecked(raw.build, raw.tool))
    }
}

fn validate_build(build: &BuildConfig) -> Result<()> {
    validate_app_name(&build.name)?;
    validate_entry(&build.entry)?;
    validate_add_data(build)?;
    validate_module_list("hidden_imports", &build.hidden_imports)?;
    validate_module_list("collect_all", &build.collect_all)?;

    if build.dist_dir.trim().is_empty() {
        return Err(config_error("[build].dist_dir must not be empty"));
    }

    Ok(())
}

fn validate_app_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(config_error("[build].name must not be empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(PackagerError::ConfigError(format!(
            "[build].name '{name}' must be a file stem, not a path"
        )));
    }
    Ok(())
}

fn validate_entry(entry: &str) -> Result<()> {
    if entry.trim().is_empty() {
        return Err(config_error("[build].entry must not be empty"));
    }
    if !(entry.ends_with(".py") || entry.ends_with(".pyw")) {
        return Err(PackagerError::ConfigError(format!(
            "[build].entry '{entry}' must be a Python script (.py or .pyw)"
        )));
    }
    Ok(())
}

fn validate_add_data(build: &BuildConfig) -> Result<()> {
    for data in &build.add_data {
        if data.source.trim().is_empty() {
            return Err(config_error("[[build.add_data]] source must not be empty"));
        }
        if data.dest.trim().is_empty() {
            return Err(PackagerError::ConfigError(format!(
                "[[build.add_data]] '{}' has an empty dest (use \".\" for the bundle root)",
                data.source
            )));
        }
    }
    Ok(())
}

fn validate_module_list(field: &str, modules: &[String]) -> Result<()> {
    for module in modules {
        if !MODULE_NAME.is_match(module) {
            return Err(PackagerError::ConfigError(format!(
                "[build].{field} entry '{module}' is not a valid Python module name"
            )));
        }
    }
    Ok(())
}

fn validate_tool(tool: &ToolConfig) -> Result<()> {
    if tool.program.trim().is_empty() {
        return Err(config_error("[tool].program must not be empty"));
    }
    match tool.install.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(config_error(
            "[tool].install must name at least the installer program",
        )),
    }
}

fn config_error(msg: &str) -> PackagerError {
    PackagerError::ConfigError(msg.to_string())
}
