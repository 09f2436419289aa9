// src/config/mod.rs

//! Build configuration for the packaging run.
//!
//! Responsibilities:
//! - Define the fixed build option set and its TOML mapping (`model.rs`).
//! - Load an optional override file from disk (`loader.rs`).
//! - Validate option values before anything is executed (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config, DEFAULT_CONFIG_FILE};
pub use model::{BuildConfig, ConfigFile, DataFile, RawConfigFile, ToolConfig};
