// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `ca-packager`.
///
/// With no arguments the full check → install → build sequence runs against
/// the built-in build configuration.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ca-packager",
    version,
    about = "Package the CA Tracking GUI into a standalone executable with PyInstaller.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a TOML file overriding the build configuration.
    ///
    /// Default: `CaPackager.toml` in the working directory if it exists,
    /// otherwise the built-in configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CA_PACKAGER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the commands that would run, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Don't wait for Enter after reporting the result.
    #[arg(long)]
    pub no_pause: bool,

    /// Fail instead of installing the packaging tool when it is missing.
    #[arg(long)]
    pub skip_install: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
