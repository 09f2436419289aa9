// src/fs/mod.rs

//! Filesystem access used for preflight and artifact checks.
//!
//! The orchestrator only ever asks whether a file exists, so the trait stays
//! that small. [`mock::MockFileSystem`] backs the tests.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

pub mod mock;

/// Abstract filesystem interface, rooted at a working directory.
pub trait FileSystem: Send + Sync + Debug {
    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`, resolving relative paths against
/// `root`.
#[derive(Debug, Clone)]
pub struct RealFileSystem {
    root: PathBuf,
}

impl RealFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Rooted at the process working directory.
    pub fn current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }
}
