//! Ambient process state behind a trait.
//!
//! The detector and the document store only see an [`EnvSource`], so the
//! environment-variable fallback can be exercised against [`StaticEnv`]
//! without touching the real process environment.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Read/write access to environment variables plus filesystem existence checks.
pub trait EnvSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Value of `key`. Unset and empty variables are both `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// Set `key` for the remainder of the process.
    fn set_var(&self, key: &str, value: &str);

    fn remove_var(&self, key: &str);

    /// Whether `path` exists. Errors while checking count as absent.
    fn path_exists(&self, path: &Path) -> bool;
}

/// The real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }

    fn set_var(&self, key: &str, value: &str) {
        // Only called during startup preprocessing, before the listener
        // spawns request tasks.
        std::env::set_var(key, value);
    }

    fn remove_var(&self, key: &str) {
        std::env::remove_var(key);
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }
}

/// An in-memory environment, used by tests and embedders.
#[derive(Debug, Default)]
pub struct StaticEnv {
    vars: RwLock<HashMap<String, String>>,
    paths: RwLock<HashSet<PathBuf>>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.write().insert(key.into(), value.into());
        self
    }

    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        self.paths.write().insert(path.into());
        self
    }
}

impl EnvSource for StaticEnv {
    fn name(&self) -> &str {
        "static"
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars.write().insert(key.to_string(), value.to_string());
    }

    fn remove_var(&self, key: &str) {
        self.vars.write().remove(key);
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.read().contains(path)
    }
}
