//! Served documents: the parsed tree, the YAML loader, and the two names
//! the service knows about.

mod loader;
mod value;

pub use loader::*;
pub use value::*;

use serde::Serialize;
use std::fmt;

/// The two documents the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Secrets,
    Configs,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Secrets, DocumentKind::Configs];

    /// Route and display name (`secrets`, `configs`).
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Secrets => "secrets",
            DocumentKind::Configs => "configs",
        }
    }

    /// Environment variable holding the JSON mirror of this document.
    pub fn env_var(self) -> &'static str {
        match self {
            DocumentKind::Secrets => crate::config::SECRETS_DATA_ENV,
            DocumentKind::Configs => crate::config::CONFIGS_DATA_ENV,
        }
    }

    /// File name used when no path is configured.
    pub fn default_file(self) -> &'static str {
        match self {
            DocumentKind::Secrets => crate::config::DEFAULT_SECRETS_FILE,
            DocumentKind::Configs => crate::config::DEFAULT_CONFIGS_FILE,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
