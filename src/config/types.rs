use super::defaults::*;
use crate::documents::DocumentKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsConfig {
    #[serde(default = "default_secrets_file")]
    pub secrets_file: PathBuf,
    #[serde(default = "default_configs_file")]
    pub configs_file: PathBuf,
}

impl DocumentsConfig {
    /// Path of the YAML file backing `kind`.
    pub fn path(&self, kind: DocumentKind) -> &PathBuf {
        match kind {
            DocumentKind::Secrets => &self.secrets_file,
            DocumentKind::Configs => &self.configs_file,
        }
    }

    /// File name shown in the `source` field of local responses.
    pub fn display_name(&self, kind: DocumentKind) -> String {
        self.path(kind)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| kind.default_file().to_string())
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            secrets_file: default_secrets_file(),
            configs_file: default_configs_file(),
        }
    }
}

// ============================================================================
// Cluster Detection
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    #[serde(default = "default_service_account_path")]
    pub service_account_path: PathBuf,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            service_account_path: default_service_account_path(),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid log format: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Extra `EnvFilter` directive, e.g. `kubeprops=debug`.
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

// ============================================================================
// Defaults
// ============================================================================

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from(DEFAULT_SECRETS_FILE)
}

fn default_configs_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIGS_FILE)
}

fn default_service_account_path() -> PathBuf {
    PathBuf::from(DEFAULT_SERVICE_ACCOUNT_PATH)
}
