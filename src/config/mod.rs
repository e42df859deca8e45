mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level kubeprops configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Runs before logging is installed, so problems are left for the
    /// caller to report through [`validate_config`].
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path.map(PathBuf::from).or_else(find_config_file) {
            Some(config_path) if config_path.exists() => load_config_file(&config_path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Write default configuration to a file.
    pub fn write_default(path: &str) -> Result<()> {
        write_config_file(&PathBuf::from(path), &Config::default())
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("KUBEPROPS_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(bind) = std::env::var("KUBEPROPS_BIND") {
            self.server.bind = bind;
        }

        if let Ok(path) = std::env::var("KUBEPROPS_SECRETS_FILE") {
            self.documents.secrets_file = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("KUBEPROPS_CONFIGS_FILE") {
            self.documents.configs_file = PathBuf::from(path);
        }

        if let Ok(format) = std::env::var("KUBEPROPS_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                self.logging.format = format;
            }
        }
    }
}

/// Find the configuration file in the working directory.
fn find_config_file() -> Option<PathBuf> {
    [
        "kubeprops.yaml",
        "kubeprops.yml",
        "kubeprops.json",
        "kubeprops.toml",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|path| path.exists())
}
