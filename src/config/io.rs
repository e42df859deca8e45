use super::{Config, MAX_CONFIG_FILE_BYTES};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Read a service configuration file, dispatching on its extension.
///
/// `.yaml`/`.yml` and `.toml` are parsed natively; anything else is JSON.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot stat config file '{}'", path.display()))?;

    if metadata.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "Config file '{}' is {} bytes, exceeds limit of {} bytes",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_BYTES,
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in '{}'", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in '{}'", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))?,
    };

    Ok(config)
}

/// Write configuration to a file in the format implied by its extension.
pub fn write_config_file(path: &Path, config: &Config) -> Result<()> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::to_string(config)?,
        Some("toml") => toml::to_string_pretty(config)?,
        _ => serde_json::to_string_pretty(config)?,
    };
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn read_json_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kubeprops.json");
        fs::write(&file, r#"{"server": {"port": 8080}}"#).unwrap();

        let config = load_config_file(&file).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn read_yaml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kubeprops.yaml");
        fs::write(
            &file,
            "documents:\n  secretsFile: /etc/app/secrets.yml\nlogging:\n  format: json\n",
        )
        .unwrap();

        let config = load_config_file(&file).unwrap();
        assert_eq!(
            config.documents.secrets_file,
            PathBuf::from("/etc/app/secrets.yml")
        );
        assert_eq!(config.documents.configs_file, PathBuf::from("configs.yml"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn read_toml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kubeprops.toml");
        fs::write(&file, "[server]\nbind = \"127.0.0.1\"\n").unwrap();

        let config = load_config_file(&file).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn reject_oversized_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("huge.json");
        let content = "x".repeat((MAX_CONFIG_FILE_BYTES + 1) as usize);
        fs::write(&file, content).unwrap();

        let result = load_config_file(&file);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds limit"));
    }

    #[test]
    fn invalid_config_names_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kubeprops.json");
        fs::write(&file, "{not json").unwrap();

        let err = load_config_file(&file).unwrap_err();
        assert!(err.to_string().contains("kubeprops.json"));
    }

    #[test]
    fn written_config_reads_back() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kubeprops.yaml");
        let mut config = Config::default();
        config.server.port = 9100;

        write_config_file(&file, &config).unwrap();
        let loaded = load_config_file(&file).unwrap();
        assert_eq!(loaded.server.port, 9100);
    }
}
