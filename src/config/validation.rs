use super::Config;

/// Validation errors for configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a configuration object.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ConfigValidationError {
            path: "server.port".to_string(),
            message: "Port must be greater than 0".to_string(),
        });
    }

    if config.server.bind.trim().is_empty() {
        errors.push(ConfigValidationError {
            path: "server.bind".to_string(),
            message: "Bind host is required".to_string(),
        });
    }

    if config.documents.secrets_file.as_os_str().is_empty() {
        errors.push(ConfigValidationError {
            path: "documents.secretsFile".to_string(),
            message: "Secrets file path is required".to_string(),
        });
    }

    if config.documents.configs_file.as_os_str().is_empty() {
        errors.push(ConfigValidationError {
            path: "documents.configsFile".to_string(),
            message: "Configs file path is required".to_string(),
        });
    }

    if config.documents.secrets_file == config.documents.configs_file {
        errors.push(ConfigValidationError {
            path: "documents".to_string(),
            message: "Secrets and configs must be read from different files".to_string(),
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "server.port");
    }

    #[test]
    fn shared_document_path_rejected() {
        let mut config = Config::default();
        config.documents.configs_file = PathBuf::from("secrets.yml");

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.path == "documents"));
    }
}
