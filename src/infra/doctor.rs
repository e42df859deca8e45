//! `kubeprops check`: read-only diagnostics.
//!
//! Reports what a server started with the same configuration would see,
//! without writing the environment mirrors.

use crate::config::Config;
use crate::documents::{read_document, ConfigDocument, DocumentKind};
use crate::infra::data::{ClusterDetector, ClusterSignals, EnvSource, EnvironmentMode};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDiagnostics {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub file_exists: bool,
    /// Top-level keys when the file parsed.
    pub keys: Option<Vec<String>>,
    pub error: Option<String>,
    pub mirror_set: bool,
    pub mirror_valid: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub environment: EnvironmentMode,
    pub signals: ClusterSignals,
    pub documents: Vec<DocumentDiagnostics>,
}

pub fn run_diagnostics(config: &Config, source: Arc<dyn EnvSource>) -> Diagnostics {
    tracing::info!("Running diagnostics...");
    let detector = ClusterDetector::new(source.clone(), &config.cluster);

    let documents = DocumentKind::ALL
        .into_iter()
        .map(|kind| inspect(kind, config, source.as_ref()))
        .collect();

    let diagnostics = Diagnostics {
        environment: detector.detect(),
        signals: detector.signals(),
        documents,
    };
    tracing::info!("Diagnostics complete");
    diagnostics
}

fn inspect(kind: DocumentKind, config: &Config, source: &dyn EnvSource) -> DocumentDiagnostics {
    let path = config.documents.path(kind).clone();
    let (keys, error) = match read_document(&path) {
        Ok(Some(doc)) => (Some(doc.keys().into_iter().map(String::from).collect()), None),
        Ok(None) => (None, None),
        Err(e) => (None, Some(e.to_string())),
    };

    let mirror = source.var(kind.env_var());
    DocumentDiagnostics {
        kind,
        file_exists: path.exists(),
        path,
        keys,
        error,
        mirror_set: mirror.is_some(),
        mirror_valid: mirror.map(|raw| ConfigDocument::from_json_str(&raw).is_ok()),
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Environment: {}", self.environment.as_str())?;
        writeln!(f, "  KUBERNETES_SERVICE_HOST set: {}", self.signals.service_host)?;
        writeln!(f, "  service account mounted:     {}", self.signals.service_account)?;
        for doc in &self.documents {
            writeln!(f, "{} ({}):", doc.kind, doc.path.display())?;
            match (&doc.keys, &doc.error) {
                (Some(keys), _) => writeln!(f, "  file: ok, keys: {}", keys.join(", "))?,
                (None, Some(error)) => writeln!(f, "  file: error: {error}")?,
                (None, None) if doc.file_exists => writeln!(f, "  file: empty")?,
                (None, None) => writeln!(f, "  file: not found")?,
            }
            let mirror = match doc.mirror_valid {
                Some(true) => "set",
                Some(false) => "set (invalid JSON)",
                None => "not set",
            };
            writeln!(f, "  {}: {}", doc.kind.env_var(), mirror)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::data::StaticEnv;

    #[test]
    fn reports_files_and_mirrors_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.documents.secrets_file = dir.path().join("secrets.yml");
        config.documents.configs_file = dir.path().join("configs.yml");
        std::fs::write(&config.documents.secrets_file, "db_password: abc123\n").unwrap();

        let env = Arc::new(StaticEnv::new().with_var("CONFIGS_DATA", "{broken"));
        let diagnostics = run_diagnostics(&config, env.clone());

        assert_eq!(diagnostics.environment, EnvironmentMode::Cluster);
        assert!(diagnostics.signals.configs_data);

        let secrets = &diagnostics.documents[0];
        assert!(secrets.file_exists);
        assert_eq!(secrets.keys, Some(vec!["db_password".to_string()]));
        assert!(!secrets.mirror_set);
        assert!(env.var("SECRETS_DATA").is_none());

        let configs = &diagnostics.documents[1];
        assert!(!configs.file_exists);
        assert_eq!(configs.mirror_valid, Some(false));

        let text = diagnostics.to_string();
        assert!(text.contains("keys: db_password"));
        assert!(text.contains("CONFIGS_DATA: set (invalid JSON)"));
    }
}
