//! YAML file loading.
//!
//! Absence is the expected case on a cluster, so a missing file is not an
//! error. Read and parse failures are logged by [`load_document`] and
//! folded into "absent" so the caller only ever sees a document or nothing.

use super::ConfigDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while reading a document file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' as YAML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Parse YAML text. An empty or `null` document yields `None`.
pub fn parse_document(content: &str) -> Result<Option<ConfigDocument>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
    value.apply_merge()?;

    let document = ConfigDocument::from(value);
    Ok((!document.is_null()).then_some(document))
}

/// Read and parse a YAML file, reporting failures to the caller.
///
/// Returns `Ok(None)` when the path does not exist or holds an empty document.
pub fn read_document(path: &Path) -> Result<Option<ConfigDocument>, LoadError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a YAML file, treating any failure as absence.
pub fn load_document(path: &Path) -> Option<ConfigDocument> {
    match read_document(path) {
        Ok(Some(document)) => {
            debug!("Loaded document from {}", path.display());
            Some(document)
        }
        Ok(None) => None,
        Err(e) => {
            warn!("Error loading {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_absent_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_document(&dir.path().join("secrets.yml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn valid_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "secrets.yml", "db_password: abc123\n");

        let doc = load_document(&path).unwrap();
        assert_eq!(
            doc.get("db_password"),
            Some(&ConfigDocument::String("abc123".into()))
        );
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "configs.yml", "key: [unclosed\n");

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("configs.yml"));
    }

    #[test]
    fn malformed_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "configs.yml", "a: b\n  c: d\n");
        assert!(load_document(&path).is_none());
    }

    #[test]
    fn empty_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "secrets.yml", "");
        assert!(load_document(&path).is_none());
    }

    #[test]
    fn multiple_documents_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "secrets.yml", "a: 1\n---\nb: 2\n");
        assert!(read_document(&path).is_err());
    }

    #[test]
    fn merge_keys_are_applied() {
        let doc = parse_document("base: &base\n  timeout: 30\nservice:\n  <<: *base\n  name: api\n")
            .unwrap()
            .unwrap();
        let service = doc.get("service").unwrap();
        assert_eq!(service.get("timeout"), Some(&ConfigDocument::Number(30.into())));
        assert_eq!(service.get("name"), Some(&ConfigDocument::String("api".into())));
    }
}
