//! Startup preprocessing: local files → snapshot + environment mirror.
//!
//! The snapshot is filled before the server binds and is frozen inside a
//! [`DocumentStore`](super::DocumentStore) afterwards, so request handlers
//! read it without locking.

use super::ClusterDetector;
use crate::config::DocumentsConfig;
use crate::documents::{load_document, ConfigDocument, DocumentKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Snapshot
// ============================================================================

/// Documents loaded at startup, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    secrets: Option<ConfigDocument>,
    configs: Option<ConfigDocument>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: DocumentKind) -> Option<&ConfigDocument> {
        self.slot(kind).as_ref()
    }

    pub fn insert(&mut self, kind: DocumentKind, document: ConfigDocument) {
        *self.slot_mut(kind) = Some(document);
    }

    pub fn remove(&mut self, kind: DocumentKind) -> Option<ConfigDocument> {
        self.slot_mut(kind).take()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_none() && self.configs.is_none()
    }

    fn slot(&self, kind: DocumentKind) -> &Option<ConfigDocument> {
        match kind {
            DocumentKind::Secrets => &self.secrets,
            DocumentKind::Configs => &self.configs,
        }
    }

    fn slot_mut(&mut self, kind: DocumentKind) -> &mut Option<ConfigDocument> {
        match kind {
            DocumentKind::Secrets => &mut self.secrets,
            DocumentKind::Configs => &mut self.configs,
        }
    }
}

// ============================================================================
// Preprocessing
// ============================================================================

/// What happened to one document during preprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum LoadOutcome {
    /// Cluster detected; the file was not read.
    Skipped,
    /// Loaded into the snapshot and mirrored into the environment.
    Loaded { keys: usize, mirrored: bool },
    /// Missing or unreadable; snapshot slot and variable left unset, and a
    /// mirror written by an earlier run is cleared.
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub kind: DocumentKind,
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

/// Summary of a preprocessing run, used for the startup banner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport {
    pub cluster: bool,
    pub documents: Vec<DocumentReport>,
}

/// Populate `snapshot` from the local document files.
///
/// On a cluster nothing is read and `snapshot` is left untouched; data is
/// expected to arrive through the environment mirrors instead. Locally,
/// every document found is stored in the snapshot and written, JSON
/// encoded, into its mirror variable. Safe to run repeatedly.
pub fn preprocess(
    snapshot: &mut DocumentSnapshot,
    documents: &DocumentsConfig,
    detector: &ClusterDetector,
) -> StartupReport {
    let cluster = detector.is_cluster_environment();

    let reports = DocumentKind::ALL
        .into_iter()
        .map(|kind| {
            let path = documents.path(kind).clone();
            let outcome = if cluster {
                LoadOutcome::Skipped
            } else {
                load_into(snapshot, kind, &path, detector)
            };
            DocumentReport {
                kind,
                path,
                outcome,
            }
        })
        .collect();

    if cluster {
        info!("Cluster environment detected, serving data from environment variables");
    } else {
        info!("Local environment detected, loaded documents from disk");
    }

    StartupReport {
        cluster,
        documents: reports,
    }
}

fn load_into(
    snapshot: &mut DocumentSnapshot,
    kind: DocumentKind,
    path: &Path,
    detector: &ClusterDetector,
) -> LoadOutcome {
    let Some(document) = load_document(path) else {
        warn!("{} not found or could not be loaded", path.display());
        snapshot.remove(kind);
        detector.clear_mirror(kind);
        return LoadOutcome::Unavailable;
    };

    let keys = document.keys().len();
    let mirrored = match document.to_json_string() {
        Ok(encoded) => {
            detector.write_mirror(kind, &encoded);
            true
        }
        Err(e) => {
            warn!("Could not mirror {} into {}: {}", kind, kind.env_var(), e);
            false
        }
    };

    info!("Loaded {} from {} ({} top-level keys)", kind, path.display(), keys);
    snapshot.insert(kind, document);
    LoadOutcome::Loaded { keys, mirrored }
}
