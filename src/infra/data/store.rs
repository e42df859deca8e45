//! Two-tier document lookup: frozen snapshot first, then the environment
//! mirror.

use super::{DocumentSnapshot, EnvSource};
use crate::documents::{ConfigDocument, DocumentKind};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only access to the served documents.
pub struct DocumentStore {
    snapshot: DocumentSnapshot,
    env: Arc<dyn EnvSource>,
}

impl DocumentStore {
    pub fn new(snapshot: DocumentSnapshot, env: Arc<dyn EnvSource>) -> Self {
        Self { snapshot, env }
    }

    /// Look up a document. Malformed mirror content is logged and treated
    /// as absent.
    pub fn get(&self, kind: DocumentKind) -> Option<Cow<'_, ConfigDocument>> {
        if let Some(document) = self.snapshot.get(kind) {
            debug!("Serving {} from startup snapshot", kind);
            return Some(Cow::Borrowed(document));
        }

        let raw = self.env.var(kind.env_var())?;
        match ConfigDocument::from_json_str(&raw) {
            Ok(document) if document.is_null() => {
                debug!("{} holds null, treating {} as absent", kind.env_var(), kind);
                None
            }
            Ok(document) => {
                debug!("Serving {} from {} ({} env)", kind, kind.env_var(), self.env.name());
                Some(Cow::Owned(document))
            }
            Err(e) => {
                warn!("Error decoding {}: {}", kind.env_var(), e);
                None
            }
        }
    }

    /// Whether the mirror variable for `kind` is currently set, regardless
    /// of what the snapshot holds.
    pub fn mirror_present(&self, kind: DocumentKind) -> bool {
        self.env.var(kind.env_var()).is_some()
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }
}
