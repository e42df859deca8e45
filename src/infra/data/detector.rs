//! Cluster vs. local environment detection.
//!
//! Recomputed on every call. Any one signal is enough to classify the
//! process as running on a cluster, including the data mirrors themselves:
//! a `SECRETS_DATA` or `CONFIGS_DATA` inherited from the parent process or
//! set by an orchestrator makes the process report `cluster` even on a
//! developer machine. Mirrors this process wrote itself during startup
//! preprocessing do not count.

use super::EnvSource;
use crate::config::{ClusterConfig, KUBERNETES_SERVICE_HOST_ENV};
use crate::documents::DocumentKind;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the process believes it is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Cluster,
    Local,
}

impl EnvironmentMode {
    pub fn is_cluster(self) -> bool {
        self == EnvironmentMode::Cluster
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentMode::Cluster => "cluster",
            EnvironmentMode::Local => "local",
        }
    }
}

/// The individual signals behind a detection result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSignals {
    pub service_host: bool,
    pub service_account: bool,
    pub secrets_data: bool,
    pub configs_data: bool,
}

impl ClusterSignals {
    pub fn any(&self) -> bool {
        self.service_host || self.service_account || self.secrets_data || self.configs_data
    }
}

pub struct ClusterDetector {
    env: Arc<dyn EnvSource>,
    service_account_path: PathBuf,
    written: RwLock<HashSet<DocumentKind>>,
}

impl ClusterDetector {
    pub fn new(env: Arc<dyn EnvSource>, config: &ClusterConfig) -> Self {
        Self {
            env,
            service_account_path: config.service_account_path.clone(),
            written: RwLock::new(HashSet::new()),
        }
    }

    pub fn env(&self) -> &Arc<dyn EnvSource> {
        &self.env
    }

    pub fn signals(&self) -> ClusterSignals {
        ClusterSignals {
            service_host: self.env.var(KUBERNETES_SERVICE_HOST_ENV).is_some(),
            service_account: self.env.path_exists(&self.service_account_path),
            secrets_data: self.external_mirror(DocumentKind::Secrets),
            configs_data: self.external_mirror(DocumentKind::Configs),
        }
    }

    /// Write the JSON mirror for `kind` and remember that it is ours.
    pub fn write_mirror(&self, kind: DocumentKind, encoded: &str) {
        self.env.set_var(kind.env_var(), encoded);
        self.written.write().insert(kind);
    }

    /// Unset the mirror for `kind` if this process wrote it. A value set
    /// from outside is left alone.
    pub fn clear_mirror(&self, kind: DocumentKind) {
        if self.written.write().remove(&kind) {
            self.env.remove_var(kind.env_var());
        }
    }

    fn external_mirror(&self, kind: DocumentKind) -> bool {
        !self.written.read().contains(&kind) && self.env.var(kind.env_var()).is_some()
    }

    pub fn detect(&self) -> EnvironmentMode {
        if self.signals().any() {
            EnvironmentMode::Cluster
        } else {
            EnvironmentMode::Local
        }
    }

    /// True when any cluster signal is present. Mirrors written through
    /// [`write_mirror`](Self::write_mirror) are not a signal.
    pub fn is_cluster_environment(&self) -> bool {
        self.detect().is_cluster()
    }
}
