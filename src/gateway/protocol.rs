//! JSON wire shapes for every route.

use crate::infra::data::EnvironmentMode;
use serde::Serialize;
use std::collections::BTreeMap;

/// `source` value for documents served on a cluster.
pub const CLUSTER_SOURCE: &str = "Kubernetes ConfigMap (environment variable)";

/// Description used for unmatched paths.
pub const NOT_FOUND_DESCRIPTION: &str = "The requested URL was not found on the server. \
     If you entered the URL manually please check your spelling and try again.";

/// Fixed message for unhandled faults.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Human-readable service status for `/health`.
pub const HEALTH_MESSAGE: &str = "K8s Property and Secret Management service is running";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// The `{status, data|message, source}` wrapper.
///
/// Built only through [`Envelope::success`] and [`Envelope::error`], so a
/// success always carries data and an error always carries a message.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T, source: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
            source: Some(source.into()),
        }
    }

    pub fn status(&self) -> EnvelopeStatus {
        self.status
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message: Some(message.into()),
            source: None,
        }
    }
}

/// `source` value for a document, given the current environment.
pub fn document_source(mode: EnvironmentMode, file_name: &str) -> String {
    match mode {
        EnvironmentMode::Cluster => CLUSTER_SOURCE.to_string(),
        EnvironmentMode::Local => format!("{file_name} (local development)"),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: String,
    pub uptime: u64,
}

/// Per-document mirror state reported by `/env-status`.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorStatus {
    pub variable: &'static str,
    pub set: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvStatus {
    pub environment: EnvironmentMode,
    pub documents: BTreeMap<&'static str, MirrorStatus>,
}
