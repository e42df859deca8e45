use crate::cli::ServeOpts;
use crate::config::{Config, DocumentsConfig};
use crate::gateway::routes;
use crate::infra::data::{
    preprocess, ClusterDetector, DocumentSnapshot, DocumentStore, EnvSource, LoadOutcome,
    StartupReport,
};

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info, warn};

/// Shared state for request handlers. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub detector: Arc<ClusterDetector>,
    pub documents: Arc<DocumentsConfig>,
    pub start_time: Instant,
    pub version: String,
}

impl AppState {
    /// Run startup preprocessing against `source` and freeze the result.
    pub fn initialize(config: &Config, source: Arc<dyn EnvSource>) -> (Self, StartupReport) {
        let detector = ClusterDetector::new(source.clone(), &config.cluster);

        let mut snapshot = DocumentSnapshot::new();
        let report = preprocess(&mut snapshot, &config.documents, &detector);

        let state = Self {
            store: Arc::new(DocumentStore::new(snapshot, source)),
            detector: Arc::new(detector),
            documents: Arc::new(config.documents.clone()),
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        (state, report)
    }
}

/// The HTTP server.
pub struct KubepropsServer {
    state: AppState,
    addr: SocketAddr,
    report: StartupReport,
}

impl KubepropsServer {
    /// Preprocess documents and resolve the listen address.
    ///
    /// Preprocessing finishes here, before any listener exists, so every
    /// request sees the completed snapshot.
    pub fn start(config: &Config, opts: &ServeOpts, source: Arc<dyn EnvSource>) -> Result<Self> {
        let port = opts.port.unwrap_or(config.server.port);
        let addr = resolve_bind_address(opts.bind.as_deref().unwrap_or(&config.server.bind), port)?;

        let (state, report) = AppState::initialize(config, source);

        info!("Server binding to {}", addr);
        Ok(Self {
            state,
            addr,
            report,
        })
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run_until_shutdown(self) -> Result<()> {
        let app = routes::build_routes(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;
        info!("kubeprops v{} listening on {}", self.state.version, self.addr);

        print_startup_banner(&self.state, &self.report, &self.addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shut down gracefully");
        Ok(())
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn report(&self) -> &StartupReport {
        &self.report
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Resolve the listen address from a bind host and port.
pub fn resolve_bind_address(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{bind}'"))?;
    Ok(SocketAddr::new(ip, port))
}

/// Print startup banner with environment and load results.
fn print_startup_banner(state: &AppState, report: &StartupReport, addr: &SocketAddr) {
    let environment = if report.cluster {
        "Kubernetes (data from environment variables)"
    } else {
        "local development"
    };

    info!("-------------------------------------------");
    info!("  kubeprops v{}", state.version);
    info!("  Environment: {}", environment);
    for doc in &report.documents {
        match &doc.outcome {
            LoadOutcome::Loaded { keys, .. } => {
                info!("  {}: loaded {} ({} keys)", doc.kind, doc.path.display(), keys)
            }
            LoadOutcome::Skipped => info!("  {}: read from {}", doc.kind, doc.kind.env_var()),
            LoadOutcome::Unavailable => warn!("  {}: {} not found", doc.kind, doc.path.display()),
        }
    }
    info!("  Listening on: http://{}", addr);
    info!("  GET /secrets     - secrets document");
    info!("  GET /configs     - configs document");
    info!("  GET /health      - health check");
    info!("  GET /env-status  - environment variable status");
    info!("-------------------------------------------");
}
