//! End-to-end tests: startup preprocessing plus a real listener.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use kubeprops::cli::ServeOpts;
use kubeprops::config::Config;
use kubeprops::gateway::KubepropsServer;
use kubeprops::infra::data::{EnvSource, LoadOutcome, StaticEnv};

fn config_in(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.documents.secrets_file = dir.path().join("secrets.yml");
    config.documents.configs_file = dir.path().join("configs.yml");
    config.cluster.service_account_path = dir.path().join("serviceaccount");
    config
}

/// Serve the server's router on an ephemeral port and return its base URL.
async fn spawn(server: &KubepropsServer) -> (String, oneshot::Sender<()>) {
    let app = kubeprops::gateway::routes::build_routes(server.state().clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    // Small delay to ensure server is ready
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://{addr}"), shutdown_tx)
}

#[tokio::test]
async fn serves_local_documents_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.documents.secrets_file, "db_password: abc123\n").unwrap();
    std::fs::write(&config.documents.configs_file, "log_level: info\nreplicas: 2\n").unwrap();

    let opts = ServeOpts {
        port: Some(0),
        ..ServeOpts::default()
    };
    let server = KubepropsServer::start(&config, &opts, Arc::new(StaticEnv::new())).unwrap();
    assert!(!server.report().cluster);
    assert_eq!(server.addr().port(), 0);

    let (base, shutdown) = spawn(&server).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.status(), 200);
    let health: serde_json::Value = health.json().await.unwrap();
    assert_eq!(health["status"], "healthy");

    let secrets: serde_json::Value = client
        .get(format!("{base}/secrets"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        secrets,
        serde_json::json!({
            "status": "success",
            "data": {"db_password": "abc123"},
            "source": "secrets.yml (local development)"
        })
    );

    let configs = client.get(format!("{base}/configs")).send().await.unwrap();
    assert_eq!(configs.status(), 200);
    let configs: serde_json::Value = configs.json().await.unwrap();
    assert_eq!(configs["data"]["replicas"], 2);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn cluster_startup_skips_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.documents.secrets_file, "db_password: abc123\n").unwrap();

    let env = Arc::new(StaticEnv::new().with_var("KUBERNETES_SERVICE_HOST", "10.96.0.1"));
    let server = KubepropsServer::start(&config, &ServeOpts::default(), env.clone()).unwrap();

    assert!(server.report().cluster);
    assert!(server
        .report()
        .documents
        .iter()
        .all(|d| d.outcome == LoadOutcome::Skipped));
    assert!(env.var("SECRETS_DATA").is_none());
    assert!(server.state().detector.is_cluster_environment());

    let (base, shutdown) = spawn(&server).await;
    let response = reqwest::get(format!("{base}/secrets")).await.unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");

    let _ = shutdown.send(());
}

#[test]
fn invalid_bind_address_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let opts = ServeOpts {
        bind: Some("localhost:abc".to_string()),
        ..ServeOpts::default()
    };

    let result = KubepropsServer::start(&config, &opts, Arc::new(StaticEnv::new()));
    assert!(result.is_err());
}
