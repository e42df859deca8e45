use crate::documents::DocumentKind;
use crate::gateway::errors::{handle_panic, ApiError};
use crate::gateway::protocol::*;
use crate::gateway::server::AppState;

use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Build all routes for the service.
pub fn build_routes(state: AppState) -> Router {
    let router = Router::new()
        // Documents
        .route("/secrets", get(secrets_handler))
        .route("/configs", get(configs_handler))
        // Status
        .route("/health", get(health_handler))
        .route("/env-status", get(env_status_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler);

    apply_layers(router).with_state(state)
}

/// Panic recovery, request tracing and permissive CORS, outermost last.
pub fn apply_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// ============================================================================
// Documents
// ============================================================================

async fn secrets_handler(State(state): State<AppState>) -> Response {
    document_response(&state, DocumentKind::Secrets)
}

async fn configs_handler(State(state): State<AppState>) -> Response {
    document_response(&state, DocumentKind::Configs)
}

fn document_response(state: &AppState, kind: DocumentKind) -> Response {
    let file_name = state.documents.display_name(kind);

    let Some(document) = state.store.get(kind) else {
        debug!("No {} data to serve", kind);
        return ApiError::NotFound(format!(
            "{kind} data not available: {file_name} not loaded and {} not set",
            kind.env_var()
        ))
        .into_response();
    };

    // Evaluated per request; independent of where the data came from.
    let source = document_source(state.detector.detect(), &file_name);
    Json(Envelope::success(document, source)).into_response()
}

// ============================================================================
// Status
// ============================================================================

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: HEALTH_MESSAGE,
        version: state.version.clone(),
        uptime: state.start_time.elapsed().as_secs(),
    })
}

async fn env_status_handler(State(state): State<AppState>) -> Json<Envelope<EnvStatus>> {
    let documents = DocumentKind::ALL
        .into_iter()
        .map(|kind| {
            let status = MirrorStatus {
                variable: kind.env_var(),
                set: state.store.mirror_present(kind),
            };
            (kind.name(), status)
        })
        .collect();

    let status = EnvStatus {
        environment: state.detector.detect(),
        documents,
    };
    Json(Envelope::success(status, "environment variables"))
}

// ============================================================================
// Fallbacks
// ============================================================================

async fn not_found_handler() -> ApiError {
    ApiError::route_not_found()
}

async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
