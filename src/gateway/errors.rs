use super::protocol::{Envelope, NOT_FOUND_DESCRIPTION};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use thiserror::Error;
use tracing::error;

/// Failures a route can report. Each renders as an error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("The method is not allowed for the requested URL.")]
    MethodNotAllowed,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn route_not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_DESCRIPTION.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(Envelope::error(self.to_string()))).into_response()
    }
}

/// Render a handler panic as the generic 500 envelope. The panic payload
/// is logged, never returned.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::protocol::INTERNAL_ERROR_MESSAGE;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_renders_envelope() {
        let response = ApiError::NotFound("secrets data not available".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "secrets data not available");
    }

    #[tokio::test]
    async fn panic_detail_is_not_leaked() {
        let response = handle_panic(Box::new(String::from("db password was hunter2")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({"status": "error", "message": INTERNAL_ERROR_MESSAGE})
        );
    }

    #[tokio::test]
    async fn static_str_panic_payload() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
