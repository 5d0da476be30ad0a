//! API error types and response formatting.
//!
//! Every failure is answered with a fixed Spanish message. Internal detail is
//! logged here and never written to the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axyn_core::{IntakeError, StoreError, ValidationError};
use serde::Serialize;

pub const DUPLICATE_MESSAGE: &str = "Este mensaje ya fue enviado";
pub const UNAVAILABLE_MESSAGE: &str = "Error de configuración del servidor";
pub const PERSISTENCE_MESSAGE: &str =
    "Hubo un error al enviar el mensaje. Por favor intenta nuevamente.";
pub const STATS_MESSAGE: &str = "Error al obtener estadísticas";
pub const UNAUTHORIZED_MESSAGE: &str = "No autorizado";
pub const NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A submitted field failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// The submission already exists.
    #[error("duplicate submission")]
    Duplicate,

    /// Persistence is not configured.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// Persistence failed while storing a submission.
    #[error("persistence error: {0}")]
    Persistence(#[source] StoreError),

    /// Stats query failed.
    #[error("stats query failed: {0}")]
    Stats(#[source] StoreError),

    /// Missing or invalid admin token.
    #[error("unauthorized")]
    Unauthorized,

    /// No route matches the request path.
    #[error("route not found")]
    NotFound,

    /// The route exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Anything else, including panics caught at the top of the stack.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(violation) => Self::Validation(violation),
            IntakeError::Store(StoreError::Duplicate) => Self::Duplicate,
            IntakeError::Store(StoreError::Unavailable(reason)) => Self::Unavailable(reason),
            IntakeError::Store(other) => Self::Persistence(other),
        }
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    error: &'static str,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(violation) => (StatusCode::BAD_REQUEST, violation.user_message()),
            Self::Duplicate => (StatusCode::CONFLICT, DUPLICATE_MESSAGE),
            Self::Unavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, UNAVAILABLE_MESSAGE),
            Self::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, PERSISTENCE_MESSAGE),
            Self::Stats(_) => (StatusCode::INTERNAL_SERVER_ERROR, STATS_MESSAGE),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unavailable(reason) => {
                tracing::error!(reason = %reason, "persistence not configured");
            }
            Self::Stats(err) => tracing::error!(error = %err, "stats query failed"),
            Self::Internal(err) => tracing::error!(error = ?err, "unhandled error"),
            // Already logged where the pipeline failed.
            _ => {}
        }

        let (status, error) = self.status_and_message();
        let success = match self {
            Self::MethodNotAllowed => None,
            _ => Some(false),
        };

        (status, Json(ErrorResponse { success, error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn intake_errors_map_to_api_errors() {
        let err = ApiError::from(IntakeError::from(ValidationError::InvalidEmail));
        assert!(matches!(err, ApiError::Validation(ValidationError::InvalidEmail)));

        let err = ApiError::from(IntakeError::from(StoreError::Duplicate));
        assert!(matches!(err, ApiError::Duplicate));

        let err = ApiError::from(IntakeError::from(StoreError::Unavailable("x".into())));
        assert!(matches!(err, ApiError::Unavailable(_)));

        let err = ApiError::from(IntakeError::from(StoreError::Timeout(
            std::time::Duration::from_secs(1),
        )));
        assert!(matches!(err, ApiError::Persistence(_)));
    }

    #[tokio::test]
    async fn validation_error_response() {
        let response = ApiError::Validation(ValidationError::NameLength).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "El nombre debe tener entre 2 y 100 caracteres");
    }

    #[tokio::test]
    async fn internal_detail_never_reaches_body() {
        let err = ApiError::Persistence(StoreError::backend(std::io::Error::other(
            "password authentication failed for user \"admin\"",
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], PERSISTENCE_MESSAGE);
        assert!(!body.to_string().contains("password"));

        let response = ApiError::Internal(anyhow::anyhow!("secret detail")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn method_not_allowed_has_no_success_field() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"error": "Method not allowed"}));
    }

    #[test]
    fn error_display() {
        assert_eq!(ApiError::NotFound.to_string(), "route not found");
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).to_string(),
            "internal error: boom"
        );
    }
}
