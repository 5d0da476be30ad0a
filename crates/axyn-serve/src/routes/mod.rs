//! API route definitions.

mod contact;
mod health;
mod stats;

use std::any::Any;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::auth::require_admin;
use crate::error::ApiError;
use crate::state::AppState;

pub use self::contact::{SUCCESS_MESSAGE, SubmitResponse};
pub use self::health::HealthResponse;
pub use self::stats::StatsResponse;

/// Which surface the process exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Deployment {
    /// Long-running service: contact, health, and stats.
    Service,
    /// Single-function deployment: the contact route only.
    Function,
}

/// Build the API router.
///
/// # Route Structure
///
/// ## Both deployments
/// - `POST /api/contact` - Submit the contact form (any other method: 405)
///
/// ## Service only
/// - `GET /health` - Health check
/// - `GET /api/stats` - Submission counts (admin bearer token required)
///
/// Every other path answers 404.
pub fn router(state: AppState, deployment: Deployment) -> Router {
    let mut app = Router::new().route(
        "/api/contact",
        post(contact::submit).fallback(method_not_allowed),
    );

    if deployment == Deployment::Service {
        let admin = Router::new()
            .route("/api/stats", get(stats::stats))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

        app = app
            .route("/health", get(health::health_check))
            .merge(admin);
    }

    app.fallback(not_found).with_state(state)
}

/// Router plus the HTTP middleware stack: panic capture, request tracing,
/// and CORS for the configured frontend origin.
pub fn app(state: AppState, deployment: Deployment) -> anyhow::Result<Router> {
    let origin: HeaderValue = state.config.frontend_url.parse()?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    Ok(router(state, deployment)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
