//! Axyn Serve - HTTP API for the Axyn contact form
//!
//! Accepts contact form submissions, stores them in Postgres, and relays a
//! notification email through Resend. The same router backs two deployment
//! shapes: a long-running service and a single-function deployment that
//! exposes only the contact route.
//!
//! # Architecture
//!
//! - **AppState**: Shared state (intake pipeline with injected backends, configuration)
//! - **PgStore / ResendNotifier**: Production implementations of the core seams
//! - **Auth**: Bearer token guard for the stats route
//! - **Routes**: Endpoint handlers and the middleware stack

mod auth;
mod config;
pub mod email;
mod error;
pub mod metrics;
mod postgres;
mod resend;
mod routes;
mod state;

pub use self::auth::require_admin;
pub use self::config::Config;
pub use self::error::ApiError;
pub use self::postgres::PgStore;
pub use self::resend::{RESEND_API_URL, ResendNotifier};
pub use self::routes::{
    Deployment, HealthResponse, SUCCESS_MESSAGE, StatsResponse, SubmitResponse, app, router,
};
pub use self::state::AppState;
