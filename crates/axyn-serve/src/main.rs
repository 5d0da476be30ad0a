//! Axyn Serve - HTTP server for the Axyn contact form.
//!
//! This binary starts the API server that stores contact submissions and
//! sends notification emails.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use axyn_serve::metrics::{start_metrics_server, try_init_metrics};
use axyn_serve::{AppState, Config, Deployment, app};

/// Axyn contact form API server.
#[derive(Parser, Debug)]
#[command(name = "axyn-serve")]
#[command(about = "HTTP API server for the Axyn contact form", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Routes to expose.
    #[arg(long, env = "AXYN_DEPLOYMENT", value_enum, default_value_t = Deployment::Service)]
    mode: Deployment,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let email_configured = config.resend_api_key.is_some();

    if let Some(port) = config.metrics_port {
        match try_init_metrics() {
            Some(handle) => {
                let addr = SocketAddr::from(([0, 0, 0, 0], port));
                start_metrics_server(addr, handle).await?;
            }
            None => tracing::warn!("metrics recorder already installed"),
        }
    }

    // Create application state and router
    let state = AppState::new(config)?;
    let app = app(state, args.mode)?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        mode = ?args.mode,
        email_configured,
        "starting server"
    );
    tracing::info!("contact endpoint: POST http://{bind_addr}/api/contact");
    if args.mode == Deployment::Service {
        tracing::info!("health check: GET http://{bind_addr}/health");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
