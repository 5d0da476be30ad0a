//! Prometheus exporter for the service metrics.
//!
//! The exporter listens on its own port so that `/metrics` never shares the
//! public router.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and describe the intake metrics.
///
/// Returns `None` if a recorder is already installed.
pub fn try_init_metrics() -> Option<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().ok()?;
    axyn_core::metrics::describe_metrics();
    Some(handle)
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Bind `addr` and serve `/metrics` from a background task.
///
/// Bind errors are returned to the caller. Returns the bound address, which
/// differs from `addr` when port 0 was requested.
pub async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> std::io::Result<SocketAddr> {
    let exporter = Router::new()
        .route("/metrics", get(render))
        .with_state(handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, exporter).await {
            tracing::error!(error = %err, "metrics exporter stopped");
        }
    });

    tracing::info!(addr = %bound, "serving metrics at /metrics");
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exporter_serves_metrics_path_only() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let addr = start_metrics_server(SocketAddr::from(([127, 0, 0, 1], 0)), handle)
            .await
            .unwrap();
        assert_ne!(addr.port(), 0);

        let client = reqwest::Client::new();
        let metrics = client
            .get(format!("http://{addr}/metrics"))
            .send()
            .await
            .unwrap();
        assert_eq!(metrics.status(), reqwest::StatusCode::OK);

        let other = client
            .get(format!("http://{addr}/api/contact"))
            .send()
            .await
            .unwrap();
        assert_eq!(other.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
