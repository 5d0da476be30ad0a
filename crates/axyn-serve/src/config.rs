//! Application configuration loaded from environment variables.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context;

/// Default sender shown on notification emails.
pub const DEFAULT_EMAIL_FROM: &str = "Axyn Services <onboarding@resend.dev>";

/// Default notification recipient.
pub const DEFAULT_EMAIL_TO: &str = "tu-email@ejemplo.com";

/// Default frontend origin allowed by CORS.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Postgres connection string. `None` disables persistence and every
    /// submission fails as unavailable.
    pub database_url: Option<String>,

    /// Resend API key. `None` disables notification emails.
    pub resend_api_key: Option<String>,

    /// `from` address of notification emails.
    pub email_from: String,

    /// Notification recipients.
    pub email_to: Vec<String>,

    /// Frontend origin allowed to call the API from a browser.
    pub frontend_url: String,

    /// Bearer tokens accepted on the stats route.
    pub admin_tokens: HashSet<String>,

    /// Bound on each database call.
    pub db_timeout: Duration,

    /// Bound on each email send.
    pub email_timeout: Duration,

    /// Port for the Prometheus exporter, if enabled.
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            resend_api_key: None,
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            email_to: vec![DEFAULT_EMAIL_TO.to_string()],
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            admin_tokens: HashSet::new(),
            db_timeout: Duration::from_secs(10),
            email_timeout: Duration::from_secs(10),
            metrics_port: None,
        }
    }
}

// Secrets stay out of logs and panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("database_configured", &self.database_url.is_some())
            .field("email_configured", &self.resend_api_key.is_some())
            .field("email_from", &self.email_from)
            .field("email_to", &self.email_to)
            .field("frontend_url", &self.frontend_url)
            .field("admin_token_count", &self.admin_tokens.len())
            .field("db_timeout", &self.db_timeout)
            .field("email_timeout", &self.email_timeout)
            .field("metrics_port", &self.metrics_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (a missing database URL is reported per request, not at startup)
    ///
    /// Optional:
    /// - `DATABASE_URL` or `VITE_NEON_DATABASE_URL`: Postgres connection string
    /// - `RESEND_API_KEY`: Resend API key for notification emails
    /// - `EMAIL_FROM`: Sender (default: "Axyn Services <onboarding@resend.dev>")
    /// - `EMAIL_TO`: Comma-separated recipients (default: "tu-email@ejemplo.com")
    /// - `FRONTEND_URL`: CORS origin (default: "http://localhost:5173")
    /// - `PORT`: Listen port (default: 3000)
    /// - `AXYN_BIND_HOST`: Listen host (default: "0.0.0.0")
    /// - `AXYN_ADMIN_TOKENS`: Comma-separated bearer tokens for `/api/stats`
    /// - `AXYN_DB_TIMEOUT_SECS`: Database call bound (default: 10)
    /// - `AXYN_EMAIL_TIMEOUT_SECS`: Email send bound (default: 10)
    /// - `AXYN_METRICS_PORT`: Prometheus exporter port (disabled when unset)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("AXYN_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = parse_var("PORT")?.unwrap_or(3000);
        let bind_addr = format!("{host}:{port}");

        let database_url =
            non_empty_var("DATABASE_URL").or_else(|| non_empty_var("VITE_NEON_DATABASE_URL"));
        let resend_api_key = non_empty_var("RESEND_API_KEY");

        let email_from = non_empty_var("EMAIL_FROM").unwrap_or(defaults.email_from);
        let email_to = match non_empty_var("EMAIL_TO") {
            Some(list) => split_list(&list).collect(),
            None => defaults.email_to,
        };
        if email_to.is_empty() {
            anyhow::bail!("EMAIL_TO must contain at least one address");
        }

        let frontend_url = non_empty_var("FRONTEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.frontend_url);

        let admin_tokens: HashSet<String> = std::env::var("AXYN_ADMIN_TOKENS")
            .map(|tokens| split_list(&tokens).collect())
            .unwrap_or_default();

        let db_timeout = parse_var("AXYN_DB_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.db_timeout);
        let email_timeout = parse_var("AXYN_EMAIL_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.email_timeout);

        let metrics_port = parse_var("AXYN_METRICS_PORT")?;

        let config = Self {
            bind_addr,
            database_url,
            resend_api_key,
            email_from,
            email_to,
            frontend_url,
            admin_tokens,
            db_timeout,
            email_timeout,
            metrics_port,
        };

        tracing::info!(
            bind_addr = %config.bind_addr,
            database_configured = config.database_url.is_some(),
            email_configured = config.resend_api_key.is_some(),
            frontend_url = %config.frontend_url,
            admin_token_count = config.admin_tokens.len(),
            "configuration loaded"
        );

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty_var(key)
        .map(|raw| raw.parse::<T>().with_context(|| format!("invalid {key}: {raw:?}")))
        .transpose()
}

fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
