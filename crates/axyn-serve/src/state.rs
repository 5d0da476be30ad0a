//! Application state shared across all request handlers.

use std::sync::Arc;

use axyn_core::{
    DisabledNotifier, Intake, IntakeTimeouts, Notifier, SubmissionStore, UnconfiguredStore,
};

use crate::config::Config;
use crate::postgres::PgStore;
use crate::resend::ResendNotifier;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Intake pipeline with its persistence and notification handles.
    pub intake: Intake,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the production backends from configuration.
    ///
    /// A missing database URL or API key is not fatal: the corresponding seam
    /// is filled with a stand-in that fails every call, so the service still
    /// answers with the proper error responses.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn SubmissionStore> = match &config.database_url {
            Some(url) => Arc::new(PgStore::connect_lazy(url, config.db_timeout)?),
            None => {
                tracing::warn!("no database URL configured, submissions will be refused");
                Arc::new(UnconfiguredStore)
            }
        };

        let notifier: Arc<dyn Notifier> = match &config.resend_api_key {
            Some(key) => Arc::new(ResendNotifier::new(
                key.clone(),
                config.email_from.clone(),
                config.email_to.clone(),
            )),
            None => {
                tracing::warn!("no RESEND_API_KEY configured, email notifications disabled");
                Arc::new(DisabledNotifier)
            }
        };

        Ok(Self::with_backends(config, store, notifier))
    }

    /// Assemble state from explicit backends.
    pub fn with_backends(
        config: Config,
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let timeouts = IntakeTimeouts {
            persistence: config.db_timeout,
            notification: config.email_timeout,
        };
        let intake = Intake::new(store, notifier).with_timeouts(timeouts);

        tracing::info!(
            db_timeout_secs = timeouts.persistence.as_secs(),
            email_timeout_secs = timeouts.notification.as_secs(),
            "application state initialized"
        );

        Self {
            intake,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_database_url_uses_unconfigured_store() {
        let state = AppState::new(Config::default()).unwrap();
        let err = state.intake.store().stats().await.unwrap_err();
        assert!(matches!(err, axyn_core::StoreError::Unavailable(_)));
    }

    #[test]
    fn timeouts_follow_config() {
        let config = Config {
            db_timeout: std::time::Duration::from_secs(2),
            email_timeout: std::time::Duration::from_secs(4),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.intake.timeouts().persistence.as_secs(), 2);
        assert_eq!(state.intake.timeouts().notification.as_secs(), 4);
    }
}
