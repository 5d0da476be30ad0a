//! The contact intake pipeline: validate, persist, notify.
//!
//! A request moves through `Received → Validated → Persisted → Notified →
//! Responded`. Validation and persistence failures end the pipeline and are
//! returned to the caller. The notification step is a best-effort side
//! effect: its outcome is reported only through logs and metrics, and it
//! never undoes or blocks a committed insert.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{IntakeError, NotifyError, StoreError};
use crate::metrics::{NOTIFICATIONS_TOTAL, SUBMISSIONS_TOTAL};
use crate::notify::Notifier;
use crate::store::SubmissionStore;
use crate::submission::{ContactForm, SubmissionReceipt, ValidContact};
use crate::validate::validate;

/// Upper bounds for the two outward calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeTimeouts {
    pub persistence: Duration,
    pub notification: Duration,
}

impl Default for IntakeTimeouts {
    fn default() -> Self {
        Self {
            persistence: Duration::from_secs(10),
            notification: Duration::from_secs(10),
        }
    }
}

/// Injected handles for one deployment of the intake pipeline.
#[derive(Clone)]
pub struct Intake {
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
    timeouts: IntakeTimeouts,
}

impl Intake {
    pub fn new(store: Arc<dyn SubmissionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            timeouts: IntakeTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: IntakeTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.store
    }

    pub fn timeouts(&self) -> IntakeTimeouts {
        self.timeouts
    }

    /// Run one submission through the pipeline.
    ///
    /// Returns the stored row's receipt. The result reflects only validation
    /// and persistence; a failed notification still yields `Ok`.
    #[tracing::instrument(name = "contact_intake", skip_all)]
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmissionReceipt, IntakeError> {
        let result = self.validate_and_store(form).await;

        let outcome = match &result {
            Ok((contact, receipt)) => {
                tracing::info!(id = receipt.id, "contact submission stored");
                self.notify(contact, receipt).await;
                "created"
            }
            Err(err) => err.outcome(),
        };
        metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => outcome).increment(1);

        result.map(|(_, receipt)| receipt)
    }

    async fn validate_and_store(
        &self,
        form: &ContactForm,
    ) -> Result<(ValidContact, SubmissionReceipt), IntakeError> {
        let contact = validate(form).inspect_err(|err| {
            tracing::debug!(violation = %err, "contact submission rejected");
        })?;

        let submission = contact.to_new_submission();
        let bound = self.timeouts.persistence;
        let receipt = match timeout(bound, self.store.insert(&submission)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(bound)),
        };

        match receipt {
            Ok(receipt) => Ok((contact, receipt)),
            Err(StoreError::Duplicate) => {
                tracing::warn!("duplicate contact submission");
                Err(StoreError::Duplicate.into())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to store contact submission");
                Err(err.into())
            }
        }
    }

    async fn notify(&self, contact: &ValidContact, receipt: &SubmissionReceipt) {
        let bound = self.timeouts.notification;
        let result = match timeout(bound, self.notifier.notify(contact)).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout(bound)),
        };

        match result {
            Ok(sent) => {
                tracing::info!(id = receipt.id, email_id = %sent.id, "notification email sent");
                metrics::counter!(NOTIFICATIONS_TOTAL, "outcome" => "sent").increment(1);
            }
            Err(err) => {
                tracing::warn!(
                    id = receipt.id,
                    error = %err,
                    "notification email failed, submission kept"
                );
                metrics::counter!(NOTIFICATIONS_TOTAL, "outcome" => "failed").increment(1);
            }
        }
    }
}
