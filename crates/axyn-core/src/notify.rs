//! Notification seam for new contact submissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::submission::ValidContact;

/// Provider acknowledgement of a sent notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Provider-assigned message identifier.
    pub id: String,
}

/// Sends a notification about a stored submission to the site operators.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, contact: &ValidContact) -> Result<SendReceipt, NotifyError>;
}

/// Notifier used when no email provider is configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _contact: &ValidContact) -> Result<SendReceipt, NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}
