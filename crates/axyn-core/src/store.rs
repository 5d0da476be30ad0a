//! Persistence seam for contact submissions.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::submission::{NewSubmission, SubmissionReceipt, SubmissionStats};

/// A relational store holding the `contact_submissions` table.
///
/// Implementations must bind values as parameters and must translate
/// engine-specific uniqueness violations into [`StoreError::Duplicate`].
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert one row and return its generated identifier and timestamp.
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError>;

    /// Aggregate counts over all rows.
    async fn stats(&self) -> Result<SubmissionStats, StoreError>;
}

/// Store used when no database connection string is configured.
///
/// Every call fails with [`StoreError::Unavailable`] without touching the
/// network.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    const REASON: &'static str = "database connection string is not configured";
}

#[async_trait]
impl SubmissionStore for UnconfiguredStore {
    async fn insert(&self, _submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        Err(StoreError::Unavailable(Self::REASON.to_string()))
    }

    async fn stats(&self) -> Result<SubmissionStats, StoreError> {
        Err(StoreError::Unavailable(Self::REASON.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_store_is_unavailable() {
        let store = UnconfiguredStore;
        let row = NewSubmission {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hola, quiero más información.".to_string(),
        };
        assert!(matches!(
            store.insert(&row).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.stats().await, Err(StoreError::Unavailable(_))));
    }
}
