//! In-memory fakes for the persistence and notification seams.
//!
//! Enabled for this crate's tests and, through the `test-util` feature, for
//! downstream crates that need to drive the pipeline without a database or an
//! email provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, TimeZone, Utc};
use parking_lot::Mutex;

use crate::error::{NotifyError, StoreError};
use crate::notify::{Notifier, SendReceipt};
use crate::store::SubmissionStore;
use crate::submission::{
    NewSubmission, StoredSubmission, SubmissionReceipt, SubmissionStats, SubmissionStatus,
    ValidContact,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreMode {
    Healthy,
    Unavailable,
    Broken,
}

/// A `contact_submissions` table held in memory.
///
/// Rejects a second row with the same `(email, message)`, like the unique
/// index on the Postgres table.
#[derive(Debug)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredSubmission>>,
    insert_attempts: AtomicUsize,
    mode: StoreMode,
    delay: Option<Duration>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_mode(StoreMode::Healthy)
    }

    /// A store that reports [`StoreError::Unavailable`] on every call.
    pub fn unavailable() -> Self {
        Self::with_mode(StoreMode::Unavailable)
    }

    /// A store that reports [`StoreError::Backend`] on every call.
    pub fn broken() -> Self {
        Self::with_mode(StoreMode::Broken)
    }

    fn with_mode(mode: StoreMode) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            insert_attempts: AtomicUsize::new(0),
            mode,
            delay: None,
        }
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Seed a row directly, bypassing the intake path.
    pub fn push(&self, row: StoredSubmission) {
        self.rows.lock().push(row);
    }

    pub fn rows(&self) -> Vec<StoredSubmission> {
        self.rows.lock().clone()
    }

    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_mode(&self) -> Result<(), StoreError> {
        match self.mode {
            StoreMode::Healthy => Ok(()),
            StoreMode::Unavailable => Err(StoreError::Unavailable(
                "memory store configured as unavailable".to_string(),
            )),
            StoreMode::Broken => Err(StoreError::backend(std::io::Error::other(
                "memory store configured as broken",
            ))),
        }
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_mode()?;

        let mut rows = self.rows.lock();
        if rows
            .iter()
            .any(|r| r.email == submission.email && r.message == submission.message)
        {
            return Err(StoreError::Duplicate);
        }

        let row = StoredSubmission {
            id: rows.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            created_at: Utc::now(),
            status: SubmissionStatus::Pending,
        };
        let receipt = row.receipt();
        rows.push(row);
        Ok(receipt)
    }

    async fn stats(&self) -> Result<SubmissionStats, StoreError> {
        self.pause().await;
        self.check_mode()?;

        let start_of_day = Local::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
            .map(|t| t.with_timezone(&Utc));

        let rows = self.rows.lock();
        let count = |status: SubmissionStatus| rows.iter().filter(|r| r.status == status).count();
        Ok(SubmissionStats {
            total: rows.len() as i64,
            pending: count(SubmissionStatus::Pending) as i64,
            reviewed: count(SubmissionStatus::Reviewed) as i64,
            contacted: count(SubmissionStatus::Contacted) as i64,
            today: rows
                .iter()
                .filter(|r| start_of_day.is_some_and(|start| r.created_at >= start))
                .count() as i64,
        })
    }
}

/// A notifier that records every contact it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<ValidContact>>,
    attempts: AtomicUsize,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose sends always fail after being recorded as attempts.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Contacts that were sent successfully.
    pub fn sent(&self) -> Vec<ValidContact> {
        self.sent.lock().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, contact: &ValidContact) -> Result<SendReceipt, NotifyError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 500,
                body: "simulated provider failure".to_string(),
            });
        }
        self.sent.lock().push(contact.clone());
        Ok(SendReceipt {
            id: format!("test-email-{attempt}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str, message: &str) -> NewSubmission {
        NewSubmission {
            name: "Ana".to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn memory_store_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&row("a@example.com", "first message")).await.unwrap();
        let b = store.insert(&row("b@example.com", "second message")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.insert_attempts(), 2);
    }

    #[tokio::test]
    async fn memory_store_enforces_uniqueness() {
        let store = MemoryStore::new();
        store.insert(&row("a@example.com", "same message")).await.unwrap();
        let err = store
            .insert(&row("a@example.com", "same message"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn memory_store_stats_by_status() {
        let store = MemoryStore::new();
        store.insert(&row("a@example.com", "first message")).await.unwrap();
        store.push(StoredSubmission {
            id: 10,
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            message: "old message here".to_string(),
            created_at: Utc::now() - chrono::Duration::days(3),
            status: SubmissionStatus::Contacted,
        });

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.reviewed, 0);
        assert_eq!(stats.contacted, 1);
        assert_eq!(stats.today, 1);
    }

    #[tokio::test]
    async fn broken_store_reports_backend_error() {
        let store = MemoryStore::broken();
        let err = store.insert(&row("a@example.com", "message")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
