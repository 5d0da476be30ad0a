//! Contact submission data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Form fields exactly as a client sent them.
///
/// Every field is optional so that an absent field surfaces as a validation
/// failure rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    /// Build a form with all three fields present.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }
}

/// A contact that passed validation. Fields are trimmed; the email keeps
/// the casing the sender typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ValidContact {
    /// The row to insert: same fields with the email lower-cased.
    pub fn to_new_submission(&self) -> NewSubmission {
        NewSubmission {
            name: self.name.clone(),
            email: self.email.to_lowercase(),
            message: self.message.clone(),
        }
    }
}

/// Normalized fields handed to the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Server-generated fields of a freshly inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// Review state of a submission. The intake path never sets it; new rows
/// start as [`SubmissionStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Reviewed,
    Contacted,
}

impl SubmissionStatus {
    /// Column value as stored in `contact_submissions.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Contacted => "contacted",
        }
    }
}

/// A full `contact_submissions` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

impl StoredSubmission {
    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            id: self.id,
            created_at: self.created_at,
        }
    }
}

/// Aggregate counts over all submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub contacted: i64,
    /// Rows created since the start of the current day.
    pub today: i64,
}
