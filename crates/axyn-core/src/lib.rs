//! Core types, validation, and the intake pipeline for Axyn contact submissions.
//!
//! This crate provides:
//! - The submission data model (raw form, validated contact, stored receipt, stats)
//! - Field validation with client-facing Spanish messages
//! - The persistence and notification seams as async traits
//! - The intake pipeline: validate, persist, notify (best effort)
//! - Metric names and descriptions shared by the binaries
//!
//! Nothing here speaks HTTP or SQL; the `axyn-serve` crate plugs concrete
//! backends into [`SubmissionStore`] and [`Notifier`].

mod error;
mod intake;
pub mod metrics;
mod notify;
mod store;
mod submission;
mod validate;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{BoxError, IntakeError, NotifyError, StoreError, ValidationError};
pub use intake::{Intake, IntakeTimeouts};
pub use notify::{DisabledNotifier, Notifier, SendReceipt};
pub use store::{SubmissionStore, UnconfiguredStore};
pub use submission::{
    ContactForm, NewSubmission, StoredSubmission, SubmissionReceipt, SubmissionStats,
    SubmissionStatus, ValidContact,
};
pub use validate::{
    MESSAGE_MAX_CHARS, MESSAGE_MIN_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS, is_valid_email,
    validate,
};
