//! Error types for the contact intake pipeline.

use std::time::Duration;

use thiserror::Error;

/// Boxed error used to carry backend-specific failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A field check that rejected a submission. Only the first failing check
/// is reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `name`, `email` or `message` is absent or blank.
    #[error("missing required field")]
    MissingField,

    /// Trimmed `name` is outside the accepted length range.
    #[error("name length out of range")]
    NameLength,

    /// Trimmed `message` is outside the accepted length range.
    #[error("message length out of range")]
    MessageLength,

    /// `email` does not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// Message shown to the person filling the form.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingField => "Todos los campos son requeridos",
            Self::NameLength => "El nombre debe tener entre 2 y 100 caracteres",
            Self::MessageLength => "El mensaje debe tener entre 10 y 1000 caracteres",
            Self::InvalidEmail => "Por favor ingresa un email válido",
        }
    }
}

/// Failures reported by a [`SubmissionStore`](crate::SubmissionStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage engine rejected the row on a uniqueness constraint.
    #[error("duplicate submission")]
    Duplicate,

    /// No database is configured or the connection settings are unusable.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// Any other engine failure.
    #[error("persistence error: {0}")]
    Backend(#[source] BoxError),

    /// The call did not complete within the configured bound.
    #[error("persistence timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Failures reported by a [`Notifier`](crate::Notifier). Never surfaced to
/// the client.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No email provider credentials are configured.
    #[error("email notifications are not configured")]
    NotConfigured,

    /// The request to the provider failed before a response arrived.
    #[error("email transport error: {0}")]
    Transport(#[source] BoxError),

    /// The provider answered with a non-success status.
    #[error("email provider rejected the message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The send did not complete within the configured bound.
    #[error("email send timed out after {0:?}")]
    Timeout(Duration),
}

impl NotifyError {
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}

/// Outcome of a rejected intake. Notification failures never appear here.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntakeError {
    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid",
            Self::Store(StoreError::Duplicate) => "duplicate",
            Self::Store(StoreError::Unavailable(_)) => "unavailable",
            Self::Store(StoreError::Backend(_) | StoreError::Timeout(_)) => "error",
        }
    }
}
