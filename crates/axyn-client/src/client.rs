//! HTTP submission to the contact API.

use serde::Deserialize;
use thiserror::Error;

use crate::form::{FormFields, GENERIC_ERROR};

/// Backend origin used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// What the server said about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; `message` is the server's confirmation text, if any.
    Accepted { message: Option<String> },
    /// Refused; `error` is the server's explanation, if any.
    Rejected { status: u16, error: Option<String> },
}

#[derive(Error, Debug)]
pub enum SubmitError {
    /// Nothing answered at the backend origin.
    #[error("could not reach the backend at {origin}")]
    Unreachable {
        origin: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with something that is not a JSON reply.
    #[error("unreadable response (HTTP {status})")]
    UnreadableResponse {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable { origin, .. } => format!(
                "No se pudo conectar con el servidor. Asegúrate de que el backend esté corriendo en {origin}"
            ),
            Self::Request(_) | Self::UnreadableResponse { .. } => GENERIC_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Reply {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

/// Client for `POST {origin}/api/contact`.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    origin: String,
}

impl ContactClient {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Post `fields` as JSON and classify the answer.
    pub async fn submit(&self, fields: &FormFields) -> Result<SubmitOutcome, SubmitError> {
        let url = format!("{}/api/contact", self.origin);
        let response = self
            .http
            .post(&url)
            .json(&fields.to_form())
            .send()
            .await
            .map_err(|source| {
                if source.is_connect() {
                    SubmitError::Unreachable {
                        origin: self.origin.clone(),
                        source,
                    }
                } else {
                    SubmitError::Request(source)
                }
            })?;

        let status = response.status();
        let reply: Reply =
            response
                .json()
                .await
                .map_err(|source| SubmitError::UnreadableResponse {
                    status: status.as_u16(),
                    source,
                })?;

        tracing::debug!(status = status.as_u16(), success = reply.success, "contact api replied");

        if status.is_success() && reply.success {
            Ok(SubmitOutcome::Accepted {
                message: reply.message,
            })
        } else {
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
                error: reply.error,
            })
        }
    }
}
