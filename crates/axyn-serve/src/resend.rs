//! Notification emails through the Resend HTTP API.

use async_trait::async_trait;
use axyn_core::{Notifier, NotifyError, SendReceipt, ValidContact};
use serde::{Deserialize, Serialize};

use crate::email;

/// Resend send-email endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: String,
    html: String,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// [`Notifier`] that posts to Resend with a bearer API key.
#[derive(Clone)]
pub struct ResendNotifier {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: Vec<String>,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: RESEND_API_URL.to_string(),
            api_key: api_key.into(),
            from: from.into(),
            to,
        }
    }

    /// Send to a different endpoint (a local stand-in during tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, contact: &ValidContact) -> Result<SendReceipt, NotifyError> {
        let request = SendEmailRequest {
            from: &self.from,
            to: &self.to,
            subject: email::subject(contact),
            html: email::render_notification(contact, chrono::Utc::now()),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(NotifyError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendEmailResponse = response.json().await.map_err(NotifyError::transport)?;
        Ok(SendReceipt { id: sent.id })
    }
}
