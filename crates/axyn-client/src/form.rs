//! Form state: field values, the submit control, and the feedback banner.

use std::time::{Duration, Instant};

use axyn_core::ContactForm;

use crate::check::check;
use crate::client::{ContactClient, SubmitError, SubmitOutcome};

pub const SUBMIT_LABEL: &str = "Enviar Mensaje";
pub const SENDING_LABEL: &str = "Enviando...";

pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "¡Mensaje enviado exitosamente! Te contactaremos pronto.";
pub const GENERIC_ERROR: &str =
    "Hubo un error al enviar el mensaje. Por favor intenta nuevamente.";

/// How long a success banner stays up.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(5);

/// The three inputs of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_form(&self) -> ContactForm {
        ContactForm::new(&*self.name, &*self.email, &*self.message)
    }
}

/// The submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    disabled: bool,
    label: &'static str,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL,
        }
    }
}

impl SubmitControl {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Disable the control until the returned guard is dropped.
    pub fn engage(&mut self) -> SubmitGuard<'_> {
        self.disabled = true;
        self.label = SENDING_LABEL;
        SubmitGuard { control: self }
    }
}

/// Restores its [`SubmitControl`] when dropped, including on early return
/// or cancellation.
#[derive(Debug)]
pub struct SubmitGuard<'a> {
    control: &'a mut SubmitControl,
}

impl SubmitGuard<'_> {
    pub fn control(&self) -> &SubmitControl {
        self.control
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        *self.control = SubmitControl::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Feedback shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    kind: BannerKind,
    text: String,
    shown_at: Instant,
    dismiss_after: Option<Duration>,
}

impl Banner {
    /// A success banner that dismisses itself after [`SUCCESS_BANNER_TTL`].
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
            shown_at: Instant::now(),
            dismiss_after: Some(SUCCESS_BANNER_TTL),
        }
    }

    /// An error banner that stays until replaced.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
            dismiss_after: None,
        }
    }

    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.dismiss_after
            .is_none_or(|ttl| now.saturating_duration_since(self.shown_at) < ttl)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

/// The whole contact form.
#[derive(Debug, Default)]
pub struct ContactFormState {
    pub fields: FormFields,
    control: SubmitControl,
    banner: Option<Banner>,
}

impl ContactFormState {
    pub fn new(fields: FormFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// The banner, unless it has been dismissed.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| b.is_visible())
    }

    /// Run one submission and show its outcome.
    ///
    /// The fields are trimmed and checked locally first; only a form that
    /// passes is sent. On success the fields are cleared.
    pub async fn submit(&mut self, client: &ContactClient) -> &Banner {
        let fields = self.fields.trimmed();

        let (banner, accepted) = {
            let _guard = self.control.engage();
            match check(&fields) {
                Err(violation) => (Banner::error(violation.user_message()), false),
                Ok(()) => feedback(client.submit(&fields).await),
            }
        };

        if accepted {
            self.fields.clear();
        }

        self.banner.insert(banner)
    }
}

fn feedback(result: Result<SubmitOutcome, SubmitError>) -> (Banner, bool) {
    match result {
        Ok(SubmitOutcome::Accepted { message }) => (
            Banner::success(message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string())),
            true,
        ),
        Ok(SubmitOutcome::Rejected { status, error }) => {
            tracing::debug!(status, "submission rejected by server");
            (
                Banner::error(error.unwrap_or_else(|| GENERIC_ERROR.to_string())),
                false,
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "contact form submission failed");
            (Banner::error(err.user_message()), false)
        }
    }
}
