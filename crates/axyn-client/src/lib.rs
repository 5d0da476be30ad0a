//! Contact form submission flow for the Axyn site.
//!
//! Mirrors the server's checks locally so obviously invalid input never
//! costs a round trip, posts the form to `/api/contact`, and turns every
//! outcome into a feedback banner. The submit control is disabled for the
//! duration of a request and restored on every exit path.

mod check;
mod client;
mod form;

pub use check::{LocalViolation, check};
pub use client::{ContactClient, DEFAULT_API_URL, SubmitError, SubmitOutcome};
pub use form::{
    Banner, BannerKind, ContactFormState, DEFAULT_SUCCESS_MESSAGE, FormFields, GENERIC_ERROR,
    SENDING_LABEL, SUBMIT_LABEL, SUCCESS_BANNER_TTL, SubmitControl, SubmitGuard,
};
