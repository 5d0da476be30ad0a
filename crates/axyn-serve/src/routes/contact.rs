//! Contact form submission endpoint.

use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use axyn_core::{ContactForm, SubmissionReceipt};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str = "¡Mensaje enviado exitosamente! Te contactaremos pronto.";

/// Body of a `201 Created` answer.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: SubmissionReceipt,
}

/// `POST /api/contact`
///
/// Body: `{"name": ..., "email": ..., "message": ...}` as JSON, or the same
/// fields URL-encoded. A body that cannot be decoded into string fields is
/// handled as a form with every field missing.
pub async fn submit(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let form = read_form(request).await;

    let receipt = state.intake.submit(&form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: SUCCESS_MESSAGE,
            data: receipt,
        }),
    ))
}

async fn read_form(request: Request) -> ContactForm {
    let urlencoded = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|mime| mime.starts_with("application/x-www-form-urlencoded"));

    let decoded = if urlencoded {
        Form::<ContactForm>::from_request(request, &())
            .await
            .map(|Form(form)| form)
            .map_err(|rejection| rejection.body_text())
    } else {
        Json::<ContactForm>::from_request(request, &())
            .await
            .map(|Json(form)| form)
            .map_err(|rejection| rejection.body_text())
    };

    decoded.unwrap_or_else(|detail| {
        tracing::debug!(error = %detail, "unreadable contact payload");
        ContactForm::default()
    })
}
