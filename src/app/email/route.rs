use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};

use super::schema::{
    EmailStatusResponseBody, SendCustomRequestBody, SendCustomResponseBody, SendTestRequestBody,
    SendTestResponseBody,
};
use super::template::{render_custom_email, render_test_email, TEST_EMAIL_SUBJECT};
use crate::app::error::{AppError, AppResult};
use crate::app::AppState;
use crate::domain::{CustomEmail, TestEmail};

#[tracing::instrument(name = "Send test email", skip(state, payload), fields(to = tracing::field::Empty))]
pub async fn send_test(
    State(state): State<AppState>,
    payload: Result<Json<SendTestRequestBody>, JsonRejection>,
) -> AppResult<Json<SendTestResponseBody>> {
    let Json(body) = payload?;
    let email = TestEmail::try_from(body)?;
    tracing::Span::current().record("to", &tracing::field::display(&email.recipient));

    let email_client = state.email_client()?;

    let sent_at = Utc::now();
    let html = render_test_email(&email, sent_at).context("Failed to render the test email.")?;

    let email_id = email_client
        .send_email(&email.recipient, TEST_EMAIL_SUBJECT, &html)
        .await
        .map_err(|e| AppError::from_send_failure(e, "Failed to send email", state.environment))?;

    tracing::info!(email_id = %email_id, "test email sent");

    Ok(Json(SendTestResponseBody {
        success: true,
        message: "Test email sent successfully!".to_owned(),
        email_id: email_id.to_string(),
        to: email.recipient.to_string(),
        sent_at: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

#[tracing::instrument(name = "Send custom email", skip(state, payload), fields(to = tracing::field::Empty))]
pub async fn send_custom(
    State(state): State<AppState>,
    payload: Result<Json<SendCustomRequestBody>, JsonRejection>,
) -> AppResult<Json<SendCustomResponseBody>> {
    let Json(body) = payload?;
    let email = CustomEmail::try_from(body)?;
    tracing::Span::current().record("to", &tracing::field::display(&email.recipient));

    let email_client = state.email_client()?;

    let sent_at = Utc::now();
    let html =
        render_custom_email(&email, sent_at).context("Failed to render the custom email.")?;

    let email_id = email_client
        .send_email(&email.recipient, &email.subject, &html)
        .await
        .map_err(|e| {
            AppError::from_send_failure(e, "Failed to send custom email", state.environment)
        })?;

    tracing::info!(email_id = %email_id, "custom email sent");

    Ok(Json(SendCustomResponseBody {
        success: true,
        message: "Custom email sent successfully!".to_owned(),
        email_id: email_id.to_string(),
        to: email.recipient.to_string(),
        subject: email.subject,
        sent_at: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Delivery status lookup. The provider offers no status API, so this only points at its dashboard.
#[tracing::instrument(name = "Email status")]
pub async fn status(Path(email_id): Path<String>) -> Json<EmailStatusResponseBody> {
    Json(EmailStatusResponseBody {
        message: "Email status check not yet available in Resend API".to_owned(),
        email_id,
        note: "Check your Resend dashboard for delivery status".to_owned(),
    })
}
