use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

use paypal_relay::RelayError;

use crate::mail::MailError;

/// Errors surfaced by the HTTP layer. The wire contract normalizes every
/// upstream failure to a generic 500 — the processor's error detail and a
/// correlation id are logged server-side only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Contact-form input malformed or missing
    #[error("{0}")]
    Validation(String),

    /// Order creation failed at either step of the relay
    #[error("order creation failed: {0}")]
    CreateOrder(#[source] RelayError),

    /// Order capture failed at either step of the relay
    #[error("order capture failed: {0}")]
    CaptureOrder(#[source] RelayError),

    /// Mail dispatch requested but no provider configured
    #[error("mail dispatch is not configured")]
    MailNotConfigured,

    /// Mail provider call failed
    #[error("mail dispatch failed: {0}")]
    MailSend(#[source] MailError),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "message": msg,
            })),
            ApiError::CreateOrder(e) => {
                let correlation = Uuid::new_v4();
                tracing::error!(%correlation, error = %e, detail = ?e, "PayPal create failed");
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Failed to create PayPal order")
            }
            ApiError::CaptureOrder(e) => {
                let correlation = Uuid::new_v4();
                tracing::error!(%correlation, error = %e, detail = ?e, "PayPal capture failed");
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Failed to capture PayPal order")
            }
            ApiError::MailNotConfigured => {
                tracing::error!("mail dispatch requested but MAIL_ENDPOINT is not set");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to send email",
                    "error": "mail dispatch is not configured",
                }))
            }
            ApiError::MailSend(e) => {
                tracing::error!(error = %e, "mail dispatch failed");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to send email",
                    "error": e.to_string(),
                }))
            }
        }
    }
}
