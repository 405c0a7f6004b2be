//! Contact-form dispatch endpoint.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::mail::UserDetails;
use crate::metrics;
use crate::state::AppState;
use crate::validation::{is_valid_email, is_valid_phone};

/// Inbound shape. The required fields are optional here so that a missing
/// field reaches the validation path and produces the documented 400 body
/// instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct SendUserDetailsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub dob: Option<String>,
    pub tob: Option<String>,
    pub pob: Option<String>,
}

fn validate(req: &SendUserDetailsRequest) -> Result<UserDetails, ApiError> {
    let required = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let (Some(name), Some(email), Some(phone)) = (
        required(&req.name),
        required(&req.email),
        required(&req.phone),
    ) else {
        return Err(ApiError::Validation(
            "name, email, and phone are required".to_string(),
        ));
    };

    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email".to_string()));
    }
    if !is_valid_phone(&phone) {
        return Err(ApiError::Validation("Invalid phone".to_string()));
    }

    Ok(UserDetails {
        name,
        email,
        phone,
        message: req.message.clone(),
        dob: req.dob.clone(),
        tob: req.tob.clone(),
        pob: req.pob.clone(),
    })
}

/// POST /send-user-details
pub async fn send_user_details(
    state: web::Data<AppState>,
    body: web::Json<SendUserDetailsRequest>,
) -> Result<HttpResponse, ApiError> {
    let details = validate(&body).inspect_err(|_| {
        metrics::MAIL_REQUESTS
            .with_label_values(&["validation_error"])
            .inc();
    })?;

    let Some(ref mailer) = state.mailer else {
        metrics::MAIL_REQUESTS
            .with_label_values(&["not_configured"])
            .inc();
        return Err(ApiError::MailNotConfigured);
    };

    match mailer.send(&details).await {
        Ok(result) => {
            metrics::MAIL_REQUESTS.with_label_values(&["success"]).inc();
            tracing::info!(email = %details.email, "contact form dispatched");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "Email sent",
                "result": result,
            })))
        }
        Err(e) => {
            metrics::MAIL_REQUESTS
                .with_label_values(&["send_error"])
                .inc();
            Err(ApiError::MailSend(e))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-user-details", web::post().to(send_user_details));
}
