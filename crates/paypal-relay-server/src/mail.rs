//! Mail-dispatch collaborator boundary.
//!
//! The relay only validates the contact form and hands it off — templates,
//! provider selection, and retries are the provider's concern. [`MailSender`]
//! is the seam: the production implementation POSTs to an HTTP mail provider,
//! tests substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Contact-form submission forwarded to the mail provider verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub dob: Option<String>,
    pub tob: Option<String>,
    pub pob: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail provider request failed: {0}")]
    Transport(String),

    #[error("mail provider rejected the message: status {status}")]
    Rejected { status: u16, detail: String },
}

/// The single function the relay consumes from the email collaborator.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Forward the submission; returns the provider-specific result payload.
    async fn send(&self, details: &UserDetails) -> Result<Value, MailError>;
}

/// Mail sender that POSTs the submission as JSON to a provider endpoint.
pub struct HttpMailSender {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpMailSender {
    pub fn new(endpoint: &str, api_key: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.map(|k| k.to_string()),
        }
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, details: &UserDetails) -> Result<Value, MailError> {
        let mut request = self.http.post(&self.endpoint).json(details);

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(MailError::Rejected {
                status: status.as_u16(),
                detail: body,
            });
        }

        // Providers that answer with a non-JSON body still produce a result.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
