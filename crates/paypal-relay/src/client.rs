//! HTTP client for the PayPal Orders API.
//!
//! Each operation performs the full two-step exchange: client-credentials
//! token request against `/v1/oauth2/token`, then the resource call with the
//! returned bearer token. The second call never happens if the first fails.

use std::time::Duration;

use base64::Engine;
use serde_json::Value;

use crate::error::RelayError;
use crate::order::{AccessToken, CreateOrderBody};

const TOKEN_PATH: &str = "/v1/oauth2/token";
const ORDERS_PATH: &str = "/v2/checkout/orders";

/// Per-call timeout for both the token exchange and the resource call.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// The relay charges in a single fixed currency.
pub const CURRENCY_CODE: &str = "USD";

/// Client for the order-lifecycle endpoints of the PayPal REST API.
pub struct PaypalClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl PaypalClient {
    pub fn new(base_url: &str, client_id: &str, client_secret: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    /// Exchange the configured client credentials for a short-lived bearer
    /// token. Called once per relay operation — the token is never cached.
    pub async fn fetch_access_token(&self) -> Result<AccessToken, RelayError> {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));

        let resp = self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .header("Authorization", format!("Basic {credentials}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "token exchange rejected");
            return Err(RelayError::Auth {
                status: status.as_u16(),
                detail,
            });
        }

        resp.json::<AccessToken>()
            .await
            .map_err(|e| RelayError::MalformedResponse(format!("token response: {e}")))
    }

    /// Create a CAPTURE-intent order for `amount` (decimal string, major
    /// units, fixed currency). Returns the processor's order JSON verbatim.
    pub async fn create_order(&self, amount: &str) -> Result<Value, RelayError> {
        let token = self.fetch_access_token().await?;
        let body = CreateOrderBody::capture(CURRENCY_CODE, amount);

        let request = self
            .http
            .post(format!("{}{}", self.base_url, ORDERS_PATH))
            .bearer_auth(&token.access_token)
            .json(&body);

        self.resource_call(request).await
    }

    /// Finalize a previously created order. The capture endpoint takes an
    /// empty JSON body. Returns the processor's capture JSON verbatim.
    pub async fn capture_order(&self, order_id: &str) -> Result<Value, RelayError> {
        let token = self.fetch_access_token().await?;

        let request = self
            .http
            .post(format!(
                "{}{}/{}/capture",
                self.base_url, ORDERS_PATH, order_id
            ))
            .bearer_auth(&token.access_token)
            .json(&serde_json::json!({}));

        self.resource_call(request).await
    }

    async fn resource_call(&self, request: reqwest::RequestBuilder) -> Result<Value, RelayError> {
        let resp = request
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("resource request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RelayError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "processor rejected resource call");
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                detail: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| RelayError::MalformedResponse(format!("resource response: {e}")))
    }
}
