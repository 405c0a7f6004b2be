use std::env;

use url::Url;

const DEFAULT_PAYPAL_API: &str = "https://api-m.sandbox.paypal.com";
const DEFAULT_PORT: u16 = 5050;
const DEFAULT_RATE_LIMIT_RPM: u64 = 120;

/// Process-wide configuration, read from the environment once at startup and
/// immutable for the process lifetime.
#[derive(Clone)]
pub struct ServerConfig {
    /// PayPal REST client id
    pub paypal_client_id: String,
    /// PayPal REST client secret
    pub paypal_client_secret: String,
    /// PayPal API base URL (sandbox by default)
    pub paypal_api_url: String,
    /// Server port
    pub port: u16,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Directory to serve SPA static files from (None = don't serve SPA)
    pub spa_dir: Option<String>,
    /// Mail provider endpoint (None = mail dispatch disabled)
    pub mail_endpoint: Option<String>,
    /// Mail provider API key
    pub mail_api_key: Option<String>,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
    /// Rate limit requests per minute per IP
    pub rate_limit_rpm: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("paypal_client_id", &self.paypal_client_id)
            .field("paypal_client_secret", &"[REDACTED]")
            .field("paypal_api_url", &self.paypal_api_url)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("spa_dir", &self.spa_dir)
            .field("mail_endpoint", &self.mail_endpoint)
            .field(
                "mail_api_key",
                &self.mail_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: PayPal credentials
        let paypal_client_id = env::var("PAYPAL_CLIENT_ID")
            .map_err(|_| ConfigError::MissingRequired("PAYPAL_CLIENT_ID"))?;
        let paypal_client_secret = env::var("PAYPAL_CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingRequired("PAYPAL_CLIENT_SECRET"))?;

        // Optional: API base URL
        let paypal_api_url =
            env::var("PAYPAL_API").unwrap_or_else(|_| DEFAULT_PAYPAL_API.to_string());
        Url::parse(&paypal_api_url)
            .map_err(|_| ConfigError::InvalidUrl(paypal_api_url.clone()))?;

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: allowed origins
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_else(|_| default_origins());

        // Optional: SPA directory
        let spa_dir = env::var("SPA_DIR").ok().filter(|s| !s.is_empty());

        // Optional: mail provider
        let mail_endpoint = env::var("MAIL_ENDPOINT").ok().filter(|s| !s.is_empty());
        if let Some(ref endpoint) = mail_endpoint {
            Url::parse(endpoint).map_err(|_| ConfigError::InvalidUrl(endpoint.clone()))?;
        }
        let mail_api_key = env::var("MAIL_API_KEY").ok().filter(|s| !s.is_empty());

        // Optional: metrics token
        let metrics_token = env::var("METRICS_TOKEN").ok().filter(|s| !s.is_empty());

        // Optional: rate limit
        let rate_limit_rpm = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        if mail_endpoint.is_none() {
            tracing::warn!(
                "MAIL_ENDPOINT not set — /send-user-details will answer 500 until configured"
            );
        }
        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            paypal_client_id,
            paypal_client_secret,
            paypal_api_url,
            port,
            allowed_origins,
            spa_dir,
            mail_endpoint,
            mail_api_key,
            metrics_token,
            rate_limit_rpm,
        })
    }
}

/// Split a comma-separated origin list, trimming whitespace and dropping
/// empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5174".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
