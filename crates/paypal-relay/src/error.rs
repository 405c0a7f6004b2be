use thiserror::Error;

/// Errors returned by relay operations against the PayPal API.
///
/// The upstream detail strings are captured for server-side logging only —
/// the HTTP layer normalizes every variant to a generic 500 and never relays
/// the processor's error body to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("token exchange rejected: status {status}")]
    Auth { status: u16, detail: String },

    #[error("processor rejected the request: status {status}")]
    Upstream { status: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed processor response: {0}")]
    MalformedResponse(String),
}
