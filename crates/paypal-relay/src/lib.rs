//! PayPal Orders API client for the relay backend.
//!
//! Implements the two-step call pattern the Orders API requires: every
//! operation first performs a client-credentials token exchange (Basic auth
//! built from the configured client id and secret), then issues the resource
//! call with the freshly acquired bearer token. Tokens are deliberately not
//! cached across operations — the relay's contract is one exchange per call.
//!
//! # Example
//!
//! ```no_run
//! use paypal_relay::PaypalClient;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = PaypalClient::new(
//!     "https://api-m.sandbox.paypal.com",
//!     "client-id",
//!     "client-secret",
//! );
//!
//! let order = client.create_order("25.00").await.unwrap();
//! let capture = client
//!     .capture_order(order["id"].as_str().unwrap())
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod client;
pub mod error;
pub mod order;

pub use client::{PaypalClient, CURRENCY_CODE};
pub use error::RelayError;
pub use order::{AccessToken, CreateOrderBody, OrderAmount, PurchaseUnit};
