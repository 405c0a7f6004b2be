//! Backend relay server — forwards order lifecycle requests to PayPal and
//! contact-form submissions to a mail provider.
//!
//! The relay itself is stateless: no order state is stored, the processor's
//! API is the source of truth. Each order operation is two sequential
//! upstream calls (token exchange, then resource call) performed by the
//! [`paypal_relay`] core crate; this crate provides the HTTP surface,
//! configuration, validation, and metrics.
//!
//! # Modules
//!
//! - [`routes`] — HTTP endpoints (order create/capture, mail dispatch, health, metrics)
//! - [`config`] — Immutable [`ServerConfig`](config::ServerConfig) built once from the environment
//! - [`mail`] — The [`MailSender`](mail::MailSender) collaborator boundary
//! - [`validation`] — Contact-form field validation
//! - [`metrics`] — Prometheus metrics for relay operations

pub mod config;
pub mod cors;
pub mod error;
pub mod mail;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
