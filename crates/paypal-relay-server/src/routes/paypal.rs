//! Order-lifecycle relay endpoints.
//!
//! Both routes are stateless pass-throughs: the processor owns the order and
//! its CREATED → CAPTURED transition; this layer only forwards the two
//! transition-triggering requests and relays the response verbatim. No input
//! validation happens here beyond JSON shape — a bad amount or unknown order
//! id is the processor's rejection to make, normalized to a generic 500.

use std::time::Instant;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

/// Amount as the storefront sends it: either a decimal string or a JSON
/// number. The processor wants a decimal string, so numbers are formatted
/// to two places before forwarding.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(f64),
}

impl Amount {
    pub fn as_decimal_string(&self) -> String {
        match self {
            Amount::Text(s) => s.clone(),
            Amount::Number(n) => format!("{n:.2}"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: Amount,
    /// Accepted at the boundary, not forwarded to the processor.
    #[allow(dead_code)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderRequest {
    pub order_id: String,
}

/// POST /api/paypal/create-order
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let amount = body.amount.as_decimal_string();
    let start = Instant::now();

    match state.paypal.create_order(&amount).await {
        Ok(order) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["create", "success"])
                .inc();
            metrics::UPSTREAM_LATENCY
                .with_label_values(&["create"])
                .observe(start.elapsed().as_secs_f64());
            tracing::info!(
                order_id = order["id"].as_str().unwrap_or("unknown"),
                "order created"
            );
            Ok(HttpResponse::Ok().json(order))
        }
        Err(e) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["create", metrics::relay_result_label(&e)])
                .inc();
            metrics::UPSTREAM_LATENCY
                .with_label_values(&["create"])
                .observe(start.elapsed().as_secs_f64());
            Err(ApiError::CreateOrder(e))
        }
    }
}

/// POST /api/paypal/capture-order
pub async fn capture_order(
    state: web::Data<AppState>,
    body: web::Json<CaptureOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let start = Instant::now();

    match state.paypal.capture_order(&body.order_id).await {
        Ok(capture) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["capture", "success"])
                .inc();
            metrics::UPSTREAM_LATENCY
                .with_label_values(&["capture"])
                .observe(start.elapsed().as_secs_f64());
            tracing::info!(order_id = %body.order_id, "order captured");
            Ok(HttpResponse::Ok().json(capture))
        }
        Err(e) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["capture", metrics::relay_result_label(&e)])
                .inc();
            metrics::UPSTREAM_LATENCY
                .with_label_values(&["capture"])
                .observe(start.elapsed().as_secs_f64());
            tracing::warn!(order_id = %body.order_id, "capture failed");
            Err(ApiError::CaptureOrder(e))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/paypal/create-order", web::post().to(create_order))
        .route("/api/paypal/capture-order", web::post().to(capture_order));
}
