use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::{json, Value};

use paypal_relay::PaypalClient;
use paypal_relay_server::config::ServerConfig;
use paypal_relay_server::mail::{MailError, MailSender, UserDetails};
use paypal_relay_server::routes;
use paypal_relay_server::state::AppState;

/// Mail collaborator stub: succeeds with a fixed provider result or fails
/// with a transport error.
struct StubMailer {
    fail: bool,
}

#[async_trait]
impl MailSender for StubMailer {
    async fn send(&self, _details: &UserDetails) -> Result<Value, MailError> {
        if self.fail {
            Err(MailError::Transport("connection refused".to_string()))
        } else {
            Ok(json!({ "messageId": "msg-1", "accepted": true }))
        }
    }
}

fn make_config(paypal_base: &str, metrics_token: Option<&str>) -> ServerConfig {
    ServerConfig {
        paypal_client_id: "relay-id".to_string(),
        paypal_client_secret: "relay-secret".to_string(),
        paypal_api_url: paypal_base.to_string(),
        port: 5050,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        spa_dir: None,
        mail_endpoint: None,
        mail_api_key: None,
        metrics_token: metrics_token.map(|t| t.to_string()),
        rate_limit_rpm: 120,
    }
}

fn make_state(paypal_base: &str, mailer: Option<Arc<dyn MailSender>>) -> web::Data<AppState> {
    let config = make_config(paypal_base, None);
    web::Data::new(AppState {
        paypal: Arc::new(PaypalClient::new(
            paypal_base,
            &config.paypal_client_id,
            &config.paypal_client_secret,
        )),
        config: Arc::new(config),
        mailer,
    })
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "access_token": "tok-it",
                    "token_type": "Bearer",
                    "expires_in": 32400,
                }));
        })
        .await
}

#[actix_rt::test]
async fn test_create_order_relays_processor_payload() {
    let server = MockServer::start_async().await;
    let token_mock = mock_token(&server).await;
    let order_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/checkout/orders")
                .header("authorization", "Bearer tok-it")
                .json_body(json!({
                    "intent": "CAPTURE",
                    "purchase_units": [
                        { "amount": { "currency_code": "USD", "value": "25.00" } }
                    ],
                }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "ORDER-1", "status": "CREATED" }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(make_state(&server.base_url(), None))
            .configure(routes::paypal::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/paypal/create-order")
        .set_json(json!({ "amount": "25.00", "description": "consultation" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": "ORDER-1", "status": "CREATED" }));

    token_mock.assert_calls_async(1).await;
    order_mock.assert_calls_async(1).await;
}

#[actix_rt::test]
async fn test_create_order_token_failure_returns_generic_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/oauth2/token");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "invalid_client" }));
        })
        .await;
    let order_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/checkout/orders");
            then.status(201).json_body(json!({ "id": "never" }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(make_state(&server.base_url(), None))
            .configure(routes::paypal::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/paypal/create-order")
        .set_json(json!({ "amount": "25.00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Failed to create PayPal order");

    // The token failure must abort before the resource call.
    order_mock.assert_calls_async(0).await;
}

#[actix_rt::test]
async fn test_create_order_formats_numeric_amount() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    let order_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/checkout/orders")
                .json_body_includes(r#"{"purchase_units":[{"amount":{"value":"49.90"}}]}"#);
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "ORDER-2", "status": "CREATED" }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(make_state(&server.base_url(), None))
            .configure(routes::paypal::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/paypal/create-order")
        .set_json(json!({ "amount": 49.9 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    order_mock.assert_calls_async(1).await;
}

#[actix_rt::test]
async fn test_capture_order_relays_capture_payload() {
    let server = MockServer::start_async().await;
    let token_mock = mock_token(&server).await;
    let capture_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/checkout/orders/ORDER-9/capture")
                .header("authorization", "Bearer tok-it")
                .body("{}");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "ORDER-9", "status": "COMPLETED" }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(make_state(&server.base_url(), None))
            .configure(routes::paypal::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/paypal/capture-order")
        .set_json(json!({ "orderId": "ORDER-9" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": "ORDER-9", "status": "COMPLETED" }));

    token_mock.assert_calls_async(1).await;
    capture_mock.assert_calls_async(1).await;
}

#[actix_rt::test]
async fn test_capture_failure_hides_processor_detail() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/checkout/orders/NOPE/capture");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({ "name": "RESOURCE_NOT_FOUND" }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(make_state(&server.base_url(), None))
            .configure(routes::paypal::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/paypal/capture-order")
        .set_json(json!({ "orderId": "NOPE" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Failed to capture PayPal order");
}

#[actix_rt::test]
async fn test_send_user_details_requires_fields() {
    let app = test::init_service(
        App::new()
            .app_data(make_state("http://localhost:1", None))
            .configure(routes::mail::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({ "name": "Asha", "email": "asha@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "name, email, and phone are required");
}

#[actix_rt::test]
async fn test_send_user_details_rejects_bad_patterns() {
    let app = test::init_service(
        App::new()
            .app_data(make_state("http://localhost:1", None))
            .configure(routes::mail::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({
            "name": "Asha",
            "email": "bad@",
            "phone": "+14155550100",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email");

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "12345",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid phone");
}

#[actix_rt::test]
async fn test_send_user_details_embeds_provider_result() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(
                "http://localhost:1",
                Some(Arc::new(StubMailer { fail: false })),
            ))
            .configure(routes::mail::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+14155550100",
            "message": "hello",
            "dob": "1990-01-01",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email sent");
    assert_eq!(body["result"]["messageId"], "msg-1");
}

#[actix_rt::test]
async fn test_send_user_details_send_failure_is_500() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(
                "http://localhost:1",
                Some(Arc::new(StubMailer { fail: true })),
            ))
            .configure(routes::mail::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+14155550100",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Failed to send email");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[actix_rt::test]
async fn test_send_user_details_without_mailer_is_500() {
    let app = test::init_service(
        App::new()
            .app_data(make_state("http://localhost:1", None))
            .configure(routes::mail::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send-user-details")
        .set_json(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+14155550100",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Failed to send email");
}

#[actix_rt::test]
async fn test_health_reports_ok() {
    let app = test::init_service(
        App::new()
            .app_data(make_state("http://localhost:1", None))
            .configure(routes::health::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "paypal-relay");
}

#[actix_rt::test]
async fn test_metrics_gated_by_bearer_token() {
    let config = make_config("http://localhost:1", Some("metrics-token-123"));
    let state = web::Data::new(AppState {
        paypal: Arc::new(PaypalClient::new("http://localhost:1", "id", "secret")),
        config: Arc::new(config),
        mailer: None,
    });

    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::health::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer metrics-token-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_spa_catch_all_serves_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>relay index</html>").unwrap();

    let spa_dir = dir.path().to_str().unwrap().to_string();
    let index_path = format!("{}/index.html", spa_dir);

    let app = test::init_service(
        App::new()
            .app_data(make_state("http://localhost:1", None))
            .configure(routes::health::configure)
            .service(
                actix_files::Files::new("/", &spa_dir)
                    .index_file("index.html")
                    .default_handler(web::to(move || {
                        let path = index_path.clone();
                        async move { actix_files::NamedFile::open_async(path).await }
                    })),
            ),
    )
    .await;

    // Root serves the index
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Unknown client-side routes fall through to the index
    let req = test::TestRequest::get().uri("/checkout/success").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body, "<html>relay index</html>");

    // API routes registered before the catch-all still win
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
