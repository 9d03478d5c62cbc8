//! Integration tests for health probes, metrics exposition and the
//! request accounting middleware.

mod common;

use msg_inbox::server;
use ntex::http::StatusCode;
use ntex::web::{self, test};

#[ntex::test]
async fn test_liveness_always_ok() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state().await)
            .configure(server::routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[ntex::test]
async fn test_readiness_ok_with_secret_and_store() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state().await)
            .configure(server::routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[ntex::test]
async fn test_readiness_fails_without_secret() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state_with_secret("").await)
            .configure(server::routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "not ready");
    assert!(body["reason"].as_str().unwrap().contains("secret"));
}

#[ntex::test]
async fn test_unknown_route_returns_json_404() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state().await)
            .configure(server::routes::configure)
            .default_service(web::route().to(server::routes::not_found)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::json!({"detail": "not found"}));
}

#[ntex::test]
async fn test_request_id_header_present() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state().await)
            .wrap(server::middleware::RequestMetrics)
            .configure(server::routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;

    let request_id = resp.response().headers().get("x-request-id");
    assert!(request_id.is_some());
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 8);
}

#[ntex::test]
async fn test_metrics_exposition_after_requests() {
    let app = test::init_service(
        web::App::new()
            .state(common::test_state().await)
            .wrap(server::middleware::RequestMetrics)
            .configure(server::routes::configure),
    )
    .await;

    // One rejected ingest: counters must move even on the failure path.
    let body = b"{}".to_vec();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/webhook")
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    assert!(text.contains("# TYPE http_requests_total counter"));
    assert!(text.contains("# TYPE webhook_requests_total counter"));
    assert!(text.contains("# TYPE request_latency_ms histogram"));
    assert!(text.contains("request_latency_ms_bucket{le=\"+Inf\"}"));
    assert!(text.contains("request_latency_ms_count"));
    assert!(text.contains("request_latency_ms_sum"));

    // The invalid-signature ingest above is visible by result label.
    let invalid_line = text
        .lines()
        .find(|line| line.starts_with("webhook_requests_total{result=\"invalid_signature\"}"))
        .expect("invalid_signature counter exposed");
    let value: u64 = invalid_line.rsplit(' ').next().unwrap().parse().unwrap();
    assert!(value >= 1);

    // The webhook request itself was accounted by path and status.
    let accounted = text
        .lines()
        .any(|line| line.starts_with("http_requests_total{path=\"/webhook\",status=\"401\"}"));
    assert!(accounted);
}
