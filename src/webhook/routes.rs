//! Webhook receiver endpoint (POST /webhook)
//!
//! The handler owns the HTTP mapping of the ingest pipeline: outcome to
//! status code and response body, one `webhook_requests_total` increment per
//! request, and the per-request completion log line. Created and duplicate
//! deliberately share the same response so a sender cannot tell a replay
//! from a first delivery.

use super::handler::{self, IngestOutcome};
use crate::{consts, metric, server::AppState};
use ntex::{util::Bytes, web};
use std::time::Instant;

#[web::post("/webhook")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> web::HttpResponse {
    let started = Instant::now();

    if app_state.webhook_secret.is_empty() {
        metric::inc_webhook_requests("server_error");
        log::error!("webhook secret not configured, rejecting ingest");
        return web::HttpResponse::ServiceUnavailable()
            .json(&serde_json::json!({"detail": "server not ready"}));
    }

    let signature = req
        .headers()
        .get(consts::SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let outcome =
        match handler::ingest(&body, signature, &app_state.webhook_secret, &app_state.repo).await {
            Ok(outcome) => outcome,
            Err(err) => {
                metric::inc_webhook_requests("server_error");
                log::error!("ingest failed at storage layer: {err:#}");
                log_completed(503, started, None, None, "server_error");
                return web::HttpResponse::ServiceUnavailable()
                    .json(&serde_json::json!({"detail": "storage unavailable"}));
            }
        };

    metric::inc_webhook_requests(outcome.metric_label());

    match outcome {
        IngestOutcome::Created { message_id } => {
            log_completed(200, started, Some(&message_id), Some(false), "created");
            web::HttpResponse::Ok().json(&serde_json::json!({"status": "ok"}))
        }
        IngestOutcome::Duplicate { message_id } => {
            log_completed(200, started, Some(&message_id), Some(true), "duplicate");
            web::HttpResponse::Ok().json(&serde_json::json!({"status": "ok"}))
        }
        IngestOutcome::InvalidSignature => {
            log::warn!("invalid or missing webhook signature");
            log_completed(401, started, None, None, "invalid_signature");
            web::HttpResponse::Unauthorized()
                .json(&serde_json::json!({"detail": "invalid signature"}))
        }
        IngestOutcome::Rejected { detail } => {
            log_completed(422, started, None, None, "validation_error");
            web::HttpResponse::UnprocessableEntity().json(&serde_json::json!({"detail": detail}))
        }
    }
}

fn log_completed(
    status: u16,
    started: Instant,
    message_id: Option<&str>,
    dup: Option<bool>,
    result: &str,
) {
    log::info!(
        "webhook request completed status={status} latency_ms={latency:.2} message_id={message_id} dup={dup} result={result}",
        latency = started.elapsed().as_secs_f64() * 1000.0,
        message_id = message_id.unwrap_or("-"),
        dup = dup.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
    );
}
