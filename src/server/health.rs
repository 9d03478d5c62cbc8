//! Liveness and readiness probes
//!
//! Liveness only proves the process can run the handler. Readiness gates
//! traffic admission: the store must be reachable with the schema applied
//! and the webhook secret must be configured, otherwise every ingest would
//! be rejected anyway.

use ntex::web;

use super::AppState;

#[web::get("/health/live")]
pub async fn live() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({"status": "ok"}))
}

#[web::get("/health/ready")]
pub async fn ready(app_state: web::types::State<AppState>) -> web::HttpResponse {
    if app_state.webhook_secret.is_empty() {
        return web::HttpResponse::ServiceUnavailable().json(&serde_json::json!({
            "status": "not ready",
            "reason": "webhook secret not configured"
        }));
    }

    if !app_state.repo.is_ready().await {
        return web::HttpResponse::ServiceUnavailable().json(&serde_json::json!({
            "status": "not ready",
            "reason": "database not ready"
        }));
    }

    web::HttpResponse::Ok().json(&serde_json::json!({"status": "ok"}))
}
