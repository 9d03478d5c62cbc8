//! Route configuration.

use ntex::web;

use super::{health, messages, metrics, stats};
use crate::webhook;

/// Registers every endpoint of the service.
///
/// # Routes
/// - `POST /webhook` - Signed message ingestion
/// - `GET /messages` - Paginated, filterable listing
/// - `GET /stats` - Aggregate analytics
/// - `GET /metrics` - Prometheus text exposition
/// - `GET /health/live` / `GET /health/ready` - Probes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service((
        webhook::routes::receive,
        messages::list,
        stats::stats,
        metrics::expose,
        health::live,
        health::ready,
    ));
}

/// Fallback for unknown routes, JSON like everything else.
pub async fn not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound().json(&serde_json::json!({"detail": "not found"}))
}
