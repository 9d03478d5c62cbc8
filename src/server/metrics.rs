//! Metrics exposition endpoint (GET /metrics)

use ntex::web;

use crate::metric;

#[web::get("/metrics")]
pub async fn expose() -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(metric::render_prometheus())
}
