//! Aggregate analytics endpoint (GET /stats)

use ntex::web;

use super::{AppState, errors};
use crate::api;

#[web::get("/stats")]
pub async fn stats(
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let document = api::stats::collect_stats(&app_state.repo)
        .await
        .map_err(|err| {
            log::error!("stats aggregation failed: {err:#}");
            errors::ApiError::StorageUnavailable
        })?;

    Ok(web::HttpResponse::Ok().json(&document))
}
