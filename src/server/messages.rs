//! Message listing endpoint (GET /messages)

use ntex::web;

use super::{AppState, errors};
use crate::api;

/// Lists stored messages with pagination and filters, ordered by
/// `(ts ASC, message_id ASC)`.
#[web::get("/messages")]
pub async fn list(
    query: web::types::Query<api::messages::MessagesQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let params = query
        .into_inner()
        .into_params()
        .map_err(errors::ApiError::Validation)?;

    let response = api::messages::list_messages(params, &app_state.repo)
        .await
        .map_err(|err| {
            log::error!("message listing failed: {err:#}");
            errors::ApiError::StorageUnavailable
        })?;

    Ok(web::HttpResponse::Ok().json(&response))
}
