//! Filtered, paginated message listing.
//!
//! Translates raw query parameters into a validated [`ListParams`] and
//! shapes the `{data, total, limit, offset}` response envelope. Out-of-range
//! pagination values are rejected with the offending parameter named, never
//! silently clamped.

use serde::{Deserialize, Serialize};

use crate::{
    consts, models,
    repo::{ImplMessageRepo, MessageFilter},
};
use chrono::NaiveDateTime;

/// Raw query parameters of `GET /messages`.
///
/// Everything deserializes as an optional string so that malformed values
/// surface as our own validation errors instead of a framework-level
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    #[serde(rename = "from")]
    pub from_msisdn: Option<String>,
    pub since: Option<String>,
    pub q: Option<String>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
    pub filter: MessageFilter,
}

impl MessagesQuery {
    /// Validates and converts the raw parameters.
    ///
    /// # Errors
    /// Returns a message naming the offending parameter. Empty-string
    /// parameters are treated as absent.
    pub fn into_params(self) -> Result<ListParams, String> {
        let limit = match non_empty(self.limit) {
            None => consts::DEFAULT_PAGE_LIMIT,
            Some(raw) => {
                let limit: i64 = raw
                    .parse()
                    .map_err(|_| "limit must be an integer".to_string())?;
                if !(1..=consts::MAX_PAGE_LIMIT).contains(&limit) {
                    return Err(format!(
                        "limit must be between 1 and {}",
                        consts::MAX_PAGE_LIMIT
                    ));
                }
                limit
            }
        };

        let offset = match non_empty(self.offset) {
            None => 0,
            Some(raw) => {
                let offset: i64 = raw
                    .parse()
                    .map_err(|_| "offset must be an integer".to_string())?;
                if offset < 0 {
                    return Err("offset must be non-negative".to_string());
                }
                offset
            }
        };

        let since = match non_empty(self.since) {
            None => None,
            Some(raw) => {
                if NaiveDateTime::parse_from_str(&raw, consts::TS_FORMAT).is_err() {
                    return Err(
                        "since must be an ISO-8601 UTC timestamp with Z suffix (e.g. 2025-01-15T10:00:00Z)"
                            .to_string(),
                    );
                }
                Some(raw)
            }
        };

        Ok(ListParams {
            limit,
            offset,
            filter: MessageFilter {
                from_msisdn: non_empty(self.from_msisdn),
                since,
                q: non_empty(self.q),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Response envelope of `GET /messages`.
#[derive(Debug, Serialize)]
pub struct MessagesListResponse {
    pub data: Vec<models::message::Message>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Fetches one page of messages, ordered by `(ts ASC, message_id ASC)`.
///
/// `total` in the envelope is the filtered count before pagination, so
/// callers can page deterministically.
pub async fn list_messages(
    params: ListParams,
    repo: &ImplMessageRepo,
) -> anyhow::Result<MessagesListResponse> {
    let (data, total) = repo
        .get_messages(&params.filter, params.limit, params.offset)
        .await?;

    Ok(MessagesListResponse {
        data,
        total,
        limit: params.limit,
        offset: params.offset,
    })
}
