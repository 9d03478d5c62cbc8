pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

/// Result of an idempotent insert. `AlreadyExists` is not an error: replays
/// of a `message_id` fold into success without touching stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Filters for message listing. All present filters are ANDed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageFilter {
    /// Exact match on the sender.
    pub from_msisdn: Option<String>,
    /// Inclusive lower bound on `ts`, canonical ISO-8601 UTC.
    pub since: Option<String>,
    /// Case-insensitive (ASCII fold) substring match on `text`.
    pub q: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepo {
    async fn insert_message(
        &self,
        message: &models::message::WebhookMessage,
    ) -> anyhow::Result<InsertOutcome>;

    /// Returns one page ordered by `(ts ASC, message_id ASC)` together with
    /// the total count of rows matching the filter before pagination.
    async fn get_messages(
        &self,
        filter: &MessageFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<(Vec<models::message::Message>, i64)>;

    async fn get_stats(&self) -> anyhow::Result<models::stats::MessageStats>;

    /// True when the database is reachable and the schema is applied.
    async fn is_ready(&self) -> bool;
}

pub type ImplMessageRepo = Box<dyn MessageRepo>;
