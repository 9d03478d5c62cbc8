use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{InsertOutcome, MessageFilter, MessageRepo, sqlite_queries};
use crate::{consts, models};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::message::Message {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            message_id: row.try_get("message_id")?,
            from_msisdn: row.try_get("from_msisdn")?,
            to_msisdn: row.try_get("to_msisdn")?,
            ts: row.try_get("ts")?,
            text: row.try_get("text")?,
        })
    }
}

/// Applies the schema. Idempotent, runs at every process start.
pub async fn init_schema(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(sqlite_queries::CREATE_TABLE_MESSAGES)
        .execute(db_pool)
        .await?;
    sqlx::query(sqlite_queries::CREATE_INDEX_MESSAGES_TS)
        .execute(db_pool)
        .await?;
    sqlx::query(sqlite_queries::CREATE_INDEX_MESSAGES_FROM)
        .execute(db_pool)
        .await?;
    Ok(())
}

fn build_where_clause(filter: &MessageFilter) -> String {
    let mut conditions = Vec::new();
    if filter.from_msisdn.is_some() {
        conditions.push(sqlite_queries::FILTER_FROM);
    }
    if filter.since.is_some() {
        conditions.push(sqlite_queries::FILTER_SINCE);
    }
    if filter.q.is_some() {
        conditions.push(sqlite_queries::FILTER_TEXT_CONTAINS);
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

#[async_trait]
impl MessageRepo for SqlxSqliteRepo {
    async fn insert_message(
        &self,
        message: &models::message::WebhookMessage,
    ) -> anyhow::Result<InsertOutcome> {
        let received_at = Utc::now().format(consts::TS_FORMAT).to_string();

        // The PRIMARY KEY constraint is the single source of truth for
        // new-vs-duplicate under concurrent submissions of the same id.
        let result = sqlx::query(sqlite_queries::QUERY_INSERT_MESSAGE)
            .bind(&message.message_id)
            .bind(&message.from_msisdn)
            .bind(&message.to_msisdn)
            .bind(&message.ts)
            .bind(&message.text)
            .bind(&received_at)
            .execute(&self.db_pool)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_messages(
        &self,
        filter: &MessageFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<(Vec<models::message::Message>, i64)> {
        let where_clause = build_where_clause(filter);

        let count_sql = format!("SELECT COUNT(*) FROM messages {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(from_msisdn) = &filter.from_msisdn {
            count_query = count_query.bind(from_msisdn);
        }
        if let Some(since) = &filter.since {
            count_query = count_query.bind(since);
        }
        if let Some(q) = &filter.q {
            count_query = count_query.bind(q);
        }
        let total = count_query.fetch_one(&self.db_pool).await?;

        let page_sql = format!(
            r#"
            SELECT message_id, from_msisdn, to_msisdn, ts, text
            FROM messages
            {where_clause}
            ORDER BY ts ASC, message_id ASC
            LIMIT ? OFFSET ?
            "#
        );
        let mut page_query = sqlx::query_as::<_, models::message::Message>(&page_sql);
        if let Some(from_msisdn) = &filter.from_msisdn {
            page_query = page_query.bind(from_msisdn);
        }
        if let Some(since) = &filter.since {
            page_query = page_query.bind(since);
        }
        if let Some(q) = &filter.q {
            page_query = page_query.bind(q);
        }
        let page = page_query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db_pool)
            .await?;

        Ok((page, total))
    }

    async fn get_stats(&self) -> anyhow::Result<models::stats::MessageStats> {
        let total_messages = sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_TOTAL_MESSAGES)
            .fetch_one(&self.db_pool)
            .await?;

        let senders_count = sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_SENDERS_COUNT)
            .fetch_one(&self.db_pool)
            .await?;

        let messages_per_sender = sqlx::query(sqlite_queries::QUERY_TOP_SENDERS)
            .map(|row: SqliteRow| models::stats::SenderCount {
                from_msisdn: row.try_get("from_msisdn").unwrap_or_default(),
                count: row.try_get("count").unwrap_or_default(),
            })
            .fetch_all(&self.db_pool)
            .await?;

        let (first_message_ts, last_message_ts) =
            sqlx::query_as::<_, (Option<String>, Option<String>)>(sqlite_queries::QUERY_TS_RANGE)
                .fetch_one(&self.db_pool)
                .await?;

        Ok(models::stats::MessageStats {
            total_messages,
            senders_count,
            messages_per_sender,
            first_message_ts,
            last_message_ts,
        })
    }

    async fn is_ready(&self) -> bool {
        sqlx::query(sqlite_queries::QUERY_SCHEMA_READY)
            .fetch_optional(&self.db_pool)
            .await
            .is_ok()
    }
}
