//! Helper functions shared across api/, server/ and webhook/

use crate::consts;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};

/// Builds the SQLite connection pool.
///
/// Acquire and busy timeouts are bounded so a wedged database surfaces as a
/// retryable error instead of a hang; WAL keeps readers unblocked while
/// ingest writes.
pub async fn setup_sqlite_db_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    Ok(SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(consts::DB_ACQUIRE_TIMEOUT_SECS))
        .connect_with(
            SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .busy_timeout(Duration::from_millis(consts::DB_BUSY_TIMEOUT_MS))
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("foreign_keys", "ON"),
        )
        .await?)
}
