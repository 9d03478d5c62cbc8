#![allow(dead_code)]

use msg_inbox::repo::sqlite::{SqlxSqliteRepo, init_schema};
use msg_inbox::server::AppState;
use msg_inbox::webhook::security;
use sqlx::sqlite::SqlitePoolOptions;

pub const TEST_SECRET: &str = "testsecret";

/// Fresh app state over a private in-memory database.
pub async fn test_state() -> AppState {
    test_state_with_secret(TEST_SECRET).await
}

pub async fn test_state_with_secret(secret: &str) -> AppState {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    init_schema(&db_pool).await.expect("schema init");

    AppState {
        repo: Box::new(SqlxSqliteRepo { db_pool }),
        webhook_secret: secret.into(),
    }
}

/// HMAC-SHA256 hex digest with the test secret.
pub fn sign(body: &[u8]) -> String {
    security::sign(body, TEST_SECRET)
}

pub fn message_body(message_id: &str, from: &str, to: &str, ts: &str, text: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "message_id": message_id,
        "from": from,
        "to": to,
        "ts": ts,
        "text": text,
    }))
    .expect("message body serializes")
}
