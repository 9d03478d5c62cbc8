pub const CREATE_TABLE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    message_id TEXT PRIMARY KEY,
    from_msisdn TEXT NOT NULL,
    to_msisdn TEXT NOT NULL,
    ts TEXT NOT NULL,
    text TEXT NOT NULL,
    received_at TEXT NOT NULL
);
"#;

pub const CREATE_INDEX_MESSAGES_TS: &str =
    r#"CREATE INDEX IF NOT EXISTS idx_messages_ts ON messages(ts);"#;

pub const CREATE_INDEX_MESSAGES_FROM: &str =
    r#"CREATE INDEX IF NOT EXISTS idx_messages_from ON messages(from_msisdn);"#;

pub const QUERY_INSERT_MESSAGE: &str = r#"
INSERT INTO messages(message_id,from_msisdn,to_msisdn,ts,text,received_at)
VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_TOTAL_MESSAGES: &str = r#"SELECT COUNT(*) FROM messages;"#;

pub const QUERY_SENDERS_COUNT: &str = r#"SELECT COUNT(DISTINCT from_msisdn) FROM messages;"#;

pub const QUERY_TOP_SENDERS: &str = r#"
SELECT from_msisdn, COUNT(*) AS count
FROM messages
GROUP BY from_msisdn
ORDER BY count DESC, from_msisdn ASC
LIMIT 10;
"#;

pub const QUERY_TS_RANGE: &str = r#"SELECT MIN(ts), MAX(ts) FROM messages;"#;

pub const QUERY_SCHEMA_READY: &str = r#"SELECT 1 FROM messages LIMIT 1;"#;

// WHERE fragments ANDed together for listing; bind order must follow the
// from, since, q filter order.
pub const FILTER_FROM: &str = "from_msisdn = ?";
pub const FILTER_SINCE: &str = "ts >= ?";
pub const FILTER_TEXT_CONTAINS: &str = "instr(lower(text), lower(?)) > 0";
