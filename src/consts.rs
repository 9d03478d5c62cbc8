pub const SIGNATURE_HEADER: &str = "X-Signature";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Canonical ISO-8601 UTC timestamp format, also the stored `ts` representation.
pub const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub const MAX_TEXT_LEN: usize = 4096;

pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 100;

pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DB_BUSY_TIMEOUT_MS: u64 = 5_000;
