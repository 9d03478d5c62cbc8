use serde::Serialize;

/// Per-sender message count, one entry of the top-senders list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SenderCount {
    #[serde(rename = "from")]
    pub from_msisdn: String,
    pub count: i64,
}

/// Aggregate analytics document computed by the storage engine.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MessageStats {
    pub total_messages: i64,
    pub senders_count: i64,
    /// Top 10 senders, count descending, sender ascending on ties.
    pub messages_per_sender: Vec<SenderCount>,
    pub first_message_ts: Option<String>,
    pub last_message_ts: Option<String>,
}
