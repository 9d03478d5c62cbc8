use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Inbound webhook payload, parsed from the raw request body after the
/// signature has been verified.
///
/// `from`/`to` are opaque phone-number-like identifiers; nothing beyond
/// presence is enforced on them. `ts` must be ISO-8601 UTC with a `Z`
/// suffix since it doubles as the listing sort key.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WebhookMessage {
    pub message_id: String,
    #[serde(rename = "from")]
    pub from_msisdn: String,
    #[serde(rename = "to")]
    pub to_msisdn: String,
    pub ts: String,
    pub text: String,
}

impl WebhookMessage {
    /// Checks field-level constraints, returning a message naming the
    /// offending field on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.message_id.is_empty() {
            return Err("message_id must not be empty".into());
        }
        if self.from_msisdn.is_empty() {
            return Err("from must not be empty".into());
        }
        if self.to_msisdn.is_empty() {
            return Err("to must not be empty".into());
        }
        if NaiveDateTime::parse_from_str(&self.ts, consts::TS_FORMAT).is_err() {
            return Err(
                "ts must be an ISO-8601 UTC timestamp with Z suffix (e.g. 2025-01-15T10:00:00Z)"
                    .into(),
            );
        }
        if self.text.chars().count() > consts::MAX_TEXT_LEN {
            return Err(format!(
                "text must be at most {} characters",
                consts::MAX_TEXT_LEN
            ));
        }
        Ok(())
    }
}

/// A stored message as returned by listing queries.
///
/// `received_at` is audit-only and deliberately absent here.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub message_id: String,
    #[serde(rename = "from")]
    pub from_msisdn: String,
    #[serde(rename = "to")]
    pub to_msisdn: String,
    pub ts: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_message() -> WebhookMessage {
        WebhookMessage {
            message_id: "m1".into(),
            from_msisdn: "+919876543210".into(),
            to_msisdn: "+14155550100".into(),
            ts: "2025-01-15T10:00:00Z".into(),
            text: "Hello".into(),
        }
    }

    #[test]
    fn test_valid_message_passes() {
        assert!(valid_message().validate().is_ok());
    }

    #[test]
    fn test_empty_message_id_rejected() {
        let mut message = valid_message();
        message.message_id = String::new();

        let err = message.validate().unwrap_err();
        assert!(err.contains("message_id"));
    }

    #[test]
    fn test_empty_from_and_to_rejected() {
        let mut message = valid_message();
        message.from_msisdn = String::new();
        assert!(message.validate().unwrap_err().contains("from"));

        let mut message = valid_message();
        message.to_msisdn = String::new();
        assert!(message.validate().unwrap_err().contains("to"));
    }

    #[test]
    fn test_malformed_ts_rejected() {
        for bad_ts in [
            "2025-01-15 10:00:00",
            "2025-01-15T10:00:00",
            "2025-01-15T10:00:00+02:00",
            "not a date",
            "2025-13-40T99:00:00Z",
        ] {
            let mut message = valid_message();
            message.ts = bad_ts.into();
            assert!(
                message.validate().unwrap_err().contains("ts"),
                "ts {bad_ts:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_text_over_limit_rejected() {
        let mut message = valid_message();
        message.text = "x".repeat(consts::MAX_TEXT_LEN + 1);
        assert!(message.validate().unwrap_err().contains("text"));

        message.text = "x".repeat(consts::MAX_TEXT_LEN);
        assert!(message.validate().is_ok());
    }

    #[test]
    fn test_wire_names_deserialize() {
        let payload = r#"{
            "message_id": "m1",
            "from": "+1",
            "to": "+2",
            "ts": "2025-01-15T10:00:00Z",
            "text": "hi"
        }"#;
        let message: WebhookMessage = serde_json::from_str(payload).unwrap();
        assert_eq!(message.from_msisdn, "+1");
        assert_eq!(message.to_msisdn, "+2");
    }

    #[test]
    fn test_missing_text_fails_deserialization() {
        let payload = r#"{
            "message_id": "m1",
            "from": "+1",
            "to": "+2",
            "ts": "2025-01-15T10:00:00Z"
        }"#;
        assert!(serde_json::from_str::<WebhookMessage>(payload).is_err());
    }

    #[test]
    fn test_message_serializes_wire_names() {
        let message = Message {
            message_id: "m1".into(),
            from_msisdn: "+1".into(),
            to_msisdn: "+2".into(),
            ts: "2025-01-15T10:00:00Z".into(),
            text: "hi".into(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["from"], "+1");
        assert_eq!(json["to"], "+2");
        assert!(json.get("from_msisdn").is_none());
    }
}
