//! Ingest pipeline for signed webhook payloads
//!
//! The pipeline is a small state machine, terminal at the first applicable
//! state: signature verification runs strictly before any parsing, payload
//! validation before any storage access, and only a valid payload reaches
//! the idempotent insert. Storage failures are the only error path; every
//! rejection is a regular outcome.

use super::security;
use crate::{
    models,
    repo::{ImplMessageRepo, InsertOutcome},
};

/// Terminal state of one ingest call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// New `message_id`, one row appended.
    Created { message_id: String },
    /// Known `message_id`, nothing written. Externally indistinguishable
    /// from [`IngestOutcome::Created`].
    Duplicate { message_id: String },
    /// Missing header or digest mismatch. Carries no parsing detail.
    InvalidSignature,
    /// Signature passed but the payload failed validation; `detail` names
    /// the offending field.
    Rejected { detail: String },
}

impl IngestOutcome {
    /// Label recorded under `webhook_requests_total{result=...}`.
    pub fn metric_label(&self) -> &'static str {
        match self {
            IngestOutcome::Created { .. } => "created",
            IngestOutcome::Duplicate { .. } => "duplicate",
            IngestOutcome::InvalidSignature => "invalid_signature",
            IngestOutcome::Rejected { .. } => "validation_error",
        }
    }
}

/// Runs the pipeline over the raw request body.
///
/// `raw_body` must be the exact bytes as received on the wire; the signature
/// is computed over them before any JSON decoding.
///
/// # Errors
/// Returns an error only when the storage layer fails; signature and
/// validation failures are [`IngestOutcome`] variants.
pub async fn ingest(
    raw_body: &[u8],
    signature_header: Option<&str>,
    secret: &str,
    repo: &ImplMessageRepo,
) -> anyhow::Result<IngestOutcome> {
    let Some(signature) = signature_header else {
        return Ok(IngestOutcome::InvalidSignature);
    };
    if !security::verify_signature(signature, raw_body, secret) {
        return Ok(IngestOutcome::InvalidSignature);
    }

    let message: models::message::WebhookMessage = match serde_json::from_slice(raw_body) {
        Ok(message) => message,
        Err(err) => {
            return Ok(IngestOutcome::Rejected {
                detail: format!("invalid payload: {err}"),
            });
        }
    };
    if let Err(detail) = message.validate() {
        return Ok(IngestOutcome::Rejected { detail });
    }

    match repo.insert_message(&message).await? {
        InsertOutcome::Inserted => Ok(IngestOutcome::Created {
            message_id: message.message_id,
        }),
        InsertOutcome::AlreadyExists => Ok(IngestOutcome::Duplicate {
            message_id: message.message_id,
        }),
    }
}
