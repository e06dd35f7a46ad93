//! Outcome classification.
//!
//! The verifier reports a [`Signal`] (the 1 / 0 / negative convention of
//! verify routines, translated once); this module turns it into the
//! [`VerificationOutcome`] handed back to hosts.

use serde::Serialize;

use crate::error::PendingError;

/// Message used when a failure carries no error record.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Result of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Signature cryptographically verified.
    Valid,

    /// Signature rejected, or it decoded to no usable bytes.
    Invalid,

    /// The verification machinery failed.
    Error { message: String, code: Option<u32> },
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Tri-state result of a pipeline stage.
#[derive(Debug)]
pub enum Signal {
    Verified,
    Rejected,
    Failed(PendingError),
}

/// Map a stage signal onto the final outcome.
///
/// A failure drains its pending error exactly once; without a record the
/// outcome is a generic error with no code.
pub fn classify(signal: Signal) -> VerificationOutcome {
    match signal {
        Signal::Verified => VerificationOutcome::Valid,
        Signal::Rejected => VerificationOutcome::Invalid,
        Signal::Failed(mut pending) => match pending.take() {
            Some(err) => {
                tracing::debug!(code = ?err.code(), reason = %err.reason, "verification error");
                VerificationOutcome::Error {
                    code: err.code(),
                    message: err.reason,
                }
            }
            None => {
                tracing::debug!("verification error without error record");
                VerificationOutcome::Error {
                    message: UNKNOWN_ERROR.to_string(),
                    code: None,
                }
            }
        },
    }
}
