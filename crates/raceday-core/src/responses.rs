//! Result envelopes returned by the register operations.
//!
//! Callers must inspect `failure_data` even when registration partially
//! succeeded: a partial failure still writes the convertible rows.

use schemars::JsonSchema;
use serde::Serialize;

/// Full success.
pub const CODE_OK: u16 = 200;
/// Total or partial failure; the message distinguishes the two.
pub const CODE_FAILED: u16 = 500;

/// Outcome of a `register` call.
///
/// `success_data` holds the input entities whose rows were included in the
/// write; `failure_data` holds the entities that failed record conversion
/// and were excluded.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RegisterResult<T> {
    pub code: u16,
    pub message: String,
    pub success_data: Vec<T>,
    pub failure_data: Vec<T>,
}

impl<T> RegisterResult<T> {
    /// Build the envelope from the conversion outcome.
    #[must_use]
    pub fn from_outcome(success_data: Vec<T>, failure_data: Vec<T>) -> Self {
        let (code, message) = if failure_data.is_empty() {
            (CODE_OK, format!("registered {} rows", success_data.len()))
        } else if success_data.is_empty() {
            (
                CODE_FAILED,
                format!("all {} rows failed conversion", failure_data.len()),
            )
        } else {
            (
                CODE_FAILED,
                format!(
                    "partial failure: registered {} rows, {} failed conversion",
                    success_data.len(),
                    failure_data.len()
                ),
            )
        };
        Self {
            code,
            message,
            success_data,
            failure_data,
        }
    }

    /// Whether every input entity was registered.
    #[must_use]
    pub fn is_full_success(&self) -> bool {
        self.code == CODE_OK && self.failure_data.is_empty()
    }
}
