//! Error types for the Raceday entity model.
//!
//! Three tiers (see the repository crate for the I/O tier):
//! - [`CoreError`] — scalar validation and entity-construction failures.
//!   Always fatal to the single entity being built.
//! - [`RecordParseError`] — record-to-entity conversion failures during
//!   fetch. Recovered row-locally: the repository logs and drops the row.

use thiserror::Error;

use crate::enums::RaceType;

/// Errors raised while validating scalars or constructing entities.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A raw value failed vocabulary or range validation.
    #[error("invalid {field}: '{value}' (expected {expected})")]
    Validation {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Entity construction violated a discipline-conditional invariant.
    ///
    /// Carries the full attempted payload so the offending scrape result can
    /// be reconstructed from the log line alone.
    #[error("invalid {entity} entity for {race_type}: {reason}; payload: {payload}")]
    Entity {
        entity: &'static str,
        race_type: RaceType,
        reason: String,
        payload: String,
    },
}

/// Errors raised while converting a stored record back into an entity.
#[derive(Debug, Error)]
pub enum RecordParseError {
    /// A column could not be parsed into its typed form
    /// (unparsable date, unknown enum value, bad number).
    #[error("malformed column '{column}': '{value}' ({reason})")]
    Malformed {
        column: &'static str,
        value: String,
        reason: String,
    },

    /// Discipline-conditional columns disagree with the declared race type.
    #[error("record inconsistent with race type {race_type}: {reason}")]
    Inconsistent { race_type: RaceType, reason: String },

    /// The typed column values failed entity validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}
