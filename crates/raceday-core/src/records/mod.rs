//! Flat record projections of the entities.
//!
//! Records are the only serialization boundary to storage: row-shaped,
//! string/primitive fields, fixed camelCase column names (the headers of the
//! stored CSV blobs). `from_entity` is total and lossless; `to_entity` is
//! its partial inverse and fails with [`RecordParseError`] when a column is
//! malformed or when discipline-conditional columns disagree with the
//! declared race type.
//!
//! Conditional columns are present but blank for disciplines they do not
//! apply to. Date columns keep fixed-width formats (`%Y-%m-%d`,
//! `%Y-%m-%d %H:%M:%S`), so a lexicographic sort on them is chronological.

mod held_day;
mod place;
mod race;
mod race_player;

pub use held_day::HeldDayRecord;
pub use place::PlaceRecord;
pub use race::RaceRecord;
pub use race_player::RacePlayerRecord;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::enums::RaceType;
use crate::errors::RecordParseError;

/// Column format for place dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Column format for race start times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn malformed(column: &'static str, value: &str, reason: impl ToString) -> RecordParseError {
    RecordParseError::Malformed {
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn parse_race_type(raw: &str) -> Result<RaceType, RecordParseError> {
    raw.parse()
        .map_err(|e| malformed("raceType", raw, format!("{e}")))
}

pub(crate) fn parse_date(column: &'static str, raw: &str) -> Result<NaiveDate, RecordParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| malformed(column, raw, e))
}

pub(crate) fn parse_datetime(
    column: &'static str,
    raw: &str,
) -> Result<NaiveDateTime, RecordParseError> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| malformed(column, raw, e))
}

/// Parse an RFC 3339 `updateDate` column.
pub(crate) fn parse_timestamp(
    column: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, RecordParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| malformed(column, raw, e))
}

/// The declared race type of a record, checked against the collection the
/// repository asked for.
pub(crate) fn expect_race_type(
    raw: &str,
    expected: RaceType,
) -> Result<RaceType, RecordParseError> {
    let race_type = parse_race_type(raw)?;
    if race_type == expected {
        Ok(race_type)
    } else {
        Err(RecordParseError::Inconsistent {
            race_type: expected,
            reason: format!("row declares race type {race_type}"),
        })
    }
}
