//! Immutable domain data objects.
//!
//! These describe *what was observed* — a meet day, a race, a held-day
//! numbering — independent of identity and storage. Fields are private and
//! only reachable through the validating constructors, so an instance in
//! hand is always internally consistent with its discipline. Copies go back
//! through the constructors (`with_*`), never through field mutation.

use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::Serialize;

use crate::enums::{RaceType, Surface};
use crate::errors::CoreError;
use crate::scalars::{Grade, PositionNumber, RaceNumber, Venue};

// ---------------------------------------------------------------------------
// PlaceData
// ---------------------------------------------------------------------------

/// One day's meet at one venue for one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PlaceData {
    race_type: RaceType,
    date: NaiveDate,
    venue: Venue,
}

impl PlaceData {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the venue is not in the
    /// discipline's table.
    pub fn new(race_type: RaceType, date: NaiveDate, venue: &str) -> Result<Self, CoreError> {
        Ok(Self {
            race_type,
            date,
            venue: Venue::new(race_type, venue)?,
        })
    }

    #[must_use]
    pub const fn race_type(&self) -> RaceType {
        self.race_type
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Copy with a different date.
    #[must_use]
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self { date, ..self.clone() }
    }

    /// Copy with a different venue, re-validated against the discipline.
    ///
    /// # Errors
    ///
    /// Fails exactly like a fresh [`PlaceData::new`] with the same venue.
    pub fn with_venue(&self, venue: &str) -> Result<Self, CoreError> {
        Self::new(self.race_type, self.date, venue)
    }
}

// ---------------------------------------------------------------------------
// RaceData
// ---------------------------------------------------------------------------

/// One numbered contest within a meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RaceData {
    race_type: RaceType,
    name: String,
    start_at: NaiveDateTime,
    venue: Venue,
    grade: Grade,
    number: RaceNumber,
}

impl RaceData {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is empty, or the venue,
    /// grade, or race number fails its vocabulary/range check.
    pub fn new(
        race_type: RaceType,
        name: &str,
        start_at: NaiveDateTime,
        venue: &str,
        grade: &str,
        number: u8,
    ) -> Result<Self, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "name",
                value: name.to_string(),
                expected: "a non-empty race name".to_string(),
            });
        }
        Ok(Self {
            race_type,
            name: name.to_string(),
            start_at,
            venue: Venue::new(race_type, venue)?,
            grade: Grade::new(race_type, grade)?,
            number: RaceNumber::new(number)?,
        })
    }

    #[must_use]
    pub const fn race_type(&self) -> RaceType {
        self.race_type
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn start_at(&self) -> NaiveDateTime {
        self.start_at
    }

    #[must_use]
    pub const fn venue(&self) -> &Venue {
        &self.venue
    }

    #[must_use]
    pub const fn grade(&self) -> &Grade {
        &self.grade
    }

    #[must_use]
    pub const fn number(&self) -> RaceNumber {
        self.number
    }

    /// Copy with a different grade, re-validated against the discipline.
    ///
    /// # Errors
    ///
    /// Fails exactly like a fresh [`RaceData::new`] with the same grade.
    pub fn with_grade(&self, grade: &str) -> Result<Self, CoreError> {
        Ok(Self {
            grade: Grade::new(self.race_type, grade)?,
            ..self.clone()
        })
    }

    /// Copy with a different start time.
    #[must_use]
    pub fn with_start_at(&self, start_at: NaiveDateTime) -> Self {
        Self { start_at, ..self.clone() }
    }
}

// ---------------------------------------------------------------------------
// HeldDayData
// ---------------------------------------------------------------------------

/// Central-racing meet numbering: which numbered meet of the season, and
/// which day within that meet. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct HeldDayData {
    held_times: u32,
    held_day_times: u32,
}

impl HeldDayData {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if either counter is zero.
    pub fn new(held_times: u32, held_day_times: u32) -> Result<Self, CoreError> {
        if held_times == 0 {
            return Err(CoreError::Validation {
                field: "heldTimes",
                value: held_times.to_string(),
                expected: "a positive meet number".to_string(),
            });
        }
        if held_day_times == 0 {
            return Err(CoreError::Validation {
                field: "heldDayTimes",
                value: held_day_times.to_string(),
                expected: "a positive day-within-meet number".to_string(),
            });
        }
        Ok(Self {
            held_times,
            held_day_times,
        })
    }

    #[must_use]
    pub const fn held_times(self) -> u32 {
        self.held_times
    }

    #[must_use]
    pub const fn held_day_times(self) -> u32 {
        self.held_day_times
    }
}

// ---------------------------------------------------------------------------
// ConditionData
// ---------------------------------------------------------------------------

/// Course condition of a thoroughbred race: surface and distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ConditionData {
    surface: Surface,
    distance: u32,
}

impl ConditionData {
    pub const MIN_DISTANCE: u32 = 800;
    pub const MAX_DISTANCE: u32 = 5000;

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the distance is outside
    /// 800..=5000 metres.
    pub fn new(surface: Surface, distance: u32) -> Result<Self, CoreError> {
        if (Self::MIN_DISTANCE..=Self::MAX_DISTANCE).contains(&distance) {
            Ok(Self { surface, distance })
        } else {
            Err(CoreError::Validation {
                field: "distance",
                value: distance.to_string(),
                expected: format!("{}..={} metres", Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            })
        }
    }

    #[must_use]
    pub const fn surface(self) -> Surface {
        self.surface
    }

    #[must_use]
    pub const fn distance(self) -> u32 {
        self.distance
    }
}

// ---------------------------------------------------------------------------
// PlayerData
// ---------------------------------------------------------------------------

/// One entrant in a mechanical race: position number plus the racer's
/// registration number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PlayerData {
    position: PositionNumber,
    racer_number: u32,
}

impl PlayerData {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the position exceeds the
    /// discipline's field size or the registration number is zero.
    pub fn new(race_type: RaceType, position: u8, racer_number: u32) -> Result<Self, CoreError> {
        if racer_number == 0 {
            return Err(CoreError::Validation {
                field: "racerNumber",
                value: racer_number.to_string(),
                expected: "a positive registration number".to_string(),
            });
        }
        Ok(Self {
            position: PositionNumber::new(race_type, position)?,
            racer_number,
        })
    }

    #[must_use]
    pub const fn position(self) -> PositionNumber {
        self.position
    }

    #[must_use]
    pub const fn racer_number(self) -> u32 {
        self.racer_number
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
