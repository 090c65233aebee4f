//! Validated scalar newtypes.
//!
//! Each constructor takes the raw value plus the [`RaceType`] whose
//! vocabulary applies, and either returns the narrowed type or a
//! [`CoreError::Validation`] naming the offending value and the expected
//! vocabulary or range. Validation is pure; nothing here touches I/O.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use crate::enums::RaceType;
use crate::errors::CoreError;
use crate::vocab;

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// A course name, validated against the discipline's venue table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Venue(String);

impl Venue {
    /// Validate `raw` against the venue vocabulary of `race_type`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is not in the table.
    pub fn new(race_type: RaceType, raw: &str) -> Result<Self, CoreError> {
        if vocab::venue_code(race_type, raw).is_some() {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::Validation {
                field: "location",
                value: raw.to_string(),
                expected: format!("one of the {race_type} venues"),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// A race or meet grade, validated against the discipline's grade vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Grade(String);

impl Grade {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the grade is not in the
    /// discipline's vocabulary.
    pub fn new(race_type: RaceType, raw: &str) -> Result<Self, CoreError> {
        if vocab::grades(race_type).contains(&raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::Validation {
                field: "grade",
                value: raw.to_string(),
                expected: format!("one of the {race_type} grades"),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A round classification for mechanical racing (final, semifinal, heat...).
///
/// Horse racing has an empty stage vocabulary, so construction always fails
/// for those disciplines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Stage(String);

impl Stage {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the stage is not in the
    /// discipline's vocabulary (always, for horse racing).
    pub fn new(race_type: RaceType, raw: &str) -> Result<Self, CoreError> {
        if vocab::stages(race_type).contains(&raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::Validation {
                field: "stage",
                value: raw.to_string(),
                expected: format!("one of the {race_type} stages"),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RaceNumber
// ---------------------------------------------------------------------------

/// A race number within a meet day, 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RaceNumber(u8);

impl RaceNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `n` is outside 1..=12.
    pub fn new(n: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(CoreError::Validation {
                field: "number",
                value: n.to_string(),
                expected: format!("{}..={}", Self::MIN, Self::MAX),
            })
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RaceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PositionNumber
// ---------------------------------------------------------------------------

/// An entrant's position number in a mechanical race.
///
/// The upper bound is per-discipline: 9 for keirin, 8 for auto race, 6 for
/// boat race. Horse racing keeps no player list, so construction fails there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct PositionNumber(u8);

impl PositionNumber {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the discipline keeps no player
    /// list or `n` exceeds its field size.
    pub fn new(race_type: RaceType, n: u8) -> Result<Self, CoreError> {
        let Some(max) = race_type.max_positions() else {
            return Err(CoreError::Validation {
                field: "positionNumber",
                value: n.to_string(),
                expected: format!("no position numbers for {race_type}"),
            });
        };
        if (1..=max).contains(&n) {
            Ok(Self(n))
        } else {
            Err(CoreError::Validation {
                field: "positionNumber",
                value: n.to_string(),
                expected: format!("1..={max} for {race_type}"),
            })
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PositionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn venue_accepts_vocabulary_member() {
        let venue = Venue::new(RaceType::CentralHorse, "中山").unwrap();
        assert_eq!(venue.as_str(), "中山");
    }

    #[test]
    fn venue_rejects_foreign_discipline() {
        // A boat race stadium is not a JRA course.
        let err = Venue::new(RaceType::CentralHorse, "大村").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("大村"), "error should name the value: {msg}");
        assert!(msg.contains("central_horse"), "error should name the vocabulary: {msg}");
    }

    #[rstest]
    #[case(RaceType::CentralHorse, "GⅠ")]
    #[case(RaceType::Keirin, "FⅡ")]
    #[case(RaceType::BoatRace, "SG")]
    #[case(RaceType::RegionalHorse, "JpnⅠ")]
    fn grade_accepts_vocabulary_member(#[case] rt: RaceType, #[case] raw: &str) {
        assert_eq!(Grade::new(rt, raw).unwrap().as_str(), raw);
    }

    #[test]
    fn grade_vocabulary_is_discipline_scoped() {
        // GP is a keirin grade, not a boat race grade.
        assert!(Grade::new(RaceType::Keirin, "GP").is_ok());
        assert!(Grade::new(RaceType::BoatRace, "GP").is_err());
    }

    #[test]
    fn stage_rejects_horse_racing() {
        assert!(Stage::new(RaceType::CentralHorse, "優勝戦").is_err());
        assert!(Stage::new(RaceType::BoatRace, "優勝戦").is_ok());
    }

    #[test]
    fn race_number_bounds_inclusive() {
        assert!(RaceNumber::new(0).is_err());
        assert_eq!(RaceNumber::new(1).unwrap().get(), 1);
        assert_eq!(RaceNumber::new(12).unwrap().get(), 12);
        assert!(RaceNumber::new(13).is_err());
    }

    #[rstest]
    #[case(RaceType::Keirin, 9, true)]
    #[case(RaceType::Keirin, 10, false)]
    #[case(RaceType::AutoRace, 8, true)]
    #[case(RaceType::BoatRace, 7, false)]
    #[case(RaceType::CentralHorse, 1, false)]
    fn position_number_caps(#[case] rt: RaceType, #[case] n: u8, #[case] ok: bool) {
        assert_eq!(PositionNumber::new(rt, n).is_ok(), ok);
    }
}
