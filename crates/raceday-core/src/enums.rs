//! Discipline and surface enums for Raceday.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `RaceType` is the closed set of supported disciplines; it keys every
//! conditional invariant and vocabulary lookup in the system.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// RaceType
// ---------------------------------------------------------------------------

/// A racing discipline.
///
/// Determines which optional entity attributes are legal (held-day numbering
/// for central horse racing, meet grade for the mechanical disciplines) and
/// which venue/grade/stage vocabularies apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RaceType {
    /// JRA central horse racing.
    CentralHorse,
    /// NAR regional horse racing.
    RegionalHorse,
    /// Overseas horse racing.
    OverseasHorse,
    Keirin,
    AutoRace,
    BoatRace,
}

impl RaceType {
    /// Every discipline, in storage-folder order.
    pub const ALL: [Self; 6] = [
        Self::CentralHorse,
        Self::RegionalHorse,
        Self::OverseasHorse,
        Self::Keirin,
        Self::AutoRace,
        Self::BoatRace,
    ];

    /// The string representation used in identifiers, blob folders, and CSV.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CentralHorse => "central_horse",
            Self::RegionalHorse => "regional_horse",
            Self::OverseasHorse => "overseas_horse",
            Self::Keirin => "keirin",
            Self::AutoRace => "auto_race",
            Self::BoatRace => "boat_race",
        }
    }

    /// Whether this is one of the three horse-racing disciplines.
    #[must_use]
    pub const fn is_thoroughbred(self) -> bool {
        matches!(
            self,
            Self::CentralHorse | Self::RegionalHorse | Self::OverseasHorse
        )
    }

    /// Whether this is one of the mechanical racing disciplines
    /// (keirin, auto race, boat race).
    #[must_use]
    pub const fn is_mechanical(self) -> bool {
        matches!(self, Self::Keirin | Self::AutoRace | Self::BoatRace)
    }

    /// Maximum entrant position number for mechanical disciplines.
    ///
    /// `None` for horse racing, where no player list is kept.
    #[must_use]
    pub const fn max_positions(self) -> Option<u8> {
        match self {
            Self::Keirin => Some(9),
            Self::AutoRace => Some(8),
            Self::BoatRace => Some(6),
            Self::CentralHorse | Self::RegionalHorse | Self::OverseasHorse => None,
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| CoreError::Validation {
                field: "raceType",
                value: s.to_string(),
                expected: "one of the six supported disciplines".to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Course surface of a thoroughbred race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Turf,
    Dirt,
    Jump,
}

impl Surface {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Turf => "turf",
            Self::Dirt => "dirt",
            Self::Jump => "jump",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turf" => Ok(Self::Turf),
            "dirt" => Ok(Self::Dirt),
            "jump" => Ok(Self::Jump),
            other => Err(CoreError::Validation {
                field: "surface",
                value: other.to_string(),
                expected: "turf, dirt, or jump".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
