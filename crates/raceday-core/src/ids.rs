//! Deterministic place and race identifiers.
//!
//! - Place: `{race_type}{yyyymmdd}{venue_code:02}` (e.g. `keirin2026010527`)
//! - Race: the place id plus a two-digit race number (e.g. `keirin202601052711`)
//!
//! Two observations of the same real-world meet or race always collide on
//! identifier, which is what the repository's upsert merges on. Ids are
//! minted by the producer from the domain data (`build`) or re-validated
//! from storage against the discipline-specific shape (`parse`); the
//! repository never generates ids itself.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use crate::enums::RaceType;
use crate::errors::CoreError;
use crate::scalars::{PositionNumber, RaceNumber, Venue};
use crate::vocab;

/// Identifier of one day's meet at one venue for one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Derive the identifier from domain data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the venue does not belong to the
    /// discipline's venue table.
    pub fn build(race_type: RaceType, date: NaiveDate, venue: &Venue) -> Result<Self, CoreError> {
        let code = vocab::venue_code(race_type, venue.as_str()).ok_or_else(|| {
            CoreError::Validation {
                field: "location",
                value: venue.as_str().to_string(),
                expected: format!("one of the {race_type} venues"),
            }
        })?;
        Ok(Self(format!(
            "{}{}{code:02}",
            race_type.as_str(),
            date.format("%Y%m%d")
        )))
    }

    /// Validate a stored identifier against the discipline's id shape.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the prefix, date, or venue code
    /// does not fit `race_type`.
    pub fn parse(race_type: RaceType, raw: &str) -> Result<Self, CoreError> {
        let (date_part, code_part) = split_digits(race_type, raw, "place id")?;
        check_date(date_part, raw, "place id")?;
        let code = check_code(race_type, code_part, raw, "place id")?;
        if vocab::venue_name(race_type, code).is_none() {
            return Err(shape_error(
                "place id",
                raw,
                format!("venue code {code:02} is not a {race_type} venue"),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one numbered contest within a meet.
///
/// Structurally the owning [`PlaceId`] with a race-number suffix; the
/// repository joins race rows to held-day rows through that prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RaceId(String);

impl RaceId {
    /// Derive the identifier from domain data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the venue does not belong to the
    /// discipline's venue table.
    pub fn build(
        race_type: RaceType,
        date: NaiveDate,
        venue: &Venue,
        number: RaceNumber,
    ) -> Result<Self, CoreError> {
        let place = PlaceId::build(race_type, date, venue)?;
        Ok(Self(format!("{place}{:02}", number.get())))
    }

    /// Validate a stored identifier against the discipline's id shape.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the prefix, date, venue code, or
    /// race number does not fit `race_type`.
    pub fn parse(race_type: RaceType, raw: &str) -> Result<Self, CoreError> {
        if raw.len() < 2 || !raw.is_char_boundary(raw.len() - 2) {
            return Err(shape_error("race id", raw, "too short".to_string()));
        }
        let (place_part, number_part) = raw.split_at(raw.len() - 2);
        PlaceId::parse(race_type, place_part)?;
        let number: u8 = number_part
            .parse()
            .map_err(|_| shape_error("race id", raw, "race number suffix is not numeric".to_string()))?;
        RaceNumber::new(number)?;
        Ok(Self(raw.to_string()))
    }

    /// The identifier of the place this race belongs to.
    #[must_use]
    pub fn place_id(&self) -> PlaceId {
        PlaceId(self.0[..self.0.len() - 2].to_string())
    }

    /// The row key of one entrant in the race-player blob.
    #[must_use]
    pub fn player_key(&self, position: PositionNumber) -> String {
        format!("{}{:02}", self.0, position.get())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn shape_error(field: &'static str, raw: &str, reason: String) -> CoreError {
    CoreError::Validation {
        field,
        value: raw.to_string(),
        expected: reason,
    }
}

/// Strip the discipline prefix and return the 8-digit date and 2-digit code
/// parts of a place id.
fn split_digits<'a>(
    race_type: RaceType,
    raw: &'a str,
    field: &'static str,
) -> Result<(&'a str, &'a str), CoreError> {
    let rest = raw.strip_prefix(race_type.as_str()).ok_or_else(|| {
        shape_error(
            field,
            raw,
            format!("prefix '{}' for {race_type}", race_type.as_str()),
        )
    })?;
    if rest.len() != 10 || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(shape_error(
            field,
            raw,
            "8-digit date and 2-digit venue code after the prefix".to_string(),
        ));
    }
    Ok(rest.split_at(8))
}

fn check_date(date_part: &str, raw: &str, field: &'static str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(date_part, "%Y%m%d")
        .map_err(|_| shape_error(field, raw, format!("'{date_part}' is not a calendar date")))
}

fn check_code(
    race_type: RaceType,
    code_part: &str,
    raw: &str,
    field: &'static str,
) -> Result<u8, CoreError> {
    code_part.parse().map_err(|_| {
        shape_error(
            field,
            raw,
            format!("2-digit {race_type} venue code"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn place_id_embeds_discipline_date_and_code() {
        let venue = Venue::new(RaceType::Keirin, "京王閣").unwrap();
        let id = PlaceId::build(RaceType::Keirin, date(2026, 1, 5), &venue).unwrap();
        assert_eq!(id.as_str(), "keirin2026010527");
    }

    #[test]
    fn same_observation_collides() {
        let venue = Venue::new(RaceType::BoatRace, "大村").unwrap();
        let a = PlaceId::build(RaceType::BoatRace, date(2026, 3, 1), &venue).unwrap();
        let b = PlaceId::build(RaceType::BoatRace, date(2026, 3, 1), &venue).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn race_id_is_place_id_plus_number() {
        let venue = Venue::new(RaceType::CentralHorse, "東京").unwrap();
        let number = RaceNumber::new(11).unwrap();
        let id = RaceId::build(RaceType::CentralHorse, date(2026, 5, 31), &venue, number).unwrap();
        assert_eq!(id.as_str(), "central_horse202605310511");
        assert_eq!(id.place_id().as_str(), "central_horse2026053105");
    }

    #[test]
    fn parse_accepts_built_ids() {
        let venue = Venue::new(RaceType::AutoRace, "飯塚").unwrap();
        let place = PlaceId::build(RaceType::AutoRace, date(2026, 12, 30), &venue).unwrap();
        assert!(PlaceId::parse(RaceType::AutoRace, place.as_str()).is_ok());

        let race =
            RaceId::build(RaceType::AutoRace, date(2026, 12, 30), &venue, RaceNumber::new(12).unwrap())
                .unwrap();
        assert!(RaceId::parse(RaceType::AutoRace, race.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_wrong_discipline_prefix() {
        assert!(PlaceId::parse(RaceType::BoatRace, "keirin2026010527").is_err());
    }

    #[test]
    fn parse_rejects_bad_date_and_code() {
        // 13th month.
        assert!(PlaceId::parse(RaceType::Keirin, "keirin2026130527").is_err());
        // Code 99 is not a velodrome.
        assert!(PlaceId::parse(RaceType::Keirin, "keirin2026010599").is_err());
        // Truncated.
        assert!(PlaceId::parse(RaceType::Keirin, "keirin20260105").is_err());
    }

    #[test]
    fn parse_rejects_bad_race_number() {
        // Race 13 exceeds the 1..=12 range.
        assert!(RaceId::parse(RaceType::Keirin, "keirin202601052713").is_err());
        assert!(RaceId::parse(RaceType::Keirin, "keirin202601052700").is_err());
    }

    #[test]
    fn player_key_appends_position() {
        let id = RaceId::parse(RaceType::BoatRace, "boat_race202603010112").unwrap();
        let pos = PositionNumber::new(RaceType::BoatRace, 6).unwrap();
        assert_eq!(id.player_key(pos), "boat_race20260301011206");
    }
}
