use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data::{HeldDayData, PlaceData};
use crate::entities::{PlaceDetail, PlaceEntity};
use crate::enums::RaceType;
use crate::errors::RecordParseError;
use crate::ids::PlaceId;
use crate::records::{expect_race_type, parse_date, parse_timestamp, DATE_FORMAT};
use crate::scalars::Grade;

/// Row projection of a [`PlaceEntity`] in `placeList.csv`.
///
/// `grade` is blank except for mechanical racing. Central held-day numbering
/// lives in the separate held-day blob and is joined back by id at fetch
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    pub race_type: String,
    pub date_time: String,
    pub location: String,
    pub grade: String,
    pub update_date: String,
}

impl PlaceRecord {
    /// Total, lossless projection of an entity.
    #[must_use]
    pub fn from_entity(entity: &PlaceEntity) -> Self {
        Self {
            id: entity.id().as_str().to_string(),
            race_type: entity.race_type().as_str().to_string(),
            date_time: entity.date().format(DATE_FORMAT).to_string(),
            location: entity.data().venue().as_str().to_string(),
            grade: entity.grade().map(|g| g.as_str().to_string()).unwrap_or_default(),
            update_date: entity.update_date().to_rfc3339(),
        }
    }

    /// The meet date, parsed for range filtering.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError::Malformed`] if the column is not a
    /// `%Y-%m-%d` date.
    pub fn date(&self) -> Result<NaiveDate, RecordParseError> {
        parse_date("dateTime", &self.date_time)
    }

    /// Partial inverse of [`PlaceRecord::from_entity`].
    ///
    /// `held_day` is the joined row from the held-day blob, required for
    /// central racing and forbidden otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError`] when a column is malformed or the
    /// conditional columns disagree with `expected`.
    pub fn to_entity(
        &self,
        expected: RaceType,
        held_day: Option<HeldDayData>,
    ) -> Result<PlaceEntity, RecordParseError> {
        let race_type = expect_race_type(&self.race_type, expected)?;
        let data = PlaceData::new(race_type, self.date()?, &self.location)?;

        let inconsistent = |reason: String| RecordParseError::Inconsistent { race_type, reason };
        let detail = match race_type {
            RaceType::CentralHorse => {
                if !self.grade.is_empty() {
                    return Err(inconsistent(format!(
                        "grade column '{}' on a central place row",
                        self.grade
                    )));
                }
                let held = held_day
                    .ok_or_else(|| inconsistent("no held-day row for central place".to_string()))?;
                PlaceDetail::HeldDay(held)
            }
            RaceType::Keirin | RaceType::AutoRace | RaceType::BoatRace => {
                if held_day.is_some() {
                    return Err(inconsistent("held-day row for a mechanical place".to_string()));
                }
                PlaceDetail::Graded(Grade::new(race_type, &self.grade)?)
            }
            RaceType::RegionalHorse | RaceType::OverseasHorse => {
                if held_day.is_some() {
                    return Err(inconsistent(format!("held-day row for {race_type}")));
                }
                if !self.grade.is_empty() {
                    return Err(inconsistent(format!(
                        "grade column '{}' for {race_type}",
                        self.grade
                    )));
                }
                PlaceDetail::Plain
            }
        };

        let id = PlaceId::parse(race_type, &self.id)?;
        let update_date = parse_timestamp("updateDate", &self.update_date)?;
        Ok(PlaceEntity::new(id, data, detail, update_date)?)
    }
}
