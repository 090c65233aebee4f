use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data::{ConditionData, HeldDayData, PlayerData, RaceData};
use crate::entities::{RaceDetail, RaceEntity};
use crate::enums::RaceType;
use crate::errors::RecordParseError;
use crate::ids::RaceId;
use crate::records::{expect_race_type, parse_datetime, parse_timestamp, DATETIME_FORMAT};
use crate::scalars::Stage;

/// Row projection of a [`RaceEntity`] in `raceList.csv`.
///
/// `stage` is blank for horse racing; `surface`/`distance` are blank for
/// mechanical racing. Held-day numbering and the entrant list live in their
/// own blobs and are joined back by id prefix at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub id: String,
    pub race_type: String,
    pub name: String,
    pub stage: String,
    pub date_time: String,
    pub location: String,
    pub grade: String,
    pub number: u8,
    pub surface: String,
    pub distance: Option<u32>,
    pub update_date: String,
}

impl RaceRecord {
    /// Total, lossless projection of an entity.
    #[must_use]
    pub fn from_entity(entity: &RaceEntity) -> Self {
        Self {
            id: entity.id().as_str().to_string(),
            race_type: entity.race_type().as_str().to_string(),
            name: entity.data().name().to_string(),
            stage: entity.stage().map(|s| s.as_str().to_string()).unwrap_or_default(),
            date_time: entity.start_at().format(DATETIME_FORMAT).to_string(),
            location: entity.data().venue().as_str().to_string(),
            grade: entity.data().grade().as_str().to_string(),
            number: entity.data().number().get(),
            surface: entity
                .condition()
                .map(|c| c.surface().as_str().to_string())
                .unwrap_or_default(),
            distance: entity.condition().map(|c| c.distance()),
            update_date: entity.update_date().to_rfc3339(),
        }
    }

    /// The race start time, parsed for range filtering.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError::Malformed`] if the column is not a
    /// `%Y-%m-%d %H:%M:%S` timestamp.
    pub fn start_at(&self) -> Result<NaiveDateTime, RecordParseError> {
        parse_datetime("dateTime", &self.date_time)
    }

    /// Partial inverse of [`RaceRecord::from_entity`].
    ///
    /// `held_day` is the joined row from the held-day blob (required for
    /// central racing, forbidden otherwise); `players` are the joined rows
    /// from the race-player blob (mechanical racing only, may be empty).
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError`] when a column is malformed or the
    /// conditional columns disagree with `expected`.
    pub fn to_entity(
        &self,
        expected: RaceType,
        held_day: Option<HeldDayData>,
        players: Vec<PlayerData>,
    ) -> Result<RaceEntity, RecordParseError> {
        let race_type = expect_race_type(&self.race_type, expected)?;
        let data = RaceData::new(
            race_type,
            &self.name,
            self.start_at()?,
            &self.location,
            &self.grade,
            self.number,
        )?;

        let inconsistent = |reason: String| RecordParseError::Inconsistent { race_type, reason };
        let detail = if race_type.is_thoroughbred() {
            if !self.stage.is_empty() {
                return Err(inconsistent(format!(
                    "stage column '{}' on a {race_type} row",
                    self.stage
                )));
            }
            if !players.is_empty() {
                return Err(inconsistent(format!("player rows for {race_type}")));
            }
            let condition = self.condition()?;
            match race_type {
                RaceType::CentralHorse => {
                    let held = held_day.ok_or_else(|| {
                        inconsistent("no held-day row for central race".to_string())
                    })?;
                    RaceDetail::Central {
                        held_day: held,
                        condition,
                    }
                }
                _ => {
                    if held_day.is_some() {
                        return Err(inconsistent(format!("held-day row for {race_type}")));
                    }
                    RaceDetail::Flat { condition }
                }
            }
        } else {
            if held_day.is_some() {
                return Err(inconsistent("held-day row for a mechanical race".to_string()));
            }
            if !self.surface.is_empty() || self.distance.is_some() {
                return Err(inconsistent(
                    "surface/distance columns on a mechanical row".to_string(),
                ));
            }
            RaceDetail::Mechanical {
                stage: Stage::new(race_type, &self.stage)?,
                players,
            }
        };

        let id = RaceId::parse(race_type, &self.id)?;
        let update_date = parse_timestamp("updateDate", &self.update_date)?;
        Ok(RaceEntity::new(id, data, detail, update_date)?)
    }

    fn condition(&self) -> Result<ConditionData, RecordParseError> {
        let surface = self.surface.parse().map_err(|_| RecordParseError::Malformed {
            column: "surface",
            value: self.surface.clone(),
            reason: "expected turf, dirt, or jump".to_string(),
        })?;
        let distance = self.distance.ok_or(RecordParseError::Malformed {
            column: "distance",
            value: String::new(),
            reason: "blank on a thoroughbred row".to_string(),
        })?;
        Ok(ConditionData::new(surface, distance)?)
    }
}
