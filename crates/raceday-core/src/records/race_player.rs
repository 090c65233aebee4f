use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data::PlayerData;
use crate::entities::RaceEntity;
use crate::enums::RaceType;
use crate::errors::RecordParseError;
use crate::records::parse_timestamp;

/// Row in `racePlayerList.csv`: one entrant of a mechanical race, keyed by
/// the race id plus a two-digit position suffix.
///
/// Race fetches join these rows back through the race-id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RacePlayerRecord {
    pub id: String,
    pub position_number: u8,
    pub racer_number: u32,
    pub update_date: String,
}

impl RacePlayerRecord {
    /// Project the entrant list out of a mechanical race entity.
    ///
    /// Empty for horse racing and for mechanical races whose entrants are
    /// not published yet.
    #[must_use]
    pub fn from_race(entity: &RaceEntity) -> Vec<Self> {
        entity
            .players()
            .unwrap_or_default()
            .iter()
            .map(|player| Self {
                id: entity.id().player_key(player.position()),
                position_number: player.position().get(),
                racer_number: player.racer_number(),
                update_date: entity.update_date().to_rfc3339(),
            })
            .collect()
    }

    /// The typed entrant data of this row.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError`] if the position exceeds the discipline's
    /// field size, the registration number is zero, or the timestamp column
    /// is malformed.
    pub fn to_data(&self, race_type: RaceType) -> Result<PlayerData, RecordParseError> {
        parse_timestamp("updateDate", &self.update_date)?;
        Ok(PlayerData::new(
            race_type,
            self.position_number,
            self.racer_number,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RaceData;
    use crate::entities::RaceDetail;
    use crate::scalars::Stage;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn boat_final() -> RaceEntity {
        let data = RaceData::new(
            RaceType::BoatRace,
            "グランプリ",
            NaiveDate::from_ymd_opt(2026, 12, 21)
                .unwrap()
                .and_hms_opt(16, 30, 0)
                .unwrap(),
            "住之江",
            "SG",
            12,
        )
        .unwrap();
        let players = (1..=6)
            .map(|n| PlayerData::new(RaceType::BoatRace, n, 4000 + u32::from(n)).unwrap())
            .collect();
        let detail = RaceDetail::Mechanical {
            stage: Stage::new(RaceType::BoatRace, "優勝戦").unwrap(),
            players,
        };
        RaceEntity::create(data, detail, Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn rows_key_on_race_id_plus_position() {
        let race = boat_final();
        let rows = RacePlayerRecord::from_race(&race);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].id, "boat_race20261221121201");
        assert_eq!(rows[5].id, "boat_race20261221121206");
        assert!(rows.iter().all(|r| r.id.starts_with(race.id().as_str())));
    }

    #[test]
    fn typed_conversion_revalidates_position() {
        let row = RacePlayerRecord {
            id: "boat_race20261221121207".to_string(),
            position_number: 7,
            racer_number: 4007,
            update_date: "2026-12-01T00:00:00+00:00".to_string(),
        };
        // Position 7 does not exist in a six-boat field.
        assert!(row.to_data(RaceType::BoatRace).is_err());
        assert!(row.to_data(RaceType::Keirin).is_ok());
    }
}
