//! Storage-backed race repository.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use raceday_core::data::PlayerData;
use raceday_core::entities::RaceEntity;
use raceday_core::enums::RaceType;
use raceday_core::records::{RacePlayerRecord, RaceRecord};
use raceday_core::responses::RegisterResult;

use crate::codec;
use crate::error::StoreError;
use crate::gateway::CsvBlobStore;
use crate::repository::place::held_day_map;
use crate::repository::{
    place_prefix, upsert_by_id, RaceFilter, RaceRepository, FILE_HELD_DAY_LIST, FILE_RACE_LIST,
    FILE_RACE_PLAYER_LIST,
};

/// Race repository over the CSV blob store.
///
/// Central race rows are joined to the held-day blob (written by place
/// registration) through the place-id prefix of the race id; a race row with
/// no matching held-day row cannot be rebuilt into a valid entity and is
/// dropped. Mechanical race rows are joined to the race-player blob, which
/// this repository maintains.
pub struct StorageRaceRepository {
    store: CsvBlobStore,
}

impl StorageRaceRepository {
    #[must_use]
    pub const fn new(store: CsvBlobStore) -> Self {
        Self { store }
    }
}

/// Parse race-player rows into a by-race-id join map, skipping bad rows.
fn player_map(text: &str, race_type: RaceType) -> HashMap<String, Vec<PlayerData>> {
    let rows: Vec<RacePlayerRecord> = codec::decode_rows(text, FILE_RACE_PLAYER_LIST);
    let mut map: HashMap<String, Vec<PlayerData>> = HashMap::new();
    for row in rows {
        let Some(race_id) = place_prefix(&row.id) else {
            tracing::warn!(id = %row.id, "skipping race-player row with truncated id");
            continue;
        };
        match row.to_data(race_type) {
            Ok(player) => map.entry(race_id.to_string()).or_default().push(player),
            Err(error) => {
                tracing::warn!(id = %row.id, %error, "skipping race-player row");
            }
        }
    }
    // Rebuilt entrant lists are position-ordered regardless of row order.
    for players in map.values_mut() {
        players.sort_by_key(|p| p.position());
    }
    map
}

#[async_trait]
impl RaceRepository for StorageRaceRepository {
    async fn fetch_race_entity_list(
        &self,
        filter: &RaceFilter,
    ) -> Result<Vec<RaceEntity>, StoreError> {
        let folder = filter.race_type.as_str();
        let (race_text, join_text) = match filter.race_type {
            RaceType::CentralHorse => tokio::try_join!(
                self.store.fetch_csv(folder, FILE_RACE_LIST),
                self.store.fetch_csv(folder, FILE_HELD_DAY_LIST),
            )?,
            rt if rt.is_mechanical() => tokio::try_join!(
                self.store.fetch_csv(folder, FILE_RACE_LIST),
                self.store.fetch_csv(folder, FILE_RACE_PLAYER_LIST),
            )?,
            _ => (
                self.store.fetch_csv(folder, FILE_RACE_LIST).await?,
                String::new(),
            ),
        };

        let records: Vec<RaceRecord> = codec::decode_rows(&race_text, FILE_RACE_LIST);
        let held_days = if filter.race_type == RaceType::CentralHorse {
            held_day_map(&join_text)
        } else {
            HashMap::new()
        };
        let mut players_by_race = if filter.race_type.is_mechanical() {
            player_map(&join_text, filter.race_type)
        } else {
            HashMap::new()
        };

        let place_restriction: Option<HashSet<&str>> = if filter.places.is_empty() {
            None
        } else {
            Some(filter.places.iter().map(|p| p.id().as_str()).collect())
        };

        let mut entities = Vec::new();
        for record in records {
            let start_at = match record.start_at() {
                Ok(start_at) => start_at,
                Err(error) => {
                    tracing::warn!(id = %record.id, %error, "skipping race row");
                    continue;
                }
            };
            let date = start_at.date();
            if date < filter.start_date || date > filter.finish_date {
                continue;
            }

            let prefix = place_prefix(&record.id).map(str::to_string);
            if let Some(restriction) = &place_restriction {
                if !prefix
                    .as_deref()
                    .is_some_and(|p| restriction.contains(p))
                {
                    continue;
                }
            }

            let held_day = prefix.as_deref().and_then(|p| held_days.get(p)).copied();
            let players = players_by_race
                .remove(record.id.as_str())
                .unwrap_or_default();
            match record.to_entity(filter.race_type, held_day, players) {
                Ok(entity) => entities.push(entity),
                Err(error) => {
                    tracing::warn!(id = %record.id, %error, "dropping race row");
                }
            }
        }
        tracing::debug!(
            race_type = %filter.race_type,
            count = entities.len(),
            "fetched race entities"
        );
        Ok(entities)
    }

    async fn register_race_entity_list(
        &self,
        race_type: RaceType,
        entities: Vec<RaceEntity>,
    ) -> Result<RegisterResult<RaceEntity>, StoreError> {
        let folder = race_type.as_str();

        let existing_text = self.store.fetch_csv(folder, FILE_RACE_LIST).await?;
        let mut records: Vec<RaceRecord> = codec::decode_rows(&existing_text, FILE_RACE_LIST);

        let mut success = Vec::new();
        let mut failure = Vec::new();
        let mut incoming = Vec::new();
        for entity in entities {
            if entity.race_type() == race_type {
                incoming.push(RaceRecord::from_entity(&entity));
                success.push(entity);
            } else {
                tracing::warn!(
                    id = %entity.id(),
                    expected = %race_type,
                    actual = %entity.race_type(),
                    "rejecting race entity of foreign race type"
                );
                failure.push(entity);
            }
        }

        if incoming.is_empty() {
            return Ok(RegisterResult::from_outcome(success, failure));
        }

        upsert_by_id(&mut records, incoming, |r| &r.id);
        // Fixed-width date columns sort lexicographically in date order.
        records.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        let body = codec::encode_rows(&records)?;
        self.store.upload_csv(body, folder, FILE_RACE_LIST).await?;

        if race_type.is_mechanical() {
            let player_text = self.store.fetch_csv(folder, FILE_RACE_PLAYER_LIST).await?;
            let mut player_rows: Vec<RacePlayerRecord> =
                codec::decode_rows(&player_text, FILE_RACE_PLAYER_LIST);

            // Replacing a race replaces its whole entrant set; a per-row
            // upsert would leak stale positions when the field shrinks.
            let replaced: HashSet<&str> = success.iter().map(|e| e.id().as_str()).collect();
            player_rows.retain(|row| {
                !place_prefix(&row.id).is_some_and(|race_id| replaced.contains(race_id))
            });
            player_rows.extend(success.iter().flat_map(RacePlayerRecord::from_race));
            // Ids embed the date, so id order is date order.
            player_rows.sort_by(|a, b| b.id.cmp(&a.id));
            let player_body = codec::encode_rows(&player_rows)?;
            self.store
                .upload_csv(player_body, folder, FILE_RACE_PLAYER_LIST)
                .await?;
        }

        tracing::debug!(
            race_type = %race_type,
            registered = success.len(),
            failed = failure.len(),
            "registered race entities"
        );
        Ok(RegisterResult::from_outcome(success, failure))
    }
}
