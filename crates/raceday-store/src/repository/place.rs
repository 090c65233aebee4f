//! Storage-backed place repository.

use std::collections::HashMap;

use async_trait::async_trait;

use raceday_core::data::HeldDayData;
use raceday_core::entities::PlaceEntity;
use raceday_core::enums::RaceType;
use raceday_core::records::{HeldDayRecord, PlaceRecord};
use raceday_core::responses::RegisterResult;

use crate::codec;
use crate::error::StoreError;
use crate::gateway::CsvBlobStore;
use crate::repository::{
    upsert_by_id, PlaceFilter, PlaceRepository, FILE_HELD_DAY_LIST, FILE_PLACE_LIST,
};

/// Place repository over the CSV blob store.
///
/// One folder per race type; central racing additionally keeps the held-day
/// blob, which is written here (the meet numbering is a property of the
/// place) and joined back on every fetch.
pub struct StoragePlaceRepository {
    store: CsvBlobStore,
}

impl StoragePlaceRepository {
    #[must_use]
    pub const fn new(store: CsvBlobStore) -> Self {
        Self { store }
    }
}

/// Parse held-day rows into a by-place-id join map, skipping bad rows.
pub(crate) fn held_day_map(text: &str) -> HashMap<String, HeldDayData> {
    let rows: Vec<HeldDayRecord> = codec::decode_rows(text, FILE_HELD_DAY_LIST);
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        match row.to_data() {
            Ok(data) => {
                map.insert(row.id, data);
            }
            Err(error) => {
                tracing::warn!(id = %row.id, %error, "skipping held-day row");
            }
        }
    }
    map
}

#[async_trait]
impl PlaceRepository for StoragePlaceRepository {
    async fn fetch_place_entity_list(
        &self,
        filter: &PlaceFilter,
    ) -> Result<Vec<PlaceEntity>, StoreError> {
        let folder = filter.race_type.as_str();
        let (place_text, held_text) = if filter.race_type == RaceType::CentralHorse {
            tokio::try_join!(
                self.store.fetch_csv(folder, FILE_PLACE_LIST),
                self.store.fetch_csv(folder, FILE_HELD_DAY_LIST),
            )?
        } else {
            (
                self.store.fetch_csv(folder, FILE_PLACE_LIST).await?,
                String::new(),
            )
        };

        let records: Vec<PlaceRecord> = codec::decode_rows(&place_text, FILE_PLACE_LIST);
        let held_days = held_day_map(&held_text);

        let mut entities = Vec::new();
        for record in records {
            let date = match record.date() {
                Ok(date) => date,
                Err(error) => {
                    tracing::warn!(id = %record.id, %error, "skipping place row");
                    continue;
                }
            };
            if date < filter.start_date || date > filter.finish_date {
                continue;
            }
            let held_day = held_days.get(&record.id).copied();
            match record.to_entity(filter.race_type, held_day) {
                Ok(entity) => entities.push(entity),
                Err(error) => {
                    tracing::warn!(id = %record.id, %error, "dropping place row");
                }
            }
        }
        tracing::debug!(
            race_type = %filter.race_type,
            count = entities.len(),
            "fetched place entities"
        );
        Ok(entities)
    }

    async fn register_place_entity_list(
        &self,
        race_type: RaceType,
        entities: Vec<PlaceEntity>,
    ) -> Result<RegisterResult<PlaceEntity>, StoreError> {
        let folder = race_type.as_str();

        // The merge must see the whole stored collection: sort order depends
        // on every row, not just the date range being updated.
        let existing_text = self.store.fetch_csv(folder, FILE_PLACE_LIST).await?;
        let mut records: Vec<PlaceRecord> = codec::decode_rows(&existing_text, FILE_PLACE_LIST);

        let mut success = Vec::new();
        let mut failure = Vec::new();
        let mut incoming = Vec::new();
        for entity in entities {
            if entity.race_type() == race_type {
                incoming.push(PlaceRecord::from_entity(&entity));
                success.push(entity);
            } else {
                tracing::warn!(
                    id = %entity.id(),
                    expected = %race_type,
                    actual = %entity.race_type(),
                    "rejecting place entity of foreign race type"
                );
                failure.push(entity);
            }
        }

        if incoming.is_empty() {
            // Nothing convertible; the merge result would equal what was read.
            return Ok(RegisterResult::from_outcome(success, failure));
        }

        upsert_by_id(&mut records, incoming, |r| &r.id);
        // Fixed-width date columns sort lexicographically in date order.
        records.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        let body = codec::encode_rows(&records)?;
        self.store.upload_csv(body, folder, FILE_PLACE_LIST).await?;

        if race_type == RaceType::CentralHorse {
            let held_text = self.store.fetch_csv(folder, FILE_HELD_DAY_LIST).await?;
            let mut held_rows: Vec<HeldDayRecord> =
                codec::decode_rows(&held_text, FILE_HELD_DAY_LIST);
            let incoming_held: Vec<HeldDayRecord> =
                success.iter().filter_map(HeldDayRecord::from_place).collect();
            upsert_by_id(&mut held_rows, incoming_held, |r| &r.id);
            // Ids embed the date, so id order is date order.
            held_rows.sort_by(|a, b| b.id.cmp(&a.id));
            let held_body = codec::encode_rows(&held_rows)?;
            self.store
                .upload_csv(held_body, folder, FILE_HELD_DAY_LIST)
                .await?;
        }

        tracing::debug!(
            race_type = %race_type,
            registered = success.len(),
            failed = failure.len(),
            "registered place entities"
        );
        Ok(RegisterResult::from_outcome(success, failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use raceday_core::data::PlaceData;
    use raceday_core::entities::PlaceDetail;
    use raceday_core::responses::{CODE_FAILED, CODE_OK};
    use raceday_core::scalars::Grade;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keirin_place(day: u32, venue: &str, grade: &str) -> PlaceEntity {
        let data = PlaceData::new(RaceType::Keirin, date(2026, 1, day), venue).unwrap();
        PlaceEntity::create(
            data,
            PlaceDetail::Graded(Grade::new(RaceType::Keirin, grade).unwrap()),
            Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn central_place(day: u32, venue: &str, held_times: u32) -> PlaceEntity {
        let data = PlaceData::new(RaceType::CentralHorse, date(2026, 5, day), venue).unwrap();
        PlaceEntity::create(
            data,
            PlaceDetail::HeldDay(raceday_core::data::HeldDayData::new(held_times, 1).unwrap()),
            Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn filter(race_type: RaceType, start: NaiveDate, finish: NaiveDate) -> PlaceFilter {
        PlaceFilter {
            race_type,
            start_date: start,
            finish_date: finish,
        }
    }

    #[tokio::test]
    async fn register_then_fetch_round_trips() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let e1 = keirin_place(5, "京王閣", "GⅢ");
        let e2 = keirin_place(7, "平塚", "FⅠ");

        let result = repo
            .register_place_entity_list(RaceType::Keirin, vec![e1.clone(), e2])
            .await
            .unwrap();
        assert_eq!(result.code, CODE_OK);
        assert_eq!(result.success_data.len(), 2);

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, e1.date(), e1.date()))
            .await
            .unwrap();
        assert_eq!(fetched, vec![e1]);
    }

    #[tokio::test]
    async fn registering_twice_is_idempotent() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let e1 = keirin_place(5, "京王閣", "GⅢ");

        repo.register_place_entity_list(RaceType::Keirin, vec![e1.clone()])
            .await
            .unwrap();
        repo.register_place_entity_list(RaceType::Keirin, vec![e1.clone()])
            .await
            .unwrap();

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, date(2026, 1, 1), date(2026, 1, 31)))
            .await
            .unwrap();
        assert_eq!(fetched, vec![e1]);
    }

    #[tokio::test]
    async fn replacing_keeps_one_row_with_new_values() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let original = keirin_place(5, "京王閣", "GⅢ");
        let upgraded = original
            .with_detail(PlaceDetail::Graded(Grade::new(RaceType::Keirin, "GⅠ").unwrap()))
            .unwrap();
        assert_eq!(original.id(), upgraded.id());

        repo.register_place_entity_list(RaceType::Keirin, vec![original])
            .await
            .unwrap();
        repo.register_place_entity_list(RaceType::Keirin, vec![upgraded.clone()])
            .await
            .unwrap();

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, date(2026, 1, 1), date(2026, 1, 31)))
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].grade().unwrap().as_str(), "GⅠ");
    }

    #[tokio::test]
    async fn date_filter_is_inclusive_at_both_ends() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let e5 = keirin_place(5, "京王閣", "GⅢ");
        let e6 = keirin_place(6, "平塚", "FⅠ");
        let e7 = keirin_place(7, "静岡", "FⅡ");
        repo.register_place_entity_list(RaceType::Keirin, vec![e5.clone(), e6.clone(), e7.clone()])
            .await
            .unwrap();

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, date(2026, 1, 5), date(2026, 1, 6)))
            .await
            .unwrap();
        assert_eq!(fetched.len(), 2);
        assert!(fetched.contains(&e5));
        assert!(fetched.contains(&e6));
    }

    #[tokio::test]
    async fn central_register_writes_held_day_blob_and_fetch_joins_it() {
        let store = CsvBlobStore::in_memory();
        let repo = StoragePlaceRepository::new(store.clone());
        let place = central_place(31, "東京", 2);

        repo.register_place_entity_list(RaceType::CentralHorse, vec![place.clone()])
            .await
            .unwrap();

        let held_text = store
            .fetch_csv("central_horse", FILE_HELD_DAY_LIST)
            .await
            .unwrap();
        assert!(held_text.contains(place.id().as_str()));

        let fetched = repo
            .fetch_place_entity_list(&filter(
                RaceType::CentralHorse,
                date(2026, 5, 1),
                date(2026, 5, 31),
            ))
            .await
            .unwrap();
        assert_eq!(fetched, vec![place]);
    }

    #[tokio::test]
    async fn central_place_without_held_day_row_is_dropped() {
        let store = CsvBlobStore::in_memory();
        let repo = StoragePlaceRepository::new(store.clone());
        let place = central_place(31, "東京", 2);
        repo.register_place_entity_list(RaceType::CentralHorse, vec![place])
            .await
            .unwrap();

        // Lose the held-day blob; the place row alone cannot be rebuilt.
        store
            .upload_csv(String::new(), "central_horse", FILE_HELD_DAY_LIST)
            .await
            .unwrap();

        let fetched = repo
            .fetch_place_entity_list(&filter(
                RaceType::CentralHorse,
                date(2026, 5, 1),
                date(2026, 5, 31),
            ))
            .await
            .unwrap();
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn foreign_race_type_goes_to_failure_data() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let keirin = keirin_place(5, "京王閣", "GⅢ");

        let result = repo
            .register_place_entity_list(RaceType::BoatRace, vec![keirin])
            .await
            .unwrap();
        assert_eq!(result.code, CODE_FAILED);
        assert_eq!(result.success_data.len(), 0);
        assert_eq!(result.failure_data.len(), 1);

        // Nothing was written.
        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::BoatRace, date(2026, 1, 1), date(2026, 12, 31)))
            .await
            .unwrap();
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn partial_failure_still_writes_convertible_rows() {
        let repo = StoragePlaceRepository::new(CsvBlobStore::in_memory());
        let good = keirin_place(5, "京王閣", "GⅢ");
        let foreign = central_place(31, "東京", 2);

        let result = repo
            .register_place_entity_list(RaceType::Keirin, vec![good.clone(), foreign])
            .await
            .unwrap();
        assert_eq!(result.code, CODE_FAILED);
        assert!(result.message.contains("partial"));
        assert_eq!(result.success_data, vec![good.clone()]);
        assert_eq!(result.failure_data.len(), 1);

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, good.date(), good.date()))
            .await
            .unwrap();
        assert_eq!(fetched, vec![good]);
    }

    #[tokio::test]
    async fn malformed_stored_row_does_not_poison_fetch() {
        let store = CsvBlobStore::in_memory();
        let repo = StoragePlaceRepository::new(store.clone());
        let e1 = keirin_place(5, "京王閣", "GⅢ");
        repo.register_place_entity_list(RaceType::Keirin, vec![e1.clone()])
            .await
            .unwrap();

        // Append a garbage row by hand.
        let mut text = store.fetch_csv("keirin", FILE_PLACE_LIST).await.unwrap();
        text.push_str("broken,row\n");
        store
            .upload_csv(text, "keirin", FILE_PLACE_LIST)
            .await
            .unwrap();

        let fetched = repo
            .fetch_place_entity_list(&filter(RaceType::Keirin, date(2026, 1, 1), date(2026, 1, 31)))
            .await
            .unwrap();
        assert_eq!(fetched, vec![e1]);
    }

    #[tokio::test]
    async fn stored_rows_are_sorted_newest_first() {
        let store = CsvBlobStore::in_memory();
        let repo = StoragePlaceRepository::new(store.clone());
        let early = keirin_place(5, "京王閣", "GⅢ");
        let late = keirin_place(20, "平塚", "FⅠ");
        repo.register_place_entity_list(RaceType::Keirin, vec![early, late])
            .await
            .unwrap();

        let text = store.fetch_csv("keirin", FILE_PLACE_LIST).await.unwrap();
        let first_data_line = text.lines().nth(1).unwrap();
        assert!(
            first_data_line.contains("2026-01-20"),
            "newest row should come first: {text}"
        );
    }
}
