//! Reconciliation repositories.
//!
//! A repository call is a stateless read-merge-write (or read-filter)
//! sequence over the whole blob collection of one race type:
//!
//! - `fetch` reads the blobs, parses rows best-effort, joins the held-day
//!   and race-player blobs back by id prefix, filters by date range
//!   (inclusive at both ends), and converts the survivors to entities.
//! - `register` reads the full existing collection, converts incoming
//!   entities to records (failures are reported, not fatal), upserts by id
//!   (replace-in-place or append, last write wins), sorts newest-first, and
//!   overwrites the blob.
//!
//! The storage-backed implementations here support both operations.
//! Scrape-origin repositories (the HTML collaborators, out of scope here)
//! implement the same traits fetch-only: their `register` returns
//! [`StoreError::WriteUnsupported`] by contract, never a partial write.

mod place;
mod race;

pub use place::StoragePlaceRepository;
pub use race::StorageRaceRepository;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use raceday_core::entities::{PlaceEntity, RaceEntity};
use raceday_core::enums::RaceType;
use raceday_core::responses::RegisterResult;

use crate::error::StoreError;

pub const FILE_PLACE_LIST: &str = "placeList.csv";
pub const FILE_RACE_LIST: &str = "raceList.csv";
pub const FILE_HELD_DAY_LIST: &str = "heldDayList.csv";
pub const FILE_RACE_PLAYER_LIST: &str = "racePlayerList.csv";

/// Date-range filter for place fetches. Both bounds are inclusive.
#[derive(Debug, Clone)]
pub struct PlaceFilter {
    pub race_type: RaceType,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
}

/// Date-range filter for race fetches. Both bounds are inclusive.
///
/// When `places` is non-empty, only races held at one of those places are
/// returned; an empty list means no restriction.
#[derive(Debug, Clone)]
pub struct RaceFilter {
    pub race_type: RaceType,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub places: Vec<PlaceEntity>,
}

/// Read and reconcile place entities for one race type.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Best-effort read of the stored places in the date range.
    async fn fetch_place_entity_list(
        &self,
        filter: &PlaceFilter,
    ) -> Result<Vec<PlaceEntity>, StoreError>;

    /// Merge new observations into the stored collection by identifier.
    ///
    /// Returns `Err` only on I/O failure (nothing is written then); entity
    /// conversion failures are reported inside the result envelope.
    async fn register_place_entity_list(
        &self,
        race_type: RaceType,
        entities: Vec<PlaceEntity>,
    ) -> Result<RegisterResult<PlaceEntity>, StoreError>;
}

/// Read and reconcile race entities for one race type.
#[async_trait]
pub trait RaceRepository: Send + Sync {
    /// Best-effort read of the stored races in the date range.
    async fn fetch_race_entity_list(
        &self,
        filter: &RaceFilter,
    ) -> Result<Vec<RaceEntity>, StoreError>;

    /// Merge new observations into the stored collection by identifier.
    ///
    /// Returns `Err` only on I/O failure (nothing is written then); entity
    /// conversion failures are reported inside the result envelope.
    async fn register_race_entity_list(
        &self,
        race_type: RaceType,
        entities: Vec<RaceEntity>,
    ) -> Result<RegisterResult<RaceEntity>, StoreError>;
}

/// Merge `incoming` into `existing` by id: replace the stored row in place
/// when the id already exists, append otherwise. Last write wins; the whole
/// incoming row replaces the whole stored row.
pub(crate) fn upsert_by_id<T>(existing: &mut Vec<T>, incoming: Vec<T>, id_of: impl Fn(&T) -> &str) {
    let mut index: HashMap<String, usize> = existing
        .iter()
        .enumerate()
        .map(|(i, row)| (id_of(row).to_string(), i))
        .collect();
    for row in incoming {
        let id = id_of(&row).to_string();
        if let Some(&i) = index.get(&id) {
            existing[i] = row;
        } else {
            index.insert(id, existing.len());
            existing.push(row);
        }
    }
}

/// The place-id prefix of a race-shaped id (everything but the trailing
/// two digits). `None` when the raw id is too short to carry a suffix.
pub(crate) fn place_prefix(id: &str) -> Option<&str> {
    (id.len() >= 2 && id.is_char_boundary(id.len() - 2)).then(|| &id[..id.len() - 2])
}
