//! # raceday-store
//!
//! Storage for Raceday schedules: a whole-blob CSV gateway over an
//! S3-compatible object store, plus the reconciliation repositories that
//! merge newly scraped entities into the stored collections and answer
//! date-range queries.
//!
//! ## Storage layout
//!
//! One CSV blob per collection under a per-discipline folder:
//!
//! - `{prefix}/{race_type}/placeList.csv`
//! - `{prefix}/{race_type}/raceList.csv`
//! - `{prefix}/{race_type}/heldDayList.csv` (central horse racing only)
//! - `{prefix}/{race_type}/racePlayerList.csv` (mechanical racing only)
//!
//! Blobs are read and replaced whole; there is no locking. Concurrent
//! registrations for the same race type race on the blob and the last
//! writer wins — callers serialize calls per race type (they already pace
//! scrapes with an inter-call delay).

pub mod codec;
pub mod error;
pub mod gateway;
pub mod repository;

pub use error::StoreError;
pub use gateway::CsvBlobStore;
pub use repository::{
    PlaceFilter, PlaceRepository, RaceFilter, RaceRepository, StoragePlaceRepository,
    StorageRaceRepository,
};
