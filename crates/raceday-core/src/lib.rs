//! # raceday-core
//!
//! Core types for Raceday: the validated entity model shared across all
//! Raceday crates.
//!
//! This crate provides:
//! - The closed [`enums::RaceType`] discipline enum and per-discipline
//!   vocabularies (venues, grades, stages)
//! - Validated scalar newtypes and immutable domain data objects
//! - Deterministic place/race identifiers
//! - Identity-bearing entities with discipline-conditional detail variants
//! - Flat record projections (the CSV storage boundary)
//! - Error and register-result types
//!
//! No I/O happens here; storage lives in `raceday-store`.

pub mod data;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod records;
pub mod responses;
pub mod scalars;
pub mod vocab;
