//! Identity-bearing entities.
//!
//! Entities wrap a domain data object with its deterministic identifier, an
//! update timestamp, and the discipline-conditional detail that the original
//! data sources attach (held-day numbering for central racing, meet grade
//! for the mechanical disciplines, stage and players for mechanical races).
//!
//! The conditional detail is a sum type per entity family, so a variant can
//! only carry the fields legal for its discipline group; construction checks
//! that the variant matches the data's race type and fails with a single
//! aggregated error carrying the attempted payload.

mod place;
mod race;

pub use place::{PlaceDetail, PlaceEntity};
pub use race::{RaceDetail, RaceEntity};
