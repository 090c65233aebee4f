use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data::HeldDayData;
use crate::entities::PlaceEntity;
use crate::errors::RecordParseError;
use crate::records::parse_timestamp;

/// Row in `heldDayList.csv`: the meet numbering of one central-racing place,
/// keyed by the place id.
///
/// Written when central places are registered; race fetches join it through
/// the place-id prefix of the race id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeldDayRecord {
    pub id: String,
    pub held_times: u32,
    pub held_day_times: u32,
    pub update_date: String,
}

impl HeldDayRecord {
    /// Project the held-day numbering out of a central place entity.
    ///
    /// Returns `None` for disciplines that carry no held-day data.
    #[must_use]
    pub fn from_place(entity: &PlaceEntity) -> Option<Self> {
        entity.held_day().map(|held| Self {
            id: entity.id().as_str().to_string(),
            held_times: held.held_times(),
            held_day_times: held.held_day_times(),
            update_date: entity.update_date().to_rfc3339(),
        })
    }

    /// The typed held-day numbering of this row.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError`] if either counter is zero or the
    /// timestamp column is malformed.
    pub fn to_data(&self) -> Result<HeldDayData, RecordParseError> {
        parse_timestamp("updateDate", &self.update_date)?;
        Ok(HeldDayData::new(self.held_times, self.held_day_times)?)
    }
}
