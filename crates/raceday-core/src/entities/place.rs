use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use crate::data::{HeldDayData, PlaceData};
use crate::enums::RaceType;
use crate::errors::CoreError;
use crate::ids::PlaceId;
use crate::scalars::Grade;

/// Discipline-conditional attributes of a place.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaceDetail {
    /// Central horse racing: meet sequence numbering.
    HeldDay(HeldDayData),
    /// Mechanical racing: the meet's grade.
    Graded(Grade),
    /// Regional and overseas horse racing carry neither.
    Plain,
}

impl PlaceDetail {
    const fn kind(&self) -> &'static str {
        match self {
            Self::HeldDay(_) => "held-day",
            Self::Graded(_) => "graded",
            Self::Plain => "plain",
        }
    }

    const fn describes(&self, race_type: RaceType) -> bool {
        match self {
            Self::HeldDay(_) => matches!(race_type, RaceType::CentralHorse),
            Self::Graded(_) => race_type.is_mechanical(),
            Self::Plain => matches!(race_type, RaceType::RegionalHorse | RaceType::OverseasHorse),
        }
    }
}

/// A validated, identity-bearing meet day.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PlaceEntity {
    id: PlaceId,
    data: PlaceData,
    detail: PlaceDetail,
    update_date: DateTime<Utc>,
}

impl PlaceEntity {
    /// Construct from an existing identifier.
    ///
    /// Validates the id shape for the data's discipline and the
    /// detail/discipline correspondence; a grade carried in the detail is
    /// re-validated against the discipline's vocabulary, so an override that
    /// smuggles a foreign grade fails here.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Entity`] carrying the full attempted payload.
    pub fn new(
        id: PlaceId,
        data: PlaceData,
        detail: PlaceDetail,
        update_date: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let race_type = data.race_type();
        let fail = |reason: String| CoreError::Entity {
            entity: "place",
            race_type,
            reason,
            payload: format!("id={id} data={data:?} detail={detail:?} update_date={update_date}"),
        };

        if let Err(e) = PlaceId::parse(race_type, id.as_str()) {
            return Err(fail(format!("id does not fit the {race_type} shape: {e}")));
        }
        if !detail.describes(race_type) {
            return Err(fail(format!(
                "{} detail is not legal for {race_type}",
                detail.kind()
            )));
        }
        if let PlaceDetail::Graded(grade) = &detail {
            if let Err(e) = Grade::new(race_type, grade.as_str()) {
                return Err(fail(e.to_string()));
            }
        }

        Ok(Self {
            id,
            data,
            detail,
            update_date,
        })
    }

    /// Construct a fresh observation, minting the identifier from the data.
    ///
    /// This is how scraping collaborators create entities without knowing
    /// the id format.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if id derivation or any [`PlaceEntity::new`]
    /// check fails.
    pub fn create(
        data: PlaceData,
        detail: PlaceDetail,
        update_date: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let id = PlaceId::build(data.race_type(), data.date(), data.venue())?;
        Self::new(id, data, detail, update_date)
    }

    #[must_use]
    pub const fn id(&self) -> &PlaceId {
        &self.id
    }

    #[must_use]
    pub const fn data(&self) -> &PlaceData {
        &self.data
    }

    #[must_use]
    pub const fn detail(&self) -> &PlaceDetail {
        &self.detail
    }

    #[must_use]
    pub const fn update_date(&self) -> DateTime<Utc> {
        self.update_date
    }

    #[must_use]
    pub const fn race_type(&self) -> RaceType {
        self.data.race_type()
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.data.date()
    }

    /// Held-day numbering; `Some` only for central horse racing.
    #[must_use]
    pub const fn held_day(&self) -> Option<&HeldDayData> {
        match &self.detail {
            PlaceDetail::HeldDay(held) => Some(held),
            _ => None,
        }
    }

    /// Meet grade; `Some` only for the mechanical disciplines.
    #[must_use]
    pub const fn grade(&self) -> Option<&Grade> {
        match &self.detail {
            PlaceDetail::Graded(grade) => Some(grade),
            _ => None,
        }
    }

    /// Copy with different data, re-running every construction check.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`PlaceEntity::new`] with the overridden data.
    pub fn with_data(&self, data: PlaceData) -> Result<Self, CoreError> {
        Self::new(self.id.clone(), data, self.detail.clone(), self.update_date)
    }

    /// Copy with a different detail, re-running every construction check.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`PlaceEntity::new`] with the overridden detail.
    pub fn with_detail(&self, detail: PlaceDetail) -> Result<Self, CoreError> {
        Self::new(self.id.clone(), self.data.clone(), detail, self.update_date)
    }

    /// Copy with a new update timestamp.
    #[must_use]
    pub fn with_update_date(&self, update_date: DateTime<Utc>) -> Self {
        Self {
            update_date,
            ..self.clone()
        }
    }
}
