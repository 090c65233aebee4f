use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use crate::data::{ConditionData, HeldDayData, PlayerData, RaceData};
use crate::enums::RaceType;
use crate::errors::CoreError;
use crate::ids::RaceId;
use crate::scalars::{PositionNumber, Stage};

/// Discipline-conditional attributes of a race.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RaceDetail {
    /// Central horse racing: meet numbering plus course condition.
    Central {
        held_day: HeldDayData,
        condition: ConditionData,
    },
    /// Regional and overseas horse racing: course condition only.
    Flat { condition: ConditionData },
    /// Mechanical racing: round classification and the entrant list.
    Mechanical {
        stage: Stage,
        players: Vec<PlayerData>,
    },
}

impl RaceDetail {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Central { .. } => "central",
            Self::Flat { .. } => "flat",
            Self::Mechanical { .. } => "mechanical",
        }
    }

    const fn describes(&self, race_type: RaceType) -> bool {
        match self {
            Self::Central { .. } => matches!(race_type, RaceType::CentralHorse),
            Self::Flat { .. } => {
                matches!(race_type, RaceType::RegionalHorse | RaceType::OverseasHorse)
            }
            Self::Mechanical { .. } => race_type.is_mechanical(),
        }
    }
}

/// A validated, identity-bearing race.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RaceEntity {
    id: RaceId,
    data: RaceData,
    detail: RaceDetail,
    update_date: DateTime<Utc>,
}

impl RaceEntity {
    /// Construct from an existing identifier.
    ///
    /// Validates the id shape, the detail/discipline correspondence, the
    /// stage vocabulary, and the player list (positions within the
    /// discipline's field size, no duplicate positions).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Entity`] carrying the full attempted payload.
    pub fn new(
        id: RaceId,
        data: RaceData,
        detail: RaceDetail,
        update_date: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let race_type = data.race_type();
        let fail = |reason: String| CoreError::Entity {
            entity: "race",
            race_type,
            reason,
            payload: format!("id={id} data={data:?} detail={detail:?} update_date={update_date}"),
        };

        if let Err(e) = RaceId::parse(race_type, id.as_str()) {
            return Err(fail(format!("id does not fit the {race_type} shape: {e}")));
        }
        if !detail.describes(race_type) {
            return Err(fail(format!(
                "{} detail is not legal for {race_type}",
                detail.kind()
            )));
        }
        if let RaceDetail::Mechanical { stage, players } = &detail {
            if let Err(e) = Stage::new(race_type, stage.as_str()) {
                return Err(fail(e.to_string()));
            }
            let mut seen: Vec<PositionNumber> = Vec::with_capacity(players.len());
            for player in players {
                let position = player.position();
                if let Err(e) = PositionNumber::new(race_type, position.get()) {
                    return Err(fail(e.to_string()));
                }
                if seen.contains(&position) {
                    return Err(fail(format!("duplicate position number {position}")));
                }
                seen.push(position);
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
    /// # Errors
    ///
    /// Returns [`CoreError`] if id derivation or any [`RaceEntity::new`]
    /// check fails.
    pub fn create(
        data: RaceData,
        detail: RaceDetail,
        update_date: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let id = RaceId::build(
            data.race_type(),
            data.start_at().date(),
            data.venue(),
            data.number(),
        )?;
        Self::new(id, data, detail, update_date)
    }

    #[must_use]
    pub const fn id(&self) -> &RaceId {
        &self.id
    }

    #[must_use]
    pub const fn data(&self) -> &RaceData {
        &self.data
    }

    #[must_use]
    pub const fn detail(&self) -> &RaceDetail {
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
    pub const fn start_at(&self) -> NaiveDateTime {
        self.data.start_at()
    }

    /// Held-day numbering; `Some` only for central horse racing.
    #[must_use]
    pub const fn held_day(&self) -> Option<&HeldDayData> {
        match &self.detail {
            RaceDetail::Central { held_day, .. } => Some(held_day),
            _ => None,
        }
    }

    /// Course condition; `Some` only for the horse-racing disciplines.
    #[must_use]
    pub const fn condition(&self) -> Option<&ConditionData> {
        match &self.detail {
            RaceDetail::Central { condition, .. } | RaceDetail::Flat { condition } => {
                Some(condition)
            }
            RaceDetail::Mechanical { .. } => None,
        }
    }

    /// Round classification; `Some` only for the mechanical disciplines.
    #[must_use]
    pub const fn stage(&self) -> Option<&Stage> {
        match &self.detail {
            RaceDetail::Mechanical { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// Entrant list; `Some` only for the mechanical disciplines.
    #[must_use]
    pub fn players(&self) -> Option<&[PlayerData]> {
        match &self.detail {
            RaceDetail::Mechanical { players, .. } => Some(players),
            _ => None,
        }
    }

    /// Copy with different data, re-running every construction check.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`RaceEntity::new`] with the overridden data.
    pub fn with_data(&self, data: RaceData) -> Result<Self, CoreError> {
        Self::new(self.id.clone(), data, self.detail.clone(), self.update_date)
    }

    /// Copy with a different detail, re-running every construction check.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`RaceEntity::new`] with the overridden detail.
    pub fn with_detail(&self, detail: RaceDetail) -> Result<Self, CoreError> {
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
