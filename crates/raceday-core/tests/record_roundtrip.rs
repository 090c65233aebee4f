//! Serde roundtrip and JsonSchema validation tests for the wire-facing types.

use chrono::{NaiveDate, TimeZone, Utc};
use schemars::schema_for;

use raceday_core::data::{ConditionData, HeldDayData, PlaceData, PlayerData, RaceData};
use raceday_core::entities::{PlaceDetail, PlaceEntity, RaceDetail, RaceEntity};
use raceday_core::enums::{RaceType, Surface};
use raceday_core::records::{HeldDayRecord, PlaceRecord, RacePlayerRecord, RaceRecord};
use raceday_core::responses::RegisterResult;
use raceday_core::scalars::{Grade, Stage};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

/// Validated aggregates serialize but never deserialize (construction goes
/// through the factories), so these only check schema conformance.
macro_rules! validate_only {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn keirin_place() -> PlaceEntity {
    let data = PlaceData::new(
        RaceType::Keirin,
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        "京王閣",
    )
    .unwrap();
    PlaceEntity::create(
        data,
        PlaceDetail::Graded(Grade::new(RaceType::Keirin, "GⅢ").unwrap()),
        Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
    )
    .unwrap()
}

fn central_place() -> PlaceEntity {
    let data = PlaceData::new(
        RaceType::CentralHorse,
        NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
        "東京",
    )
    .unwrap();
    PlaceEntity::create(
        data,
        PlaceDetail::HeldDay(HeldDayData::new(2, 12).unwrap()),
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn derby() -> RaceEntity {
    let data = RaceData::new(
        RaceType::CentralHorse,
        "日本ダービー",
        NaiveDate::from_ymd_opt(2026, 5, 31)
            .unwrap()
            .and_hms_opt(15, 40, 0)
            .unwrap(),
        "東京",
        "GⅠ",
        10,
    )
    .unwrap();
    let detail = RaceDetail::Central {
        held_day: HeldDayData::new(2, 12).unwrap(),
        condition: ConditionData::new(Surface::Turf, 2400).unwrap(),
    };
    RaceEntity::create(data, detail, Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()).unwrap()
}

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
    RaceEntity::create(data, detail, Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap()).unwrap()
}

// --- Record types (full roundtrip) ---

roundtrip_and_validate!(
    place_record_roundtrip,
    PlaceRecord,
    PlaceRecord::from_entity(&keirin_place())
);

roundtrip_and_validate!(
    central_place_record_roundtrip,
    PlaceRecord,
    PlaceRecord::from_entity(&central_place())
);

roundtrip_and_validate!(race_record_roundtrip, RaceRecord, RaceRecord::from_entity(&derby()));

roundtrip_and_validate!(
    mechanical_race_record_roundtrip,
    RaceRecord,
    RaceRecord::from_entity(&boat_final())
);

roundtrip_and_validate!(
    held_day_record_roundtrip,
    HeldDayRecord,
    HeldDayRecord::from_place(&central_place()).unwrap()
);

roundtrip_and_validate!(
    race_player_record_roundtrip,
    RacePlayerRecord,
    RacePlayerRecord::from_race(&boat_final()).remove(0)
);

// --- Entities and responses (schema conformance) ---

validate_only!(place_entity_schema, PlaceEntity, keirin_place());
validate_only!(central_place_entity_schema, PlaceEntity, central_place());
validate_only!(race_entity_schema, RaceEntity, derby());
validate_only!(mechanical_race_entity_schema, RaceEntity, boat_final());

validate_only!(
    register_result_schema,
    RegisterResult<PlaceEntity>,
    RegisterResult::from_outcome(vec![keirin_place()], vec![])
);

// --- Schema rejection ---

#[test]
fn schema_rejects_record_missing_column() {
    let schema = serde_json::to_value(schema_for!(PlaceRecord)).unwrap();
    // Missing required "location" column.
    let invalid = serde_json::json!({
        "id": "keirin2026010527",
        "raceType": "keirin",
        "dateTime": "2026-01-05",
        "grade": "GⅢ",
        "updateDate": "2026-01-01T09:00:00+00:00"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject a row without 'location'");
}

#[test]
fn entity_round_trips_through_record_exactly() {
    // The full observable state survives the flat projection.
    let place = central_place();
    let record = PlaceRecord::from_entity(&place);
    let held = HeldDayRecord::from_place(&place).unwrap().to_data().unwrap();
    let recovered = record.to_entity(RaceType::CentralHorse, Some(held)).unwrap();
    assert_eq!(recovered, place);

    let race = boat_final();
    let record = RaceRecord::from_entity(&race);
    let players = RacePlayerRecord::from_race(&race)
        .iter()
        .map(|row| row.to_data(RaceType::BoatRace).unwrap())
        .collect();
    let recovered = record.to_entity(RaceType::BoatRace, None, players).unwrap();
    assert_eq!(recovered, race);
}
