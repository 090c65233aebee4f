//! Per-discipline closed vocabularies: venues, grades, and stages.
//!
//! Venue tables carry the public numbering schemes so identifiers stay
//! compatible with the upstream data sources: JRA course codes for central
//! racing, NAR track codes for regional racing, the standard velodrome codes
//! for keirin, and the 24 stadium numbers for boat race. Overseas courses and
//! auto race tracks have no public numeric scheme and use sequential codes.
//!
//! Lookups are keyed by [`RaceType`]; the enum is closed, so every discipline
//! has a table by construction.

use crate::enums::RaceType;

const CENTRAL_VENUES: &[(u8, &str)] = &[
    (1, "札幌"),
    (2, "函館"),
    (3, "福島"),
    (4, "新潟"),
    (5, "東京"),
    (6, "中山"),
    (7, "中京"),
    (8, "京都"),
    (9, "阪神"),
    (10, "小倉"),
];

const REGIONAL_VENUES: &[(u8, &str)] = &[
    (30, "門別"),
    (33, "帯広"),
    (35, "盛岡"),
    (36, "水沢"),
    (42, "浦和"),
    (43, "船橋"),
    (44, "大井"),
    (45, "川崎"),
    (46, "金沢"),
    (47, "笠松"),
    (48, "名古屋"),
    (50, "園田"),
    (51, "姫路"),
    (54, "高知"),
    (55, "佐賀"),
];

const OVERSEAS_VENUES: &[(u8, &str)] = &[
    (1, "ロンシャン"),
    (2, "シャンティイ"),
    (3, "ドーヴィル"),
    (4, "アスコット"),
    (5, "エプソム"),
    (6, "グッドウッド"),
    (7, "ニューマーケット"),
    (8, "ヨーク"),
    (9, "レパーズタウン"),
    (10, "カラ"),
    (11, "シャティン"),
    (12, "メイダン"),
    (13, "キングアブドゥルアジーズ"),
    (14, "サンタアニタパーク"),
    (15, "チャーチルダウンズ"),
    (16, "ベルモントパーク"),
    (17, "デルマー"),
    (18, "ガルフストリームパーク"),
    (19, "フレミントン"),
    (20, "ランドウィック"),
    (21, "コーフィールド"),
];

const KEIRIN_VENUES: &[(u8, &str)] = &[
    (11, "函館"),
    (12, "青森"),
    (13, "いわき平"),
    (21, "弥彦"),
    (22, "前橋"),
    (23, "取手"),
    (24, "宇都宮"),
    (25, "大宮"),
    (26, "西武園"),
    (27, "京王閣"),
    (28, "立川"),
    (31, "松戸"),
    (32, "千葉"),
    (34, "川崎"),
    (35, "平塚"),
    (36, "小田原"),
    (37, "伊東"),
    (38, "静岡"),
    (42, "名古屋"),
    (43, "岐阜"),
    (44, "大垣"),
    (45, "豊橋"),
    (46, "富山"),
    (47, "松阪"),
    (48, "四日市"),
    (51, "福井"),
    (53, "奈良"),
    (54, "向日町"),
    (55, "和歌山"),
    (56, "岸和田"),
    (61, "玉野"),
    (62, "広島"),
    (63, "防府"),
    (71, "高松"),
    (73, "小松島"),
    (74, "高知"),
    (75, "松山"),
    (81, "小倉"),
    (83, "久留米"),
    (84, "武雄"),
    (85, "佐世保"),
    (86, "別府"),
    (87, "熊本"),
];

const AUTO_RACE_VENUES: &[(u8, &str)] = &[
    (1, "川口"),
    (2, "伊勢崎"),
    (3, "浜松"),
    (4, "飯塚"),
    (5, "山陽"),
];

const BOAT_RACE_VENUES: &[(u8, &str)] = &[
    (1, "桐生"),
    (2, "戸田"),
    (3, "江戸川"),
    (4, "平和島"),
    (5, "多摩川"),
    (6, "浜名湖"),
    (7, "蒲郡"),
    (8, "常滑"),
    (9, "津"),
    (10, "三国"),
    (11, "びわこ"),
    (12, "住之江"),
    (13, "尼崎"),
    (14, "鳴門"),
    (15, "丸亀"),
    (16, "児島"),
    (17, "宮島"),
    (18, "徳山"),
    (19, "下関"),
    (20, "若松"),
    (21, "芦屋"),
    (22, "福岡"),
    (23, "唐津"),
    (24, "大村"),
];

const CENTRAL_GRADES: &[&str] = &[
    "GⅠ",
    "GⅡ",
    "GⅢ",
    "J.GⅠ",
    "J.GⅡ",
    "J.GⅢ",
    "Listed",
    "オープン特別",
];

const REGIONAL_GRADES: &[&str] = &[
    "JpnⅠ",
    "JpnⅡ",
    "JpnⅢ",
    "重賞",
    "Listed",
    "オープン特別",
    "地方重賞",
];

const OVERSEAS_GRADES: &[&str] = &["GⅠ", "GⅡ", "GⅢ", "Listed", "格付けなし"];

const KEIRIN_GRADES: &[&str] = &["GP", "GⅠ", "GⅡ", "GⅢ", "FⅠ", "FⅡ"];

const AUTO_RACE_GRADES: &[&str] = &["SG", "特GⅠ", "GⅠ", "GⅡ", "開催"];

const BOAT_RACE_GRADES: &[&str] = &["SG", "GⅠ", "GⅡ", "GⅢ", "一般"];

const KEIRIN_STAGES: &[&str] = &[
    "決勝",
    "準決勝",
    "二次予選",
    "一次予選",
    "特別選抜予選",
    "順位決定",
    "選抜",
    "特選",
    "一般",
];

const AUTO_RACE_STAGES: &[&str] = &[
    "優勝戦",
    "準決勝戦",
    "特別選抜戦",
    "選抜戦",
    "予選",
    "一般戦",
];

const BOAT_RACE_STAGES: &[&str] = &["優勝戦", "準優勝戦", "特別選抜戦", "予選", "一般戦"];

/// The `(code, name)` venue table for a discipline.
#[must_use]
pub const fn venues(race_type: RaceType) -> &'static [(u8, &'static str)] {
    match race_type {
        RaceType::CentralHorse => CENTRAL_VENUES,
        RaceType::RegionalHorse => REGIONAL_VENUES,
        RaceType::OverseasHorse => OVERSEAS_VENUES,
        RaceType::Keirin => KEIRIN_VENUES,
        RaceType::AutoRace => AUTO_RACE_VENUES,
        RaceType::BoatRace => BOAT_RACE_VENUES,
    }
}

/// Numeric code of a venue name, if the name belongs to the discipline.
#[must_use]
pub fn venue_code(race_type: RaceType, name: &str) -> Option<u8> {
    venues(race_type)
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

/// Venue name for a numeric code, if the code belongs to the discipline.
#[must_use]
pub fn venue_name(race_type: RaceType, code: u8) -> Option<&'static str> {
    venues(race_type)
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, n)| *n)
}

/// The grade vocabulary for a discipline.
#[must_use]
pub const fn grades(race_type: RaceType) -> &'static [&'static str] {
    match race_type {
        RaceType::CentralHorse => CENTRAL_GRADES,
        RaceType::RegionalHorse => REGIONAL_GRADES,
        RaceType::OverseasHorse => OVERSEAS_GRADES,
        RaceType::Keirin => KEIRIN_GRADES,
        RaceType::AutoRace => AUTO_RACE_GRADES,
        RaceType::BoatRace => BOAT_RACE_GRADES,
    }
}

/// The stage vocabulary for a discipline. Empty for horse racing, which has
/// no round classification.
#[must_use]
pub const fn stages(race_type: RaceType) -> &'static [&'static str] {
    match race_type {
        RaceType::Keirin => KEIRIN_STAGES,
        RaceType::AutoRace => AUTO_RACE_STAGES,
        RaceType::BoatRace => BOAT_RACE_STAGES,
        RaceType::CentralHorse | RaceType::RegionalHorse | RaceType::OverseasHorse => &[],
    }
}
