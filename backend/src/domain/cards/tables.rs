//! Static lookup tables, embedded at compile time and parsed exactly once.
//!
//! All card strings are normalized to the typed [`Card`] model here, so
//! notation differences in the data files never leak into the resolvers.
//! Malformed table data is a build artifact defect and fails loudly at
//! first access; missing lookups at runtime are ordinary `None` results.

use once_cell::sync::Lazy;
use serde::Deserialize;
use shared::Card;
use std::collections::HashMap;

static BIRTHDATE_CARDS_JSON: &str = include_str!("../../../data/birthdate_cards.json");
static YEARLY_FORECASTS_JSON: &str = include_str!("../../../data/yearly_forecasts.json");

/// Row format of `birthdate_cards.json`, as produced by the spreadsheet
/// conversion: `{ "Date": "Month Day", "Card": "...", "Card Name": "..." }`.
#[derive(Debug, Deserialize)]
struct BirthdateRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Card")]
    card: String,
    #[serde(rename = "Card Name")]
    card_name: String,
}

/// Row format of `yearly_forecasts.json`. Cells may be blank.
#[derive(Debug, Deserialize)]
struct ForecastRowRaw {
    age: u32,
    mercury: String,
    venus: String,
    mars: String,
    jupiter: String,
    saturn: String,
    uranus: String,
    neptune: String,
    #[serde(rename = "longRange")]
    long_range: String,
    pluto: String,
    result: String,
    support: String,
    development: String,
}

/// A birthdate table entry: the birth card and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthCardEntry {
    pub card: Card,
    pub card_name: String,
}

/// One loaded forecast row. Blank table cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
    pub age: u32,
    pub mercury: Option<Card>,
    pub venus: Option<Card>,
    pub mars: Option<Card>,
    pub jupiter: Option<Card>,
    pub saturn: Option<Card>,
    pub uranus: Option<Card>,
    pub neptune: Option<Card>,
    pub long_range: Option<Card>,
    pub pluto: Option<Card>,
    pub result: Option<Card>,
    pub support: Option<Card>,
    pub development: Option<Card>,
}

fn month_number(name: &str) -> Option<u32> {
    match name {
        "January" => Some(1),
        "February" => Some(2),
        "March" => Some(3),
        "April" => Some(4),
        "May" => Some(5),
        "June" => Some(6),
        "July" => Some(7),
        "August" => Some(8),
        "September" => Some(9),
        "October" => Some(10),
        "November" => Some(11),
        "December" => Some(12),
        _ => None,
    }
}

/// Parse a year-independent "Month Day" key into `(month, day)`.
fn parse_day_key(key: &str) -> Option<(u32, u32)> {
    let (month_name, day) = key.trim().split_once(' ')?;
    Some((month_number(month_name)?, day.trim().parse().ok()?))
}

/// Parse a table cell; blank cells are a legal "unknown" value.
fn parse_cell(cell: &str, context: &str) -> Option<Card> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match Card::parse(cell) {
        Ok(card) => Some(card),
        Err(e) => panic!("invalid card '{}' in {}: {}", cell, context, e),
    }
}

/// Date -> birth card table, keyed by `(month, day)`. Covers all 366
/// calendar days including February 29; at most one entry per day.
pub(crate) static BIRTHDATE_TABLE: Lazy<HashMap<(u32, u32), BirthCardEntry>> = Lazy::new(|| {
    let rows: Vec<BirthdateRow> =
        serde_json::from_str(BIRTHDATE_CARDS_JSON).expect("birthdate_cards.json is not valid JSON");

    let mut table = HashMap::with_capacity(rows.len());
    for row in rows {
        let key = parse_day_key(&row.date)
            .unwrap_or_else(|| panic!("invalid calendar day '{}' in birthdate table", row.date));
        let card = parse_cell(&row.card, "birthdate table")
            .unwrap_or_else(|| panic!("blank card for '{}' in birthdate table", row.date));

        let previous = table.insert(
            key,
            BirthCardEntry {
                card,
                card_name: row.card_name,
            },
        );
        if previous.is_some() {
            panic!("duplicate birthdate table entry for '{}'", row.date);
        }
    }
    table
});

/// Birth card -> forecast rows, sorted by age ascending with no duplicate
/// ages per card.
pub(crate) static FORECAST_TABLE: Lazy<HashMap<Card, Vec<ForecastRow>>> = Lazy::new(|| {
    let raw: HashMap<String, Vec<ForecastRowRaw>> =
        serde_json::from_str(YEARLY_FORECASTS_JSON).expect("yearly_forecasts.json is not valid JSON");

    let mut table = HashMap::with_capacity(raw.len());
    for (card_str, rows) in raw {
        let birth_card = Card::parse(&card_str)
            .unwrap_or_else(|e| panic!("invalid birth card key '{}' in forecast table: {}", card_str, e));

        let mut parsed: Vec<ForecastRow> = rows
            .into_iter()
            .map(|row| ForecastRow {
                age: row.age,
                mercury: parse_cell(&row.mercury, "forecast table"),
                venus: parse_cell(&row.venus, "forecast table"),
                mars: parse_cell(&row.mars, "forecast table"),
                jupiter: parse_cell(&row.jupiter, "forecast table"),
                saturn: parse_cell(&row.saturn, "forecast table"),
                uranus: parse_cell(&row.uranus, "forecast table"),
                neptune: parse_cell(&row.neptune, "forecast table"),
                long_range: parse_cell(&row.long_range, "forecast table"),
                pluto: parse_cell(&row.pluto, "forecast table"),
                result: parse_cell(&row.result, "forecast table"),
                support: parse_cell(&row.support, "forecast table"),
                development: parse_cell(&row.development, "forecast table"),
            })
            .collect();

        parsed.sort_by_key(|row| row.age);
        if parsed.windows(2).any(|pair| pair[0].age == pair[1].age) {
            panic!("duplicate forecast age for birth card '{}'", card_str);
        }

        table.insert(birth_card, parsed);
    }
    table
});
