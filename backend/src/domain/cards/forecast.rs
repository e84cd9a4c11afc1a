//! Yearly forecast resolution: (birth card, age) -> twelve derived cards.

use serde::{Deserialize, Serialize};
use shared::Card;

use super::tables::FORECAST_TABLE;

/// The twelve-card forecast for a birth card at a given age: seven
/// planetary cards plus the long range, pluto, result, support and
/// development cards.
///
/// A field is `None` where the table cell was blank. That is distinct from
/// a lookup miss: `resolve_yearly_forecast` returns `None` for the whole
/// record when no row exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub birth_card: Card,
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

/// Resolve the yearly forecast for a birth card at an age.
///
/// Deterministic: identical inputs always yield identical output. Returns
/// `None` when the birth card has no table entry or no row matches the
/// age.
pub fn resolve_yearly_forecast(birth_card: Card, age: u32) -> Option<ForecastRecord> {
    let rows = FORECAST_TABLE.get(&birth_card)?;
    let row = rows.iter().find(|row| row.age == age)?;

    Some(ForecastRecord {
        birth_card,
        age,
        mercury: row.mercury,
        venus: row.venus,
        mars: row.mars,
        jupiter: row.jupiter,
        saturn: row.saturn,
        uranus: row.uranus,
        neptune: row.neptune,
        long_range: row.long_range,
        pluto: row.pluto,
        result: row.result,
        support: row.support,
        development: row.development,
    })
}
