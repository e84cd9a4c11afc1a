//! Planetary period scheduling: forecast -> seven dated windows.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::Card;

use super::forecast::ForecastRecord;

/// The seven period planets, in their fixed scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    /// Scheduling order. Significant and never resorted.
    pub const IN_ORDER: [Planet; 7] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }
}

/// Window lengths in planet order: six 52-day windows and a closing 53-day
/// window, partitioning exactly 365 days.
const PERIOD_LENGTHS: [i64; 7] = [52, 52, 52, 52, 52, 52, 53];

/// One planetary window within an age-year. Derived on demand, never
/// persisted on its own. `[start_date, end_date)` is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetaryPeriod {
    pub planet: Planet,
    pub card: Option<Card>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
}

/// Anchor policy: the birthday in year `birth_year + age`, independent of
/// the wall clock. A February 29 birthday in a non-leap anchor year rolls
/// forward to March 1.
fn anchor_birthday(birthdate: NaiveDate, age: u32) -> NaiveDate {
    let year = birthdate.year() + age as i32;
    NaiveDate::from_ymd_opt(year, birthdate.month(), birthdate.day()).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, 3, 1).expect("March 1 exists in every year")
    })
}

/// Schedule the seven planetary periods for a forecast within the
/// age-year anchored at the child's birthday.
///
/// Always returns exactly seven periods in Mercury..Neptune order; the
/// last period's end equals the first period's start plus 365 days.
/// `today` is taken as a parameter so the function stays pure; at most one
/// period contains it, and a `today` outside all windows simply marks
/// nothing current.
pub fn schedule_planetary_periods(
    forecast: &ForecastRecord,
    birthdate: NaiveDate,
    age: u32,
    today: NaiveDate,
) -> Vec<PlanetaryPeriod> {
    let anchor = anchor_birthday(birthdate, age);

    let mut periods = Vec::with_capacity(Planet::IN_ORDER.len());
    let mut start = anchor;
    for (planet, length) in Planet::IN_ORDER.iter().zip(PERIOD_LENGTHS) {
        let end = start + Duration::days(length);
        periods.push(PlanetaryPeriod {
            planet: *planet,
            card: planetary_card(forecast, *planet),
            start_date: start,
            end_date: end,
            is_current: today >= start && today < end,
        });
        start = end;
    }
    periods
}

/// The forecast card belonging to a period planet.
fn planetary_card(forecast: &ForecastRecord, planet: Planet) -> Option<Card> {
    match planet {
        Planet::Mercury => forecast.mercury,
        Planet::Venus => forecast.venus,
        Planet::Mars => forecast.mars,
        Planet::Jupiter => forecast.jupiter,
        Planet::Saturn => forecast.saturn,
        Planet::Uranus => forecast.uranus,
        Planet::Neptune => forecast.neptune,
    }
}
