use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Card;

use crate::domain::cards::{ForecastRecord, PlanetaryPeriod};

/// A computed reading snapshot for a child: birth card, yearly forecast
/// and planetary periods as of the moment it was computed.
///
/// A lookup miss is still a well-formed reading: `birth_card` or
/// `forecast` is simply `None` and `periods` empty, which renders as a
/// "no data available" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    pub child_id: String,
    pub birth_card: Option<Card>,
    pub card_name: Option<String>,
    pub age: u32,
    pub forecast: Option<ForecastRecord>,
    pub periods: Vec<PlanetaryPeriod>,
    pub computed_at: DateTime<Utc>,
}

impl Reading {
    /// Generate a unique ID for a reading snapshot
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("reading::{}", timestamp_millis)
    }
}
