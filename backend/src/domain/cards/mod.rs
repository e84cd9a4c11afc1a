//! Card lookup core.
//!
//! Three table-driven resolvers composed in sequence:
//! calendar date -> birth card ([`birth_card`]), (birth card, age) ->
//! twelve-card forecast ([`forecast`]), forecast -> seven dated planetary
//! windows ([`periods`]). Every function here is pure and total: a missing
//! table entry is an explicit `None`, never a panic.

pub mod age;
pub mod birth_card;
pub mod forecast;
pub mod periods;
pub mod tables;

pub use age::age_on;
pub use birth_card::{birth_card_for_date, resolve_birth_card};
pub use forecast::{resolve_yearly_forecast, ForecastRecord};
pub use periods::{schedule_planetary_periods, Planet, PlanetaryPeriod};
pub use tables::BirthCardEntry;
