//! Birth card resolution: calendar day -> card.

use chrono::{Datelike, NaiveDate};

use super::tables::{BirthCardEntry, BIRTHDATE_TABLE};

/// Resolve the birth card for a `(month, day)` pair. The lookup is
/// year-independent; February 29 is a valid distinct key.
///
/// Returns `None` when the pair has no table entry (including impossible
/// days such as February 30) — a displayable "no data" state, never an
/// error.
pub fn resolve_birth_card(month: u32, day: u32) -> Option<&'static BirthCardEntry> {
    BIRTHDATE_TABLE.get(&(month, day))
}

/// Resolve the birth card for a calendar date. Working on `NaiveDate`
/// keeps the lookup free of timezone-induced day shifts; the year is
/// ignored.
pub fn birth_card_for_date(date: NaiveDate) -> Option<&'static BirthCardEntry> {
    resolve_birth_card(date.month(), date.day())
}
