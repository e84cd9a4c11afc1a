//! Age calculation.

use chrono::{Datelike, NaiveDate};

/// Completed years between `birthdate` and `today`, decrementing when the
/// birthday has not yet occurred in `today`'s year.
///
/// Returns `None` when `today` precedes the birthdate; that input should
/// have been rejected at the boundary.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    if today < birthdate {
        return None;
    }

    let mut age = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    Some(age as u32)
}
