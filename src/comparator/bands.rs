//! Classification of today's temperature against a month's range
//!
//! Checks run in a fixed order and the first match wins. Day-time checks look
//! for heat (`>`), night-time checks look for cold (`<`). In both cases a value
//! that rounds to the same whole degree as the midpoint is `Average`.

use super::stats::Quartiles;
use crate::models::{DayBand, NightBand};

/// Band of today's maximum within the month's day-time range
#[must_use]
pub fn classify_day(today: f64, q: &Quartiles) -> DayBand {
    if today > q.max {
        DayBand::RecordHeat
    } else if today > q.q3 {
        DayBand::ConsiderablyWarm
    } else if today > q.q2 {
        DayBand::ModeratelyWarm
    } else if today.round() == q.q2.round() {
        DayBand::Average
    } else if today > q.q1 {
        DayBand::ModeratelyCold
    } else if today > q.min {
        DayBand::ConsiderablyCold
    } else {
        DayBand::ExtremelyCold
    }
}

/// Band of today's minimum within the month's night-time range
#[must_use]
pub fn classify_night(today: f64, q: &Quartiles) -> NightBand {
    if today < q.min {
        NightBand::RecordCold
    } else if today < q.q1 {
        NightBand::ConsiderablyCold
    } else if today < q.q2 {
        NightBand::ModeratelyCold
    } else if today.round() == q.q2.round() {
        NightBand::Average
    } else if today < q.q3 {
        NightBand::ModeratelyWarm
    } else if today < q.max {
        NightBand::ConsiderablyWarm
    } else {
        NightBand::ExtremelyHot
    }
}
