//! Slicing a year of daily samples into one calendar month

use crate::ClimateError;
use serde::{Deserialize, Serialize};

/// Days per month of a non-leap year
pub const DAYS_PER_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// How month offsets are computed within a daily series
///
/// `Canonical` always uses the 28-day February table, so in a 366-day series
/// every month from March onward starts one day early. `Calendar` gives
/// February 29 days when the series has 366 entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthTable {
    #[default]
    Canonical,
    Calendar,
}

impl MonthTable {
    #[must_use]
    pub fn from_leap_aware(leap_aware: bool) -> Self {
        if leap_aware {
            MonthTable::Calendar
        } else {
            MonthTable::Canonical
        }
    }

    /// Month lengths to use for a series of `series_len` days
    #[must_use]
    pub fn month_lengths(self, series_len: usize) -> [usize; 12] {
        let mut lengths = DAYS_PER_MONTH;
        if self == MonthTable::Calendar && series_len == 366 {
            lengths[1] = 29;
        }
        lengths
    }
}

/// Returns the samples of `month` (1 = January) from a year-long `series`.
pub fn extract_month<T>(series: &[T], month: u32, table: MonthTable) -> crate::Result<&[T]> {
    if !(1..=12).contains(&month) {
        return Err(ClimateError::invalid_argument(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }

    let lengths = table.month_lengths(series.len());
    let index = (month - 1) as usize;
    let offset: usize = lengths[..index].iter().sum();
    let end = offset + lengths[index];

    series.get(offset..end).ok_or_else(|| {
        ClimateError::invalid_argument(format!(
            "series of {} days is too short for month {month} (needs {end})",
            series.len()
        ))
    })
}

/// Unwraps the samples of one month, failing if any day is unobserved.
///
/// The current year is only partly observed, so gaps are checked per month
/// rather than for the whole year.
pub fn observed(samples: &[Option<f64>], month: u32, label: &str) -> crate::Result<Vec<f64>> {
    let missing = samples.iter().filter(|s| s.is_none()).count();
    if missing > 0 {
        return Err(ClimateError::invalid_argument(format!(
            "{missing} of {} {label} temperatures of month {month} are not observed yet",
            samples.len()
        )));
    }
    Ok(samples.iter().flatten().copied().collect())
}
