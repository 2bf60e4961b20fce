//! Temperature series and forecast models

use serde::{Deserialize, Serialize};

/// One value per day of a calendar year, index 0 = January 1, in °F.
/// `None` marks a day the archive has not observed (yet).
pub type DailySeries = Vec<Option<f64>>;

/// A year of daily maximum and minimum temperatures, aligned by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalYear {
    pub year: i32,
    /// Daily maximum (day-time) temperatures
    pub maxima: DailySeries,
    /// Daily minimum (night-time) temperatures
    pub minima: DailySeries,
}

/// Today's forecast maximum and minimum, in °F
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub max_day_temp: f64,
    pub min_day_temp: f64,
}

/// Highest and lowest daily maxima (day) and daily minima (night) of a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExtremes {
    pub max_day: f64,
    pub min_day: f64,
    pub max_night: f64,
    pub min_night: f64,
}
