//! Data models for climate-compare
//!
//! - Location: resolved coordinates
//! - Weather: daily temperature series and today's forecast
//! - Band: classification of a temperature against monthly extremes

pub mod band;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use band::{DayBand, NightBand, TemperatureBand};
pub use location::Coordinates;
pub use weather::{DailySeries, ForecastSample, HistoricalYear, MonthlyExtremes};
