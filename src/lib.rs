//! `climate-compare` - how does today's weather compare with the month's history?
//!
//! Resolves a place name, fetches a year of daily temperatures and today's
//! forecast from Open-Meteo, and classifies today's maximum and minimum
//! against the extremes recorded for one calendar month.

pub mod cache;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod open_meteo;
pub mod report;
pub mod weather;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use comparator::{ClimateComparator, Comparison, MonthTable};
pub use config::ClimateConfig;
pub use error::ClimateError;
pub use location_resolver::LocationResolver;
pub use models::{
    Coordinates, DayBand, ForecastSample, HistoricalYear, MonthlyExtremes, NightBand,
    TemperatureBand,
};
pub use open_meteo::OpenMeteoClient;
pub use weather::{DEFAULT_YEAR, HistoricalSource, WeatherDataSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the pure statistics operations
pub type Result<T> = std::result::Result<T, ClimateError>;
