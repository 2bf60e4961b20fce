//! Climate comparison module
//!
//! Compares today's forecast against the extremes of one calendar month of a
//! historical year:
//! - Month extraction from a year of daily samples
//! - Extremes and quartile cut points
//! - Day/night band classification
//! - ASCII range rendering

pub mod bands;
pub mod month;
pub mod range;
pub mod stats;

pub use bands::{classify_day, classify_night};
pub use month::{DAYS_PER_MONTH, MonthTable, extract_month, observed};
pub use range::{range_tokens, render_range};
pub use stats::{Extremum, Quartiles, extremum};

use crate::ClimateError;
use crate::models::{Coordinates, MonthlyExtremes, TemperatureBand};
use crate::weather::HistoricalSource;
use tracing::info;

/// Outcome of comparing one temperature against the month
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub band: TemperatureBand,
    /// Range line from [`render_range`], newline terminated
    pub rendered_range: String,
}

/// A comparison session for one city
pub struct ClimateComparator<S> {
    city_name: String,
    coordinates: Coordinates,
    source: S,
    month_table: MonthTable,
    extremes: Option<MonthlyExtremes>,
}

impl<S: HistoricalSource> ClimateComparator<S> {
    pub fn new(city_name: impl Into<String>, coordinates: Coordinates, source: S) -> Self {
        Self {
            city_name: city_name.into(),
            coordinates,
            source,
            month_table: MonthTable::default(),
            extremes: None,
        }
    }

    #[must_use]
    pub fn with_month_table(mut self, month_table: MonthTable) -> Self {
        self.month_table = month_table;
        self
    }

    #[must_use]
    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    /// Extremes of the last loaded month, if any
    #[must_use]
    pub fn extremes(&self) -> Option<&MonthlyExtremes> {
        self.extremes.as_ref()
    }

    /// Fetch `year` and keep the day and night extremes of `month`.
    ///
    /// Every call fetches the year again; nothing is kept between calls except
    /// the resulting extremes.
    pub async fn load_historical_context(
        &mut self,
        month: u32,
        year: i32,
    ) -> anyhow::Result<MonthlyExtremes> {
        if !(1..=12).contains(&month) {
            return Err(ClimateError::invalid_argument(format!(
                "month must be between 1 and 12, got {month}"
            ))
            .into());
        }

        let history = self.source.fetch_historical(&self.coordinates, year).await?;

        let day = observed(
            extract_month(&history.maxima, month, self.month_table)?,
            month,
            "maximum",
        )?;
        let night = observed(
            extract_month(&history.minima, month, self.month_table)?,
            month,
            "minimum",
        )?;

        let extremes = MonthlyExtremes {
            max_day: extremum(&day, Extremum::Max)?,
            min_day: extremum(&day, Extremum::Min)?,
            max_night: extremum(&night, Extremum::Max)?,
            min_night: extremum(&night, Extremum::Min)?,
        };

        info!(
            city = %self.city_name,
            month,
            year,
            "Monthly extremes: day {:.4}..{:.4}F, night {:.4}..{:.4}F",
            extremes.min_day,
            extremes.max_day,
            extremes.min_night,
            extremes.max_night
        );

        self.extremes = Some(extremes);
        Ok(extremes)
    }

    /// Compare today's maximum against the month's day-time range
    pub fn classify_day_temperature(&self, today: f64) -> crate::Result<Comparison> {
        let extremes = self.loaded()?;
        let quartiles = Quartiles::new(extremes.min_day, extremes.max_day);
        Ok(Comparison {
            band: classify_day(today, &quartiles).into(),
            rendered_range: render_range(extremes.min_day, extremes.max_day, today),
        })
    }

    /// Compare today's minimum against the month's night-time range
    pub fn classify_night_temperature(&self, today: f64) -> crate::Result<Comparison> {
        let extremes = self.loaded()?;
        let quartiles = Quartiles::new(extremes.min_night, extremes.max_night);
        Ok(Comparison {
            band: classify_night(today, &quartiles).into(),
            rendered_range: render_range(extremes.min_night, extremes.max_night, today),
        })
    }

    fn loaded(&self) -> crate::Result<&MonthlyExtremes> {
        self.extremes.as_ref().ok_or_else(|| {
            ClimateError::invalid_argument(
                "historical context not loaded; call load_historical_context first",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayBand, HistoricalYear, NightBand};
    use std::cell::Cell;

    const PARTIAL_YEAR: i32 = 2026;

    /// Serves a synthetic year where December carries the given extremes
    struct FakeSource {
        december: (f64, f64, f64, f64),
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn new(min_day: f64, max_day: f64, min_night: f64, max_night: f64) -> Self {
            Self {
                december: (min_day, max_day, min_night, max_night),
                calls: Cell::new(0),
            }
        }
    }

    impl HistoricalSource for FakeSource {
        async fn fetch_historical(
            &self,
            _coordinates: &Coordinates,
            year: i32,
        ) -> anyhow::Result<HistoricalYear> {
            self.calls.set(self.calls.get() + 1);
            let (min_day, max_day, min_night, max_night) = self.december;
            // outside December the values are far off so a bad slice shows up
            let mut maxima = vec![Some(100.0); 365];
            let mut minima = vec![Some(-10.0); 365];
            for (i, day) in (334..365).enumerate() {
                let t = i as f64 / 30.0;
                maxima[day] = Some(min_day + (max_day - min_day) * t);
                minima[day] = Some(max_night - (max_night - min_night) * t);
            }
            // days after mid-October are not observed yet
            if year == PARTIAL_YEAR {
                maxima[290..].fill(None);
                minima[290..].fill(None);
            }
            Ok(HistoricalYear {
                year,
                maxima,
                minima,
            })
        }
    }

    fn comparator() -> ClimateComparator<FakeSource> {
        ClimateComparator::new(
            "Huntington Beach",
            Coordinates::new(33.6603, -117.9992),
            FakeSource::new(60.4157, 74.9957, 46.9157, 58.9957),
        )
    }

    #[tokio::test]
    async fn test_load_historical_context() {
        let mut comparator = comparator();
        let extremes = comparator.load_historical_context(12, 2023).await.unwrap();
        assert!((extremes.max_day - 74.9957).abs() < 1e-9);
        assert!((extremes.min_day - 60.4157).abs() < 1e-9);
        assert!((extremes.max_night - 58.9957).abs() < 1e-9);
        assert!((extremes.min_night - 46.9157).abs() < 1e-9);
        assert_eq!(comparator.extremes(), Some(&extremes));
    }

    #[tokio::test]
    async fn test_reload_is_idempotent_and_refetches() {
        let mut comparator = comparator();
        let first = comparator.load_historical_context(12, 2023).await.unwrap();
        let second = comparator.load_historical_context(12, 2023).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(comparator.source.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_invalid_month_does_not_fetch() {
        let mut comparator = comparator();
        let err = comparator.load_historical_context(13, 2023).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClimateError>(),
            Some(ClimateError::InvalidArgument { .. })
        ));
        assert_eq!(comparator.source.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_classify_after_load() {
        let mut comparator = comparator();
        comparator.load_historical_context(12, 2023).await.unwrap();

        let day = comparator.classify_day_temperature(67.5).unwrap();
        assert_eq!(day.band, TemperatureBand::Day(DayBand::Average));
        assert!(day.rendered_range.starts_with("60F "));
        assert!(day.rendered_range.contains("(today 68F)"));
        assert!(day.rendered_range.ends_with("75F\n"));

        let night = comparator.classify_night_temperature(46.0).unwrap();
        assert_eq!(night.band, TemperatureBand::Night(NightBand::RecordCold));
        assert!(night.rendered_range.starts_with("(today 46F) 47F "));
    }

    #[tokio::test]
    async fn test_partial_year_loads_observed_months() {
        let mut comparator = comparator();
        let january = comparator
            .load_historical_context(1, PARTIAL_YEAR)
            .await
            .unwrap();
        assert_eq!(january.max_day, 100.0);
        assert_eq!(january.min_night, -10.0);

        let err = comparator
            .load_historical_context(12, PARTIAL_YEAR)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClimateError>(),
            Some(ClimateError::InvalidArgument { .. })
        ));
        // the failed load leaves the previous month in place
        assert_eq!(comparator.extremes(), Some(&january));
    }

    #[test]
    fn test_classify_before_load() {
        let err = comparator().classify_day_temperature(60.0).unwrap_err();
        assert!(matches!(err, ClimateError::InvalidArgument { .. }));
    }
}
