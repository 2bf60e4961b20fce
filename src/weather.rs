//! Historical and forecast temperatures for resolved coordinates

use crate::models::{Coordinates, DailySeries, ForecastSample, HistoricalYear};
use crate::open_meteo::{DailyData, OpenMeteoClient};
use crate::ClimateError;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Year the historical extremes are taken from when none is given
pub const DEFAULT_YEAR: i32 = 2023;

/// Anything that can provide a calendar year of daily max/min temperatures
///
/// Only awaited on the current-thread runtime, so the returned futures carry
/// no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait HistoricalSource {
    async fn fetch_historical(
        &self,
        coordinates: &Coordinates,
        year: i32,
    ) -> Result<HistoricalYear>;
}

/// Weather data from the Open-Meteo archive and forecast APIs
pub struct WeatherDataSource<'a> {
    api_client: &'a OpenMeteoClient,
}

impl<'a> WeatherDataSource<'a> {
    #[must_use]
    pub fn new(api_client: &'a OpenMeteoClient) -> Self {
        Self { api_client }
    }

    /// Daily max/min temperatures (°F) for January 1 to December 31 of `year`
    #[instrument(skip(self))]
    pub async fn fetch_historical(
        &self,
        coordinates: &Coordinates,
        year: i32,
    ) -> Result<HistoricalYear> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ClimateError::invalid_argument(format!("Invalid year {year}")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| ClimateError::invalid_argument(format!("Invalid year {year}")))?;

        let daily = self.api_client.daily_archive(coordinates, start, end).await?;
        let (maxima, minima) = into_series(daily)?;

        let observed = maxima.iter().filter(|t| t.is_some()).count();
        info!(
            "Retrieved {} days of historical temperatures ({} observed) for {} at {}",
            maxima.len(),
            observed,
            year,
            coordinates
        );

        Ok(HistoricalYear {
            year,
            maxima,
            minima,
        })
    }

    /// Today's forecast max/min temperature (°F)
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, coordinates: &Coordinates) -> Result<ForecastSample> {
        let daily = self.api_client.daily_forecast(coordinates, 1).await?;
        let (maxima, minima) = into_series(daily)?;

        let (Some(Some(max_day_temp)), Some(Some(min_day_temp))) =
            (maxima.first().copied(), minima.first().copied())
        else {
            return Err(ClimateError::api("Forecast for today has no max/min temperature").into());
        };

        debug!(
            "Forecast for today: max {:.1}F, min {:.1}F",
            max_day_temp, min_day_temp
        );

        Ok(ForecastSample {
            max_day_temp,
            min_day_temp,
        })
    }
}

impl HistoricalSource for WeatherDataSource<'_> {
    async fn fetch_historical(
        &self,
        coordinates: &Coordinates,
        year: i32,
    ) -> Result<HistoricalYear> {
        WeatherDataSource::fetch_historical(self, coordinates, year).await
    }
}

/// Split the daily block into aligned max/min series, keeping unobserved days
fn into_series(daily: DailyData) -> Result<(DailySeries, DailySeries)> {
    if daily.temperature_max.len() != daily.temperature_min.len()
        || daily.temperature_max.len() != daily.time.len()
    {
        return Err(ClimateError::api(format!(
            "Daily series are misaligned ({} days, {} maxima, {} minima)",
            daily.time.len(),
            daily.temperature_max.len(),
            daily.temperature_min.len()
        ))
        .into());
    }

    Ok((daily.temperature_max, daily.temperature_min))
}
