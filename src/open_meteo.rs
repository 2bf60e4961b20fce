//! HTTP client for the Open-Meteo geocoding, archive and forecast APIs
//!
//! Requests go through a `reqwest` client wrapped in retry middleware with
//! exponential backoff. Archive and forecast responses can additionally be
//! kept in a [`PersistentCache`], keyed by request URL: archives of a finished
//! period never change and are kept forever, everything else expires after the
//! configured forecast TTL.

use crate::cache::PersistentCache;
use crate::config::{ApiConfig, ClimateConfig};
use crate::models::Coordinates;
use crate::ClimateError;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Daily variables requested from both weather endpoints, in this order
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min";

/// How long a response may be served from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Always hit the network
    Bypass,
    /// Keep the response forever
    Forever,
    /// Keep the response for the given duration
    For(Duration),
}

impl CachePolicy {
    fn ttl(self) -> Option<Duration> {
        match self {
            CachePolicy::For(ttl) => Some(ttl),
            CachePolicy::Forever | CachePolicy::Bypass => None,
        }
    }
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

impl From<&GeocodingResult> for Coordinates {
    fn from(result: &GeocodingResult) -> Self {
        Coordinates::new(result.latitude, result.longitude)
    }
}

/// Archive or forecast response with daily aggregates
#[derive(Debug, Deserialize)]
pub struct DailyResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: Option<DailyData>,
}

/// Daily temperature data, one entry per day in request order
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
}

/// Error body returned by `OpenMeteo` on 4xx responses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    reason: String,
}

pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    api: ApiConfig,
    cache: Option<PersistentCache>,
    forecast_ttl: Duration,
}

impl OpenMeteoClient {
    /// Create a client from configuration, opening the response cache if enabled
    pub fn new(config: &ClimateConfig) -> Result<Self> {
        let cache = if config.cache.enabled {
            let cache = PersistentCache::open(&config.cache.location)
                .map_err(|e| ClimateError::cache(format!("{e:#}")))
                .with_context(|| {
                    format!("Failed to open cache database at {}", config.cache.location)
                })?;
            Some(cache)
        } else {
            None
        };

        Self::with_cache(&config.api, cache, config.cache.forecast_ttl())
    }

    /// Create a client with an explicit (possibly absent) cache
    pub fn with_cache(
        api: &ApiConfig,
        cache: Option<PersistentCache>,
        forecast_ttl: Duration,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(api.timeout_seconds.into());

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(10))
            .build_with_max_retries(api.max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api: api.clone(),
            cache,
            forecast_ttl,
        })
    }

    /// Look up candidates for a place name, best match first
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.api.geocoding_url,
            urlencoding::encode(name)
        );

        let response: GeocodingResponse = self.get_json(&url, CachePolicy::Bypass).await?;
        Ok(response.results.unwrap_or_default())
    }

    /// Daily max/min temperatures between `start` and `end`, inclusive
    #[instrument(skip(self))]
    pub async fn daily_archive(
        &self,
        coordinates: &Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyData> {
        let url = format!(
            "{}/archive?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&temperature_unit=fahrenheit&wind_speed_unit=mph&precipitation_unit=inch&timezone={}",
            self.api.archive_url,
            coordinates.latitude,
            coordinates.longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            DAILY_VARIABLES,
            urlencoding::encode(&self.api.timezone)
        );

        let policy = self.archive_policy(end, Utc::now().date_naive());
        let response: DailyResponse = self.get_json(&url, policy).await?;
        Self::daily_data(response)
    }

    /// Daily max/min temperature forecast for the next `days` days
    #[instrument(skip(self))]
    pub async fn daily_forecast(&self, coordinates: &Coordinates, days: u8) -> Result<DailyData> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&temperature_unit=fahrenheit&wind_speed_unit=mph&timezone={}&forecast_days={}",
            self.api.forecast_url,
            coordinates.latitude,
            coordinates.longitude,
            DAILY_VARIABLES,
            urlencoding::encode(&self.api.timezone),
            days
        );

        let response: DailyResponse = self
            .get_json(&url, CachePolicy::For(self.forecast_ttl))
            .await?;
        Self::daily_data(response)
    }

    /// Archives ending before `today` are final; later days may still be filled in
    fn archive_policy(&self, end: NaiveDate, today: NaiveDate) -> CachePolicy {
        if end < today {
            CachePolicy::Forever
        } else {
            CachePolicy::For(self.forecast_ttl)
        }
    }

    fn daily_data(response: DailyResponse) -> Result<DailyData> {
        response.daily.ok_or_else(|| {
            ClimateError::api(format!(
                "Response for ({:.4}, {:.4}) has no daily data",
                response.latitude, response.longitude
            ))
            .into()
        })
    }

    /// GET `url` and decode the JSON body, going through the cache per `policy`
    async fn get_json<T: DeserializeOwned>(&self, url: &str, policy: CachePolicy) -> Result<T> {
        let body = match (&self.cache, policy) {
            (Some(cache), CachePolicy::Forever | CachePolicy::For(_)) => {
                let cached = cache
                    .get::<String>(url)
                    .await
                    .map_err(|e| ClimateError::cache(format!("Failed to read {url}: {e:#}")))?;
                if let Some(body) = cached {
                    debug!("Serving {} from cache", url);
                    body
                } else {
                    let body = self.fetch(url).await?;
                    cache
                        .put(url, body.clone(), policy.ttl())
                        .await
                        .map_err(|e| ClimateError::cache(format!("Failed to store {url}: {e:#}")))?;
                    body
                }
            }
            _ => self.fetch(url).await?,
        };

        serde_json::from_str(&body).map_err(|e| {
            ClimateError::api(format!("Invalid response from {url}: {e}")).into()
        })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("OpenMeteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClimateError::api(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClimateError::api(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.reason)
                .unwrap_or(body);
            warn!("OpenMeteo returned {}: {}", status, reason);
            return Err(ClimateError::api(format!("HTTP {status}: {reason}")).into());
        }

        let duration = start_time.elapsed();
        info!("Fetched {} bytes in {:.3}s", body.len(), duration.as_secs_f64());
        if duration.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", duration.as_secs_f64());
        }

        Ok(body)
    }
}
