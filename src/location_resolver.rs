//! Location Resolution Module
//!
//! Resolves a free-text place name into coordinates through the Open-Meteo
//! geocoding API. An unknown place is not an error: the resolver reports it and
//! returns `None`, and the caller decides what to do.

use crate::models::Coordinates;
use crate::open_meteo::OpenMeteoClient;
use anyhow::Result;
use tracing::{debug, warn};

/// Service for resolving place names
pub struct LocationResolver<'a> {
    api_client: &'a OpenMeteoClient,
}

impl<'a> LocationResolver<'a> {
    #[must_use]
    pub fn new(api_client: &'a OpenMeteoClient) -> Self {
        Self { api_client }
    }

    /// Resolve a place name to the coordinates of the best geocoding match
    pub async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        debug!("Geocoding location name: {}", place_name);

        let results = self.api_client.geocode(place_name).await?;
        let Some(best) = results.first() else {
            warn!("LOCATION {} NOT FOUND", place_name);
            return Ok(None);
        };

        debug!(
            "Found location: {} ({:.4}, {:.4}) in {}",
            best.name,
            best.latitude,
            best.longitude,
            best.country.as_deref().unwrap_or("unknown country")
        );

        Ok(Some(Coordinates::from(best)))
    }
}
