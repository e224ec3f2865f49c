//! Free-text location resolution via the Nominatim geocoding service.
//!
//! The forward lookup takes the first returned candidate as authoritative;
//! there is no ranking or disambiguation. The reverse lookup only feeds the
//! dashboard header and degrades to an empty [`Place`] on failure.

use crate::client::HttpClient;
use crate::models::{Coordinate, Place};
use crate::{Result, WxError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Geocoder backed by a Nominatim-compatible endpoint.
#[derive(Debug)]
pub struct Geocoder {
    http: Arc<HttpClient>,
    base_url: String,
}

/// One candidate from a forward search. Nominatim returns coordinates as
/// decimal strings.
#[derive(Debug, Deserialize)]
pub struct SearchCandidate {
    pub lat: String,
    pub lon: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReverseAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: ReverseAddress,
}

impl Geocoder {
    #[must_use]
    pub fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Resolve a free-text location to coordinates.
    ///
    /// The input is forwarded verbatim (URL-encoded); zero candidates yield
    /// [`WxError::NotFound`]. A single failed attempt propagates without
    /// retry.
    #[instrument(skip(self))]
    pub async fn resolve(&self, location: &str) -> Result<Coordinate> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WxError::validation("location cannot be empty"));
        }

        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(location)
        );
        let candidates: Vec<SearchCandidate> = self.http.get_json(&url).await?;

        let coordinate = coordinate_from_candidates(candidates, location)?;
        debug!("Resolved '{location}' to {coordinate}");
        Ok(coordinate)
    }

    /// Reverse-geocode a coordinate into a city/state pair for display.
    /// Missing address fields become empty strings, not errors.
    #[instrument(skip(self))]
    pub async fn reverse(&self, coordinate: &Coordinate) -> Result<Place> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=10",
            self.base_url, coordinate.latitude, coordinate.longitude
        );
        let response: ReverseResponse = self.http.get_json(&url).await?;
        Ok(place_from_address(response.address))
    }
}

/// Take the first candidate and parse its decimal-string coordinates.
pub(crate) fn coordinate_from_candidates(
    candidates: Vec<SearchCandidate>,
    location: &str,
) -> Result<Coordinate> {
    let first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| WxError::not_found(location))?;

    let latitude = first
        .lat
        .parse::<f64>()
        .map_err(|_| WxError::fetch(format!("geocoder returned non-numeric latitude '{}'", first.lat)))?;
    let longitude = first
        .lon
        .parse::<f64>()
        .map_err(|_| WxError::fetch(format!("geocoder returned non-numeric longitude '{}'", first.lon)))?;

    Ok(Coordinate::new(latitude, longitude))
}

/// City falls back through town, village, and hamlet, matching how the
/// service labels settlements of different sizes.
pub(crate) fn place_from_address(address: ReverseAddress) -> Place {
    let city = address
        .city
        .or(address.town)
        .or(address.village)
        .or(address.hamlet)
        .unwrap_or_default();
    let state = address.state.unwrap_or_default();
    Place { city, state }
}
