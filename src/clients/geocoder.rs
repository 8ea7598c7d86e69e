use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::geo::Coordinates;

/// Resolves a US ZIP code to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Ok(None) means the service answered but found no match
    async fn zip_to_coordinates(&self, zip: &str) -> Result<Option<Coordinates>>;
}

/// Google Geocoding API client
pub struct MapsGeocoder {
    http: reqwest::Client,
    api_key: String,
}

impl MapsGeocoder {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl Geocoder for MapsGeocoder {
    async fn zip_to_coordinates(&self, zip: &str) -> Result<Option<Coordinates>> {
        if self.api_key.is_empty() {
            return Err(AppError::Geocoding("MAPS_API_KEY is not set".to_string()));
        }

        let response: GeocodeResponse = self
            .http
            .get("https://maps.googleapis.com/maps/api/geocode/json")
            .query(&[("address", zip), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response.results.first().map(|r| Coordinates {
                lat: r.geometry.location.lat,
                lng: r.geometry.location.lng,
            })),
            "ZERO_RESULTS" => Ok(None),
            other => Err(AppError::Geocoding(format!(
                "geocoding API returned status {}",
                other
            ))),
        }
    }
}
