//! Google Geocoding API adapter.

use serde::Deserialize;

use crate::error::ResolveError;
use crate::model::Coordinate;
use crate::traits::CoordinateResolver;

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
}

impl GoogleGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/maps/api/geocode/json", self.config.base_url.trim_end_matches('/'))
    }
}

impl CoordinateResolver for GoogleGeocoder {
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("address", address), ("key", self.config.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        let body = response.json::<GeocodeResponse>()?;
        body.into_coordinate()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    /// First result wins. A missing `status` is tolerated as long as there
    /// are results.
    fn into_coordinate(self) -> Result<Coordinate, ResolveError> {
        match self.status.as_str() {
            "" | "OK" => {}
            "ZERO_RESULTS" => return Err(ResolveError::NoResults),
            other => {
                return Err(ResolveError::Rejected {
                    status: other.to_string(),
                    message: self.error_message.unwrap_or_default(),
                });
            }
        }

        self.results
            .into_iter()
            .next()
            .map(|result| Coordinate::new(result.geometry.location.lat, result.geometry.location.lng))
            .ok_or(ResolveError::NoResults)
    }
}
