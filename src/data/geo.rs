//! Reverse geocoding of configured coordinates.
//!
//! There is no browser geolocation in a terminal, so coordinates come from
//! configuration (`MGNREGA_LAT` / `MGNREGA_LON`). Detection failure of any
//! kind is advisory: it mutates status text, never the dataset.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_GEOCODER_BASE: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim asks API consumers to identify themselves.
const USER_AGENT: &str = concat!("nrega-dash/", env!("CARGO_PKG_VERSION"));

/// A configured latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationFix {
    /// Read coordinates from the environment; `None` when not configured.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();
        let latitude = std::env::var("MGNREGA_LAT").ok()?.trim().parse().ok()?;
        let longitude = std::env::var("MGNREGA_LON").ok()?.trim().parse().ok()?;
        Some(Self { latitude, longitude })
    }
}

/// The slice of the geocoder's address object we care about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub district: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
}

impl Address {
    /// Best place name: `district`, then `city`, then `county`.
    pub fn place_name(&self) -> Option<&str> {
        [
            self.district.as_deref(),
            self.city.as_deref(),
            self.county.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
}

impl GeoClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("MGNREGA_GEOCODER_BASE")
            .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE.to_string());
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build geocoder client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve coordinates to a place name; `Ok(None)` means the geocoder
    /// answered but could not name the place.
    pub fn reverse(&self, fix: LocationFix) -> Result<Option<String>, AppError> {
        let url = format!("{}/reverse", self.base_url);
        let lat = fix.latitude.to_string();
        let lon = fix.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("format", "jsonv2"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .map_err(|e| AppError::network(format!("Reverse geocode request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::network(format!(
                "Reverse geocode failed with status {}.",
                response.status()
            )));
        }

        let body: ReverseResponse = response
            .json()
            .map_err(|e| AppError::network(format!("Failed to parse geocoder response: {e}")))?;
        Ok(body.address.place_name().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_name_prefers_district_then_city_then_county() {
        let address = Address {
            district: Some("Alwar".to_string()),
            city: Some("Jaipur".to_string()),
            county: Some("Rajasthan".to_string()),
        };
        assert_eq!(address.place_name(), Some("Alwar"));

        let address = Address {
            district: None,
            city: Some("Jaipur".to_string()),
            county: Some("Rajasthan".to_string()),
        };
        assert_eq!(address.place_name(), Some("Jaipur"));

        let address = Address {
            district: Some("  ".to_string()),
            city: None,
            county: Some("Rajasthan".to_string()),
        };
        assert_eq!(address.place_name(), Some("Rajasthan"));
    }

    #[test]
    fn place_name_empty_address_is_none() {
        assert_eq!(Address::default().place_name(), None);
    }

    #[test]
    fn reverse_response_tolerates_missing_address() {
        let body: ReverseResponse = serde_json::from_str("{}").expect("parses");
        assert_eq!(body.address.place_name(), None);

        let body: ReverseResponse = serde_json::from_str(
            r#"{ "address": { "city": "Patna", "country": "India" } }"#,
        )
        .expect("parses");
        assert_eq!(body.address.place_name(), Some("Patna"));
    }
}
