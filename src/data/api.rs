//! Upstream MGNREGA performance API integration.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::RawRecord;
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Slow responses surface as a network failure instead of hanging the
/// dashboard indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source label used when the payload does not carry one.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One fetch cycle's worth of records plus their provenance label.
#[derive(Debug, Clone)]
pub struct PerformancePayload {
    pub source: String,
    pub records: Vec<RawRecord>,
}

#[derive(Debug, Clone)]
pub struct PerfClient {
    client: Client,
    base_url: String,
}

impl PerfClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("MGNREGA_API_BASE")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Fetch performance records, optionally filtered server-side by state.
    ///
    /// The backend answers with either a bare array of records, a
    /// `{source, data}` envelope, or a single record; all three shapes are
    /// accepted.
    pub fn fetch_performance(&self, state: Option<&str>) -> Result<PerformancePayload, AppError> {
        let url = format!("{}/mgnrega/performance", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(state) = state {
            request = request.query(&[("state", state)]);
        }

        let response = request
            .send()
            .map_err(|e| AppError::network(format!("Performance request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::network(format!(
                "Performance request failed with status {}.",
                response.status()
            )));
        }

        let body: PerformanceBody = response
            .json()
            .map_err(|e| AppError::network(format!("Failed to parse performance response: {e}")))?;
        Ok(body.into_payload())
    }

    /// Fetch the list of district identifiers known to the backend.
    pub fn fetch_districts(&self) -> Result<Vec<String>, AppError> {
        let url = format!("{}/districts", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::network(format!("Districts request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::network(format!(
                "Districts request failed with status {}.",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|e| AppError::network(format!("Failed to parse districts response: {e}")))
    }

    /// Fetch one district's records.
    pub fn fetch_district(&self, name: &str) -> Result<Vec<RawRecord>, AppError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("Invalid API base URL '{}'.", self.base_url)))?
            .push("district")
            .push(name);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::network(format!("District request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::network(format!(
                "District request failed with status {}.",
                response.status()
            )));
        }
        let body: PerformanceBody = response
            .json()
            .map_err(|e| AppError::network(format!("Failed to parse district response: {e}")))?;
        Ok(body.into_payload().records)
    }
}

/// The payload shapes the backend is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PerformanceBody {
    Envelope {
        source: Option<String>,
        data: Vec<RawRecord>,
    },
    Records(Vec<RawRecord>),
    Single(RawRecord),
}

impl PerformanceBody {
    fn into_payload(self) -> PerformancePayload {
        match self {
            PerformanceBody::Envelope { source, data } => PerformancePayload {
                source: source
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                records: data,
            },
            PerformanceBody::Records(records) => PerformancePayload {
                source: UNKNOWN_SOURCE.to_string(),
                records,
            },
            PerformanceBody::Single(record) => PerformancePayload {
                source: UNKNOWN_SOURCE.to_string(),
                records: vec![record],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> PerformancePayload {
        serde_json::from_value::<PerformanceBody>(value)
            .expect("payload must deserialize")
            .into_payload()
    }

    #[test]
    fn bare_array_payload_defaults_source() {
        let payload = parse(json!([{ "District Name": "A" }, { "District Name": "B" }]));
        assert_eq!(payload.source, UNKNOWN_SOURCE);
        assert_eq!(payload.records.len(), 2);
    }

    #[test]
    fn envelope_payload_extracts_data_and_source() {
        let payload = parse(json!({
            "source": "data.gov.in",
            "data": [{ "District Name": "A" }],
        }));
        assert_eq!(payload.source, "data.gov.in");
        assert_eq!(payload.records.len(), 1);
    }

    #[test]
    fn envelope_without_source_defaults_to_unknown() {
        let payload = parse(json!({ "data": [] }));
        assert_eq!(payload.source, UNKNOWN_SOURCE);
        assert!(payload.records.is_empty());
    }

    #[test]
    fn single_record_payload_wraps_into_one_element() {
        let payload = parse(json!({ "District Name": "A", "StateName": "Bihar" }));
        assert_eq!(payload.records.len(), 1);
    }
}
