use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use roadmend_geo::LonLat;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LOOKUP_URL: &str = "https://api.maptiler.com/geocoding";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// A failed lookup. Distinct from a lookup that found nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("lookup timed out")]
    Timeout,

    #[error("lookup request failed: {0}")]
    Transport(String),

    #[error("lookup service answered with status {0}")]
    Status(u16),

    #[error("lookup response could not be decoded: {0}")]
    Decode(String),

    #[error("lookup client could not be created: {0}")]
    Client(String),
}

/// Resolves a position to a human-readable place label.
pub trait ReverseLookup {
    /// `Ok(None)` when the service knows no place at `position`.
    fn lookup(&self, position: LonLat) -> Result<Option<String>, LookupError>;
}

impl<L: ReverseLookup + ?Sized> ReverseLookup for &L {
    fn lookup(&self, position: LonLat) -> Result<Option<String>, LookupError> {
        (**self).lookup(position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl LookupConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        LookupConfig {
            base_url: DEFAULT_LOOKUP_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    place_name: Option<String>,
}

/// Reverse geocoding against the MapTiler geocoding API.
#[derive(Debug, Clone)]
pub struct MapTilerLookup {
    client: Client,
    config: LookupConfig,
}

impl MapTilerLookup {
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| LookupError::Client(err.to_string()))?;

        Ok(MapTilerLookup { client, config })
    }

    /// The request address for `position`, without the key.
    pub fn url(&self, position: LonLat) -> String {
        format!(
            "{}/{},{}.json",
            self.config.base_url.trim_end_matches('/'),
            position.lon,
            position.lat
        )
    }
}

impl ReverseLookup for MapTilerLookup {
    fn lookup(&self, position: LonLat) -> Result<Option<String>, LookupError> {
        let url = self.url(position);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    LookupError::Timeout
                } else {
                    LookupError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .json::<GeocodingResponse>()
            .map_err(|err| LookupError::Decode(err.to_string()))?;

        Ok(label_of(body))
    }
}

fn label_of(response: GeocodingResponse) -> Option<String> {
    response
        .features
        .into_iter()
        .next()
        .and_then(|feature| feature.place_name)
        .filter(|name| !name.trim().is_empty())
}

/// Reads a geocoding response body the way [`MapTilerLookup`] does.
pub fn parse_label(body: &str) -> Result<Option<String>, LookupError> {
    serde_json::from_str::<GeocodingResponse>(body)
        .map(label_of)
        .map_err(|err| LookupError::Decode(err.to_string()))
}
