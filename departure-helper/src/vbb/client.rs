//! VBB REST HTTP client.
//!
//! Provides async methods for the `transport.rest` VBB API: stop metadata
//! and departure boards.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::domain::{Departure, StationId};
use crate::fetcher::FetchError;

use super::types::{DeparturesResponse, StopDto};

/// Default base URL for the VBB REST API.
const DEFAULT_BASE_URL: &str = "https://v6.vbb.transport.rest";

/// Identifies this client to the API operators.
const DEFAULT_USER_AGENT: &str = concat!("departure-helper/", env!("CARGO_PKG_VERSION"));

/// Configuration for the VBB client.
#[derive(Debug, Clone)]
pub struct VbbConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl VbbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for VbbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// VBB REST API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct VbbClient {
    http: reqwest::Client,
    base_url: String,
}

impl VbbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VbbConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the name of a stop.
    pub async fn stop_name(&self, station_id: &StationId) -> Result<String, FetchError> {
        let url = format!("{}/stops/{}", self.base_url, station_id);
        let stop: StopDto = self.get_json(&url, &[]).await?;

        if stop.name.is_empty() {
            return Err(FetchError::Unavailable(format!(
                "stop {} has no name",
                station_id
            )));
        }

        Ok(stop.name)
    }

    /// Get departures from a stop.
    ///
    /// # Arguments
    ///
    /// * `station_id` - Stop to query
    /// * `when` - Earliest departure time
    /// * `duration_mins` - Window after `when` to include
    pub async fn departures(
        &self,
        station_id: &StationId,
        when: DateTime<Utc>,
        duration_mins: u32,
    ) -> Result<Vec<Departure>, FetchError> {
        let url = format!("{}/stops/{}/departures", self.base_url, station_id);
        let query = [
            ("when", when.to_rfc3339()),
            ("duration", duration_mins.to_string()),
            ("remarks", "false".to_string()),
        ];

        let response: DeparturesResponse = self.get_json(&url, &query).await?;

        Ok(response
            .into_departures()
            .into_iter()
            .map(Departure::from)
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
        })
    }
}
