//! Fetcher error types.

/// Errors from a departure fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized by departures API")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by departures API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The configured `User-Agent` is not a valid header value
    #[error("invalid user agent: {0}")]
    InvalidUserAgent(#[from] reqwest::header::InvalidHeaderValue),

    /// The backend has no data for the station, or returned it incomplete
    #[error("{0}")]
    Unavailable(String),
}
