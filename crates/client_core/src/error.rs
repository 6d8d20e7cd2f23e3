use shared::error::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search query: {0}")]
    InvalidQuery(#[from] QueryError),
    #[error("map-data request failed: {0}")]
    Network(String),
    #[error("malformed map-data response: {0}")]
    Data(String),
}

impl SearchError {
    /// Network and data failures are reported to the user the same way.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SearchError::Network(_) | SearchError::Data(_))
    }
}

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this provider")]
    Unsupported,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("no position within {waited_ms} ms")]
    Timeout { waited_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("the wheel needs at least one venue")]
    NoVenues,
    #[error("the wheel is spinning")]
    Busy,
}
