use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::domain::Coordinates;
use tracing::{debug, warn};

use crate::{config::Settings, error::GeolocationError};

pub const LOCATE_TIMEOUT: Duration = Duration::from_millis(15_000);

/// One-shot source of the user's current position.
///
/// Implementations must not serve a cached position; each call asks afresh.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Asks `provider` for a position, giving up after `timeout`.
pub async fn locate(
    provider: &dyn GeolocationProvider,
    timeout: Duration,
) -> Result<Coordinates, GeolocationError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(position)) => {
            position
                .validate()
                .map_err(|err| GeolocationError::Unavailable(err.to_string()))?;
            debug!(lat = position.lat, lon = position.lon, "position acquired");
            Ok(position)
        }
        Ok(Err(err)) => {
            warn!("geolocation failed: {err}");
            Err(err)
        }
        Err(_) => {
            let waited_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(waited_ms, "geolocation timed out");
            Err(GeolocationError::Timeout { waited_ms })
        }
    }
}

/// A position known ahead of time, e.g. from configuration.
pub struct FixedPosition(pub Option<Coordinates>);

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or(GeolocationError::Unsupported)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Coarse position from an IP lookup service returning
/// `{"latitude": .., "longitude": ..}`.
pub struct IpGeolocation {
    http: Client,
    endpoint: String,
}

impl IpGeolocation {
    pub fn from_settings(settings: &Settings) -> Result<Self, GeolocationError> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: settings.geolocation_url.clone(),
        })
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let res = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))?
            .error_for_status()
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))?;
        let body: IpLookupResponse = res
            .json()
            .await
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))?;

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(GeolocationError::Unavailable(
                "lookup response carried no coordinates".into(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "tests/geolocation_tests.rs"]
mod tests;
