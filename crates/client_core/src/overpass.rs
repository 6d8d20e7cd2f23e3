use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use shared::{
    domain::{Amenity, SearchQuery},
    protocol::OverpassResponse,
};
use tracing::{debug, warn};

use crate::{config::Settings, error::SearchError};

/// Source of raw map-data elements for a textual Overpass QL query.
#[async_trait]
pub trait MapDataService: Send + Sync {
    async fn query(&self, overpass_ql: &str) -> Result<OverpassResponse, SearchError>;
}

/// Builds the Overpass QL union for `query`.
///
/// Every food amenity is selected unless the query names one, in which case
/// only that amenity is requested. Nodes, ways and relations are all included;
/// `out center tags` makes the server attach a centroid to ways and relations.
pub fn build_query(query: &SearchQuery, server_timeout_secs: u32) -> String {
    let amenities: Vec<Amenity> = match query.amenity() {
        Some(amenity) => vec![amenity],
        None => Amenity::ALL.to_vec(),
    };
    let origin = query.origin();
    let around = format!("around:{},{},{}", query.radius_m(), origin.lat, origin.lon);

    let union = amenities
        .iter()
        .map(|amenity| {
            let tag = amenity.tag();
            format!(
                "node[amenity={tag}]({around});way[amenity={tag}]({around});relation[amenity={tag}]({around});"
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ");

    format!("[out:json][timeout:{server_timeout_secs}];\n(\n  {union}\n);\nout center tags;\n")
}

pub struct OverpassClient {
    http: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn from_settings(settings: &Settings) -> Result<Self, SearchError> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| SearchError::Network(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoint: settings.overpass_url.clone(),
        })
    }
}

#[async_trait]
impl MapDataService for OverpassClient {
    async fn query(&self, overpass_ql: &str) -> Result<OverpassResponse, SearchError> {
        debug!(endpoint = %self.endpoint, "submitting overpass query");
        let res = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(overpass_ql.to_owned())
            .send()
            .await
            .map_err(|err| SearchError::Network(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "overpass returned non-success status");
            return Err(SearchError::Network(format!("Overpass error: {status}")));
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| SearchError::Network(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| SearchError::Data(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/overpass_tests.rs"]
mod tests;
