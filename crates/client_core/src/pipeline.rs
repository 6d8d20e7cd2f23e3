use std::collections::{BTreeMap, HashSet};

use shared::{
    domain::{Amenity, Coordinates, SearchQuery, Venue, VenueId, UNNAMED_VENUE},
    protocol::{ElementKind, RawElement},
};
use tracing::{debug, info};

use crate::{
    error::SearchError,
    geo::distance_between,
    overpass::{build_query, MapDataService},
};

/// Slack added to the search radius before the final distance filter.
pub const RADIUS_TOLERANCE_M: f64 = 1.0;

/// A normalized element that has not been measured yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: VenueId,
    pub name: String,
    pub location: Coordinates,
    pub tags: BTreeMap<String, String>,
}

/// Queries `service` around the query origin and returns venues sorted by
/// distance, nearest first.
///
/// An empty vector is a successful search with no matches.
pub async fn search_nearby(
    service: &dyn MapDataService,
    query: &SearchQuery,
    server_timeout_secs: u32,
) -> Result<Vec<Venue>, SearchError> {
    let overpass_ql = build_query(query, server_timeout_secs);
    let response = service.query(&overpass_ql).await?;
    let raw_count = response.elements.len();

    let venues = refine(response.elements, query);
    info!(
        raw = raw_count,
        venues = venues.len(),
        radius_m = query.radius_m(),
        "nearby search finished"
    );
    Ok(venues)
}

/// Turns raw elements into the final venue list for `query`.
pub fn refine(elements: Vec<RawElement>, query: &SearchQuery) -> Vec<Venue> {
    let mut candidates = normalize(elements);

    candidates.retain(|candidate| matches_amenity(&candidate.tags, query.amenity()));
    if let Some(keyword) = query.cuisine() {
        candidates.retain(|candidate| matches_cuisine(&candidate.tags, keyword));
    }

    let candidates = dedup(candidates);

    let origin = query.origin();
    let max_distance = f64::from(query.radius_m()) + RADIUS_TOLERANCE_M;
    let mut venues: Vec<Venue> = candidates
        .into_iter()
        .map(|candidate| {
            let distance = distance_between(origin, candidate.location);
            Venue::new(
                candidate.id,
                candidate.name,
                candidate.location,
                candidate.tags,
                distance,
            )
        })
        .filter(|venue| {
            let inside = venue.distance_m() <= max_distance;
            if !inside {
                debug!(id = %venue.id, distance_m = venue.distance_m(), "dropping venue outside radius");
            }
            inside
        })
        .collect();

    // `sort_by` is stable, equal distances keep their input order.
    venues.sort_by(|a, b| a.distance_m().total_cmp(&b.distance_m()));
    venues
}

/// Elements without usable coordinates are skipped.
pub fn normalize(elements: Vec<RawElement>) -> Vec<Candidate> {
    elements
        .into_iter()
        .filter_map(|element| {
            let location = location_of(&element)?;
            let name = name_of(&element.tags);
            Some(Candidate {
                id: VenueId(format!("{}/{}", element.kind.as_str(), element.id)),
                name,
                location,
                tags: element.tags,
            })
        })
        .collect()
}

fn location_of(element: &RawElement) -> Option<Coordinates> {
    if element.kind == ElementKind::Node {
        if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
            return Some(Coordinates::new(lat, lon));
        }
    }
    element
        .center
        .map(|center| Coordinates::new(center.lat, center.lon))
}

fn name_of(tags: &BTreeMap<String, String>) -> String {
    ["name", "name:en"]
        .iter()
        .filter_map(|key| tags.get(*key))
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| UNNAMED_VENUE.to_string())
}

/// With no amenity requested any food amenity passes; elements without an
/// `amenity` tag never do.
pub fn matches_amenity(tags: &BTreeMap<String, String>, wanted: Option<Amenity>) -> bool {
    let Some(tag) = tags.get("amenity") else {
        return false;
    };
    match wanted {
        Some(amenity) => tag == amenity.tag(),
        None => Amenity::ALL.iter().any(|amenity| amenity.tag() == tag),
    }
}

/// `keyword` is expected lowercased already.
pub fn matches_cuisine(tags: &BTreeMap<String, String>, keyword: &str) -> bool {
    tags.get("cuisine")
        .is_some_and(|cuisine| cuisine.to_lowercase().contains(keyword))
}

pub fn dedup_key(name: &str, location: Coordinates) -> String {
    format!("{name}|{:.5},{:.5}", location.lat, location.lon)
}

/// First occurrence of each (name, rounded coordinates) key wins.
pub fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(dedup_key(&candidate.name, candidate.location)))
        .collect()
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
