//! Display model for venue lists and wheel results.
//!
//! Nothing here filters or reorders; front ends draw these records as-is.

use serde::Serialize;
use shared::domain::Venue;

use crate::geo::format_distance;

const ADDRESS_PARTS: [&str; 4] = ["addr:housenumber", "addr:street", "addr:suburb", "addr:city"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueCard {
    pub title: String,
    pub distance_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub badges: Vec<String>,
    pub map_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerAnnouncement {
    pub heading: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub distance_label: String,
}

pub fn render_list(venues: &[Venue]) -> Vec<VenueCard> {
    venues.iter().map(render_card).collect()
}

pub fn render_card(venue: &Venue) -> VenueCard {
    let mut badges = Vec::new();
    if let Some(amenity) = venue.tag("amenity") {
        badges.push(amenity.to_string());
    }
    if let Some(cuisine) = venue.tag("cuisine") {
        badges.push(format!("Cuisine: {cuisine}"));
    }
    if let Some(phone) = venue.tag("phone").or_else(|| venue.tag("contact:phone")) {
        badges.push(format!("Tel: {phone}"));
    }

    VenueCard {
        title: venue.name.clone(),
        distance_label: format_distance(venue.distance_m()),
        opening_hours: venue.tag("opening_hours").map(str::to_string),
        address: compose_address(venue),
        badges,
        map_url: map_url(venue),
    }
}

/// House number, street, suburb and city joined by spaces.
pub fn compose_address(venue: &Venue) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_PARTS
        .iter()
        .filter_map(|key| venue.tag(key))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

pub fn map_url(venue: &Venue) -> String {
    let (lat, lon) = (venue.location.lat, venue.location.lon);
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=19/{lat}/{lon}")
}

pub fn announce_winner(venue: &Venue) -> WinnerAnnouncement {
    WinnerAnnouncement {
        heading: "🎉 Your pick is".to_string(),
        name: venue.display_name().to_string(),
        cuisine: venue.tag("cuisine").map(|cuisine| format!("({cuisine})")),
        distance_label: format_distance(venue.distance_m()),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
