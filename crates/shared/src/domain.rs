use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Label used when a venue carries neither `name` nor `name:en`.
pub const UNNAMED_VENUE: &str = "(unnamed)";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(VenueId);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(QueryError::Latitude(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(QueryError::Longitude(self.lon));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Restaurant,
    Cafe,
    FastFood,
    Bar,
    Pub,
    Biergarten,
    FoodCourt,
    IceCream,
    Bakery,
}

impl Amenity {
    pub const ALL: [Amenity; 9] = [
        Amenity::Restaurant,
        Amenity::Cafe,
        Amenity::FastFood,
        Amenity::Bar,
        Amenity::Pub,
        Amenity::Biergarten,
        Amenity::FoodCourt,
        Amenity::IceCream,
        Amenity::Bakery,
    ];

    /// The OpenStreetMap `amenity=*` tag value.
    pub fn tag(self) -> &'static str {
        match self {
            Amenity::Restaurant => "restaurant",
            Amenity::Cafe => "cafe",
            Amenity::FastFood => "fast_food",
            Amenity::Bar => "bar",
            Amenity::Pub => "pub",
            Amenity::Biergarten => "biergarten",
            Amenity::FoodCourt => "food_court",
            Amenity::IceCream => "ice_cream",
            Amenity::Bakery => "bakery",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Amenity {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Amenity::ALL
            .into_iter()
            .find(|amenity| amenity.tag().eq_ignore_ascii_case(needle))
            .ok_or_else(|| QueryError::UnknownAmenity(needle.to_string()))
    }
}

/// A normalized food venue discovered around a query origin.
///
/// The distance is fixed at construction; there is no setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub location: Coordinates,
    pub tags: BTreeMap<String, String>,
    distance_m: f64,
}

impl Venue {
    pub fn new(
        id: VenueId,
        name: impl Into<String>,
        location: Coordinates,
        tags: BTreeMap<String, String>,
        distance_m: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            tags,
            distance_m,
        }
    }

    /// Meters from the origin of the search that produced this venue.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// `name` tag if present, otherwise the placeholder label.
    pub fn display_name(&self) -> &str {
        self.tag("name").unwrap_or(UNNAMED_VENUE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    origin: Coordinates,
    radius_m: u32,
    amenity: Option<Amenity>,
    cuisine: Option<String>,
}

impl SearchQuery {
    pub fn new(
        origin: Coordinates,
        radius_m: u32,
        amenity: Option<Amenity>,
        cuisine: Option<&str>,
    ) -> Result<Self, QueryError> {
        origin.validate()?;
        if radius_m == 0 {
            return Err(QueryError::Radius);
        }
        let cuisine = cuisine
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty());

        Ok(Self {
            origin,
            radius_m,
            amenity,
            cuisine,
        })
    }

    pub fn origin(&self) -> Coordinates {
        self.origin
    }

    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    pub fn amenity(&self) -> Option<Amenity> {
        self.amenity
    }

    /// Lowercased cuisine keyword, `None` when no cuisine filter applies.
    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amenity_parses_tag_values_case_insensitively() {
        assert_eq!("fast_food".parse::<Amenity>().ok(), Some(Amenity::FastFood));
        assert_eq!(" Cafe ".parse::<Amenity>().ok(), Some(Amenity::Cafe));
        assert!("hardware".parse::<Amenity>().is_err());
    }

    #[test]
    fn query_normalizes_cuisine_keyword() {
        let query = SearchQuery::new(Coordinates::new(1.0, 2.0), 100, None, Some("  ThAi "))
            .expect("valid query");
        assert_eq!(query.cuisine(), Some("thai"));

        let blank = SearchQuery::new(Coordinates::new(1.0, 2.0), 100, None, Some("   "))
            .expect("valid query");
        assert_eq!(blank.cuisine(), None);
    }

    #[test]
    fn query_rejects_out_of_range_input() {
        assert!(matches!(
            SearchQuery::new(Coordinates::new(91.0, 0.0), 100, None, None),
            Err(QueryError::Latitude(_))
        ));
        assert!(matches!(
            SearchQuery::new(Coordinates::new(0.0, f64::NAN), 100, None, None),
            Err(QueryError::Longitude(_))
        ));
        assert!(matches!(
            SearchQuery::new(Coordinates::new(0.0, 0.0), 0, None, None),
            Err(QueryError::Radius)
        ));
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        let venue = Venue::new(
            VenueId("node/1".into()),
            UNNAMED_VENUE,
            Coordinates::new(0.0, 0.0),
            BTreeMap::new(),
            0.0,
        );
        assert_eq!(venue.display_name(), UNNAMED_VENUE);
    }
}
