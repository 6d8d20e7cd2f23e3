//! Session state shared by the front ends: the search form, the status line,
//! and the current result set.

use shared::{
    domain::{Amenity, Coordinates, SearchQuery, Venue},
    error::QueryError,
};
use tracing::{debug, error, info};

use crate::{
    error::{GeolocationError, SearchError, WheelError},
    overpass::MapDataService,
    pipeline::search_nearby,
    status::StatusMessage,
    wheel::{Clock, SelectorWheel},
};

pub const DEFAULT_AMENITY: &str = "restaurant";
pub const RADIUS_MIN_M: u32 = 50;
pub const RADIUS_MAX_M: u32 = 3_000;
pub const RADIUS_STEP_M: u32 = 50;

/// Raw form input as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    /// Amenity tag value; empty or `any` means every food amenity.
    pub amenity: String,
    pub cuisine: String,
    pub radius_m: u32,
    pub lat: String,
    pub lon: String,
}

impl SearchForm {
    pub fn new(radius_m: u32) -> Self {
        Self {
            amenity: DEFAULT_AMENITY.to_string(),
            cuisine: String::new(),
            radius_m,
            lat: String::new(),
            lon: String::new(),
        }
    }

    pub fn set_position(&mut self, position: Coordinates) {
        self.lat = format!("{:.6}", position.lat);
        self.lon = format!("{:.6}", position.lon);
    }

    pub fn radius_label(&self) -> String {
        format!("{} m", self.radius_m)
    }

    pub fn to_query(&self) -> Result<SearchQuery, QueryError> {
        let lat = parse_coordinate("latitude", &self.lat)?;
        let lon = parse_coordinate("longitude", &self.lon)?;
        let amenity = match self.amenity.trim() {
            "" => None,
            other if other.eq_ignore_ascii_case("any") => None,
            other => Some(other.parse::<Amenity>()?),
        };
        SearchQuery::new(
            Coordinates::new(lat, lon),
            self.radius_m,
            amenity,
            Some(self.cuisine.as_str()),
        )
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, QueryError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| QueryError::Unparsable {
            field,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Found { count: usize, radius_m: u32 },
    NoResults,
    Failed,
    Invalid,
    /// Another search is still running; nothing was started.
    Busy,
}

pub struct FinderSession {
    pub form: SearchForm,
    default_radius_m: u32,
    status: StatusMessage,
    results: Vec<Venue>,
    search_in_flight: bool,
}

impl FinderSession {
    pub fn new(default_radius_m: u32) -> Self {
        Self {
            form: SearchForm::new(default_radius_m),
            default_radius_m,
            status: StatusMessage::ready(),
            results: Vec::new(),
            search_in_flight: false,
        }
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = status;
    }

    pub fn results(&self) -> &[Venue] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.search_in_flight
    }

    /// Validates the form and marks a search as running.
    ///
    /// On success the previous results are dropped and the caller must hand
    /// the outcome back through [`finish_search`](Self::finish_search).
    pub fn prepare_search(&mut self) -> Result<SearchQuery, SearchStatus> {
        if self.search_in_flight {
            debug!("search requested while another is running");
            return Err(SearchStatus::Busy);
        }

        let query = match self.form.to_query() {
            Ok(query) => query,
            Err(err) => {
                self.status = if err.is_coordinate_error() {
                    StatusMessage::invalid_coordinates()
                } else {
                    StatusMessage::error(err.to_string())
                };
                return Err(SearchStatus::Invalid);
            }
        };

        self.results.clear();
        self.search_in_flight = true;
        self.status = StatusMessage::searching();
        Ok(query)
    }

    pub fn finish_search(
        &mut self,
        radius_m: u32,
        outcome: Result<Vec<Venue>, SearchError>,
    ) -> SearchStatus {
        self.search_in_flight = false;

        match outcome {
            Ok(venues) if venues.is_empty() => {
                self.status = StatusMessage::no_results();
                SearchStatus::NoResults
            }
            Ok(venues) => {
                let count = venues.len();
                self.results = venues;
                self.status = StatusMessage::found(count, radius_m);
                info!(count, radius_m, "results updated");
                SearchStatus::Found { count, radius_m }
            }
            Err(SearchError::InvalidQuery(err)) => {
                self.status = StatusMessage::error(err.to_string());
                SearchStatus::Invalid
            }
            Err(err) => {
                error!("search failed: {err}");
                self.status = StatusMessage::fetch_failed();
                SearchStatus::Failed
            }
        }
    }

    /// Runs a complete search against `service` using the current form.
    pub async fn search(
        &mut self,
        service: &dyn MapDataService,
        server_timeout_secs: u32,
    ) -> SearchStatus {
        let query = match self.prepare_search() {
            Ok(query) => query,
            Err(status) => return status,
        };
        let outcome = search_nearby(service, &query, server_timeout_secs).await;
        self.finish_search(query.radius_m(), outcome)
    }

    /// `at_startup` selects the quieter messages used for the silent
    /// locate attempt on launch.
    pub fn apply_position(
        &mut self,
        outcome: Result<Coordinates, GeolocationError>,
        at_startup: bool,
    ) {
        match outcome {
            Ok(position) => {
                self.form.set_position(position);
                self.status = if at_startup {
                    StatusMessage::autofilled()
                } else {
                    StatusMessage::located()
                };
            }
            Err(err) => {
                debug!("locate failed: {err}");
                self.status = if at_startup {
                    StatusMessage::locate_tip()
                } else {
                    StatusMessage::locate_failed()
                };
            }
        }
    }

    /// Back to a fresh form with no results.
    pub fn clear(&mut self) {
        self.form = SearchForm::new(self.default_radius_m);
        self.results.clear();
        self.status = StatusMessage::ready();
    }

    /// The wheel needs at least two venues and a settled result set.
    pub fn can_open_wheel(&self) -> bool {
        !self.search_in_flight && self.results.len() > 1
    }

    /// Copies the current results into `wheel`.
    pub fn load_wheel<C: Clock>(&self, wheel: &mut SelectorWheel<C>) -> Result<(), WheelError> {
        if self.search_in_flight {
            return Err(WheelError::Busy);
        }
        if self.results.is_empty() {
            return Err(WheelError::NoVenues);
        }
        wheel.load(&self.results)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
