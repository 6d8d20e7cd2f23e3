//! Events flowing from the backend worker back to the UI thread.

use client_core::{GeolocationError, SearchError};
use shared::domain::{Coordinates, Venue};

pub enum UiEvent {
    SearchFinished {
        radius_m: u32,
        outcome: Result<Vec<Venue>, SearchError>,
    },
    Located {
        at_startup: bool,
        outcome: Result<Coordinates, GeolocationError>,
    },
    /// The worker could not start; nothing further will arrive.
    BackendFailed(String),
}
