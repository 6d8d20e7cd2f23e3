use serde::Serialize;

use crate::geo::format_distance;

/// One line of user-facing status text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn ready() -> Self {
        Self::info("Ready to search…")
    }

    pub fn locating() -> Self {
        Self::info("Requesting location…")
    }

    pub fn located() -> Self {
        Self::info("Location acquired ✔")
    }

    pub fn locate_failed() -> Self {
        Self::error(
            "Unable to get your location. Allow location access or enter coordinates manually.",
        )
    }

    pub fn autofilled() -> Self {
        Self::info("Coordinates filled in automatically ✓")
    }

    pub fn locate_tip() -> Self {
        Self::info("Tip: press 'Use my location' to fill in coordinates automatically")
    }

    pub fn invalid_coordinates() -> Self {
        Self::error("Use 'Use my location' or enter valid lat/lon coordinates")
    }

    pub fn searching() -> Self {
        Self::info("Searching nearby…")
    }

    pub fn no_results() -> Self {
        Self::error("No venues match these filters. Try a larger radius or different filters.")
    }

    pub fn found(count: usize, radius_m: u32) -> Self {
        Self::info(format!(
            "Found {count} places within {} ✓",
            format_distance(f64::from(radius_m))
        ))
    }

    pub fn fetch_failed() -> Self {
        Self::error("Something went wrong while fetching data. Please try again.")
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::ready()
    }
}
