use std::f64::consts::PI;

use shared::domain::Coordinates;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(lat2 - lat1);
    let dlon = to_rad(lon2 - lon1);

    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

pub fn distance_between(from: Coordinates, to: Coordinates) -> f64 {
    haversine_distance(from.lat, from.lon, to.lat, to.lon)
}

/// `"X m"` below one kilometer, `"X.XX km"` from there on.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

#[cfg(test)]
#[path = "tests/geo_tests.rs"]
mod tests;
