use super::*;

#[test]
fn distance_to_self_is_zero() {
    assert_eq!(haversine_distance(13.7563, 100.5018, 13.7563, 100.5018), 0.0);
    assert_eq!(haversine_distance(-33.9, 151.2, -33.9, 151.2), 0.0);
}

#[test]
fn one_degree_of_longitude_on_the_equator() {
    let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
    assert!((d - 111_195.0).abs() <= 50.0, "got {d}");
}

#[test]
fn distance_is_symmetric() {
    let a = Coordinates::new(13.7563, 100.5018);
    let b = Coordinates::new(13.7590, 100.4990);
    let ab = distance_between(a, b);
    let ba = distance_between(b, a);
    assert!((ab - ba).abs() < 1e-9);
    assert!(ab > 0.0);
}

#[test]
fn formats_meters_below_one_kilometer() {
    assert_eq!(format_distance(0.0), "0 m");
    assert_eq!(format_distance(42.4), "42 m");
    assert_eq!(format_distance(999.0), "999 m");
}

#[test]
fn formats_kilometers_with_two_decimals() {
    assert_eq!(format_distance(1000.0), "1.00 km");
    assert_eq!(format_distance(1500.0), "1.50 km");
    assert_eq!(format_distance(12_500.0), "12.50 km");
}
