use super::*;

use std::collections::BTreeMap;

use shared::domain::{Coordinates, VenueId, UNNAMED_VENUE};

fn venue(pairs: &[(&str, &str)], distance_m: f64) -> Venue {
    let tags: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let name = tags.get("name").cloned().unwrap_or_else(|| UNNAMED_VENUE.to_string());
    Venue::new(
        VenueId("node/9".into()),
        name,
        Coordinates::new(13.75, 100.5),
        tags,
        distance_m,
    )
}

#[test]
fn full_card_carries_every_optional_field() {
    let card = render_card(&venue(
        &[
            ("name", "Som Tam Nua"),
            ("amenity", "restaurant"),
            ("cuisine", "thai"),
            ("phone", "+66 2 251 4880"),
            ("opening_hours", "Mo-Su 10:45-21:30"),
            ("addr:housenumber", "392/14"),
            ("addr:street", "Siam Square Soi 5"),
            ("addr:city", "Bangkok"),
        ],
        1500.0,
    ));

    assert_eq!(card.title, "Som Tam Nua");
    assert_eq!(card.distance_label, "1.50 km");
    assert_eq!(card.opening_hours.as_deref(), Some("Mo-Su 10:45-21:30"));
    assert_eq!(card.address.as_deref(), Some("392/14 Siam Square Soi 5 Bangkok"));
    assert_eq!(
        card.badges,
        vec!["restaurant", "Cuisine: thai", "Tel: +66 2 251 4880"]
    );
    assert_eq!(
        card.map_url,
        "https://www.openstreetmap.org/?mlat=13.75&mlon=100.5#map=19/13.75/100.5"
    );
}

#[test]
fn sparse_card_omits_missing_fields() {
    let card = render_card(&venue(&[("name", "Kiosk")], 42.0));
    assert_eq!(card.distance_label, "42 m");
    assert_eq!(card.opening_hours, None);
    assert_eq!(card.address, None);
    assert!(card.badges.is_empty());
}

#[test]
fn phone_falls_back_to_contact_phone() {
    let card = render_card(&venue(&[("name", "X"), ("contact:phone", "123")], 1.0));
    assert_eq!(card.badges, vec!["Tel: 123"]);
}

#[test]
fn list_keeps_input_order() {
    let venues = vec![venue(&[("name", "B")], 900.0), venue(&[("name", "A")], 10.0)];
    let titles: Vec<_> = render_list(&venues).into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn winner_announcement_uses_placeholder_and_cuisine() {
    let unnamed = announce_winner(&venue(&[("name:en", "Only English")], 120.0));
    assert_eq!(unnamed.name, UNNAMED_VENUE);
    assert_eq!(unnamed.cuisine, None);

    let named = announce_winner(&venue(&[("name", "Kopi"), ("cuisine", "coffee")], 1000.0));
    assert_eq!(named.name, "Kopi");
    assert_eq!(named.cuisine.as_deref(), Some("(coffee)"));
    assert_eq!(named.distance_label, "1.00 km");
}
