use client_core::{VenueCard, WinnerAnnouncement};
use serde_json::json;

pub fn card_text(position: usize, card: &VenueCard) -> String {
    let mut lines = vec![format!("{position}. {} · {}", card.title, card.distance_label)];
    if let Some(hours) = &card.opening_hours {
        lines.push(format!("   Opening hours: {hours}"));
    }
    if let Some(address) = &card.address {
        lines.push(format!("   {address}"));
    }
    if !card.badges.is_empty() {
        let badges: Vec<String> = card.badges.iter().map(|b| format!("[{b}]")).collect();
        lines.push(format!("   {}", badges.join(" ")));
    }
    lines.push(format!("   {}", card.map_url));
    lines.join("\n")
}

pub fn winner_text(winner: &WinnerAnnouncement) -> String {
    let mut text = format!("\n{}\n  {}", winner.heading, winner.name);
    if let Some(cuisine) = &winner.cuisine {
        text.push_str(&format!(" {cuisine}"));
    }
    text.push_str(&format!("\n  {} away", winner.distance_label));
    text
}

pub fn json_report(
    cards: &[VenueCard],
    winner: Option<&WinnerAnnouncement>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "venues": cards,
        "winner": winner,
    }))
}
