use std::{io::Write, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, locate, render_list, wheel::winning_index, FinderSession, IpGeolocation,
    OverpassClient, SearchStatus, SelectorWheel, SystemClock, ThreadRandom, WinnerAnnouncement,
};
use shared::domain::Coordinates;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod output;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "food-finder", about = "Find food venues nearby and let a wheel pick one")]
struct Args {
    /// Latitude of the search origin; located automatically when omitted.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,
    /// Search radius in meters.
    #[arg(long)]
    radius: Option<u32>,
    /// restaurant, cafe, fast_food, bar, pub, biergarten, food_court,
    /// ice_cream, bakery or any.
    #[arg(long, default_value = "restaurant")]
    amenity: String,
    /// Keyword matched against the cuisine tag.
    #[arg(long, default_value = "")]
    cuisine: String,
    /// Look up the current position even when coordinates are given.
    #[arg(long)]
    locate: bool,
    /// Spin the wheel over the results and print the pick.
    #[arg(long)]
    spin: bool,
    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = load_settings();

    let mut session = FinderSession::new(settings.default_radius_m);
    session.form.amenity = args.amenity.clone();
    session.form.cuisine = args.cuisine.clone();
    if let Some(radius) = args.radius {
        session.form.radius_m = radius;
    }

    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) if !args.locate => {
            session.form.set_position(Coordinates::new(lat, lon));
        }
        _ => {
            eprintln!("{}", client_core::StatusMessage::locating().text);
            let provider = IpGeolocation::from_settings(&settings)?;
            let outcome = locate(&provider, settings.geolocation_timeout()).await;
            session.apply_position(outcome, false);
            eprintln!("{}", session.status().text);
            if session.status().is_error {
                bail!("no search origin; pass --lat and --lon");
            }
        }
    }

    info!(
        lat = %session.form.lat,
        lon = %session.form.lon,
        radius_m = session.form.radius_m,
        amenity = %session.form.amenity,
        "search origin resolved"
    );

    let service = OverpassClient::from_settings(&settings)
        .context("failed to prepare the map-data client")?;
    eprintln!("{}", client_core::StatusMessage::searching().text);
    let status = session.search(&service, settings.overpass_timeout_secs).await;
    eprintln!("{}", session.status().text);

    match status {
        SearchStatus::Found { .. } => {}
        SearchStatus::NoResults => {
            if args.json {
                println!("{}", output::json_report(&[], None)?);
            }
            return Ok(());
        }
        SearchStatus::Failed | SearchStatus::Invalid | SearchStatus::Busy => {
            bail!("{}", session.status().text);
        }
    }

    let cards = render_list(session.results());
    let winner = if args.spin {
        spin_wheel(&session, &settings, !args.json).await?
    } else {
        None
    };

    if args.json {
        println!("{}", output::json_report(&cards, winner.as_ref())?);
    } else {
        for (index, card) in cards.iter().enumerate() {
            println!("{}", output::card_text(index + 1, card));
        }
        if let Some(winner) = &winner {
            println!("{}", output::winner_text(winner));
        }
    }

    Ok(())
}

async fn spin_wheel(
    session: &FinderSession,
    settings: &client_core::Settings,
    animate: bool,
) -> Result<Option<WinnerAnnouncement>> {
    if !session.can_open_wheel() {
        warn!(
            venues = session.results().len(),
            "the wheel needs at least two places to choose from"
        );
        return Ok(None);
    }

    let mut wheel = SelectorWheel::with_duration(SystemClock::new(), settings.spin_duration());
    session.load_wheel(&mut wheel)?;
    wheel.spin(&mut ThreadRandom)?;
    let slice_count = wheel.venues().len();

    loop {
        let frame = wheel.tick();
        if let Some(result) = frame.finished {
            if animate {
                eprintln!();
            }
            return Ok(Some(result.announcement));
        }
        if animate {
            let under_pointer = &wheel.venues()[winning_index(frame.rotation, slice_count)];
            let mut stderr = std::io::stderr().lock();
            write!(stderr, "\r\x1b[2K🎡 {}", under_pointer.display_name())?;
            stderr.flush()?;
        }
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}
