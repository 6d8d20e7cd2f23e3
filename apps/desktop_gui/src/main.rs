mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use client_core::load_settings;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::FinderApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Food finder")
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Food finder",
        options,
        Box::new(move |_cc| Ok(Box::new(FinderApp::new(cmd_tx, ui_rx, &settings)))),
    )
}
