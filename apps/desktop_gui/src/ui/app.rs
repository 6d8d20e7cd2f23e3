use std::time::Duration;

use client_core::{
    render_list,
    session::{RADIUS_MAX_M, RADIUS_MIN_M, RADIUS_STEP_M},
    FinderSession, SearchError, SelectorWheel, Settings, StatusMessage, SystemClock,
    ThreadRandom, VenueCard, WheelError, WinnerAnnouncement,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Amenity;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::wheel_view::paint_wheel;

const ANY_AMENITY: &str = "any";
const WHEEL_DIAMETER: f32 = 420.0;
const IDLE_REPAINT: Duration = Duration::from_millis(100);

pub struct FinderApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: FinderSession,
    cards: Vec<VenueCard>,
    wheel: SelectorWheel<SystemClock>,
    wheel_open: bool,
    winner: Option<WinnerAnnouncement>,
    locating: bool,
}

impl FinderApp {
    /// Builds the app and asks the backend for a position straight away.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            session: FinderSession::new(settings.default_radius_m),
            cards: Vec::new(),
            wheel: SelectorWheel::with_duration(SystemClock::new(), settings.spin_duration()),
            wheel_open: false,
            winner: None,
            locating: false,
        };
        app.request_locate(true);
        app
    }

    fn request_locate(&mut self, at_startup: bool) {
        if self.locating {
            return;
        }
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::Locate { at_startup }) {
            Ok(()) => {
                self.locating = true;
                self.session.set_status(StatusMessage::locating());
            }
            Err(status) => self.session.set_status(status),
        }
    }

    fn request_search(&mut self) {
        let Ok(query) = self.session.prepare_search() else {
            return;
        };
        self.cards.clear();
        let radius_m = query.radius_m();
        if let Err(status) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Search { query })
        {
            self.session.finish_search(
                radius_m,
                Err(SearchError::Network("search was not queued".into())),
            );
            self.session.set_status(status);
        }
    }

    fn clear(&mut self) {
        self.session.clear();
        self.cards.clear();
        if !self.wheel.is_spinning() {
            self.wheel_open = false;
        }
    }

    fn open_wheel(&mut self) {
        match self.session.load_wheel(&mut self.wheel) {
            Ok(()) => {
                self.winner = None;
                self.wheel_open = true;
            }
            // A spin is still running on the previous snapshot.
            Err(WheelError::Busy) => self.wheel_open = true,
            Err(err) => self.session.set_status(StatusMessage::error(err.to_string())),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SearchFinished { radius_m, outcome } => {
                    self.session.finish_search(radius_m, outcome);
                    self.cards = render_list(self.session.results());
                }
                UiEvent::Located {
                    at_startup,
                    outcome,
                } => {
                    self.locating = false;
                    self.session.apply_position(outcome, at_startup);
                }
                UiEvent::BackendFailed(message) => {
                    self.locating = false;
                    if self.session.is_searching() {
                        let radius_m = self.session.form.radius_m;
                        self.session
                            .finish_search(radius_m, Err(SearchError::Network(message.clone())));
                    }
                    self.session.set_status(StatusMessage::error(message));
                }
            }
        }
    }

    fn advance_wheel(&mut self) {
        if let Some(result) = self.wheel.tick().finished {
            self.winner = Some(result.announcement);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("search_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Type");
                let selected = self.session.form.amenity.clone();
                egui::ComboBox::from_id_salt("amenity")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.session.form.amenity,
                            ANY_AMENITY.to_string(),
                            "any food place",
                        );
                        for amenity in Amenity::ALL {
                            ui.selectable_value(
                                &mut self.session.form.amenity,
                                amenity.tag().to_string(),
                                amenity.tag(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Cuisine");
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.form.cuisine)
                        .hint_text("e.g. thai, pizza"),
                );
                ui.end_row();

                ui.label("Radius");
                ui.add(
                    egui::Slider::new(&mut self.session.form.radius_m, RADIUS_MIN_M..=RADIUS_MAX_M)
                        .step_by(f64::from(RADIUS_STEP_M))
                        .suffix(" m"),
                );
                ui.end_row();

                ui.label("Latitude");
                ui.text_edit_singleline(&mut self.session.form.lat);
                ui.end_row();

                ui.label("Longitude");
                ui.text_edit_singleline(&mut self.session.form.lon);
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.locating, egui::Button::new("📍 Use my location"))
                .clicked()
            {
                self.request_locate(false);
            }
            let searching = self.session.is_searching();
            let label = if searching { "Searching…" } else { "🔎 Search" };
            if ui.add_enabled(!searching, egui::Button::new(label)).clicked() {
                self.request_search();
            }
            if ui.button("Clear").clicked() {
                self.clear();
            }
            if self.session.can_open_wheel() && ui.button("🎡 Pick for me").clicked() {
                self.open_wheel();
            }
        });
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status = self.session.status();
        let text = egui::RichText::new(&status.text);
        if status.is_error {
            ui.label(text.color(ui.visuals().error_fg_color));
        } else {
            ui.label(text.weak());
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for card in &self.cards {
                    show_card(ui, card);
                    ui.add_space(6.0);
                }
            });
    }

    fn show_wheel_window(&mut self, ctx: &egui::Context) {
        if !self.wheel_open {
            return;
        }

        let mut open = true;
        let mut spin_requested = false;
        let spinning = self.wheel.is_spinning();
        let slices = self.wheel.slices();
        let rotation = self.wheel.rotation();

        egui::Window::new("Pick for me")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                paint_wheel(ui, &slices, rotation, WHEEL_DIAMETER);
                ui.vertical_centered(|ui| {
                    if ui
                        .add_enabled(!spinning, egui::Button::new("Spin"))
                        .clicked()
                    {
                        spin_requested = true;
                    }
                });
            });

        if spin_requested {
            self.winner = None;
            if let Err(err) = self.wheel.spin(&mut ThreadRandom) {
                self.session.set_status(StatusMessage::error(err.to_string()));
            }
        }
        self.wheel_open = open || self.wheel.is_spinning();
    }

    fn show_winner_window(&mut self, ctx: &egui::Context) {
        let Some(winner) = &self.winner else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("winner")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(&winner.heading);
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&winner.name).strong().size(20.0));
                    if let Some(cuisine) = &winner.cuisine {
                        ui.label(egui::RichText::new(cuisine).weak());
                    }
                    ui.label(
                        egui::RichText::new(format!("{} away", winner.distance_label))
                            .color(ui.visuals().hyperlink_color),
                    );
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.winner = None;
        }
    }
}

fn show_card(ui: &mut egui::Ui, card: &VenueCard) {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&card.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(&card.distance_label);
                });
            });
            if let Some(hours) = &card.opening_hours {
                ui.small(format!("Opening hours: {hours}"));
            }
            if let Some(address) = &card.address {
                ui.small(address);
            }
            ui.horizontal_wrapped(|ui| {
                for badge in &card.badges {
                    egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(6, 2))
                        .show(ui, |ui| {
                            ui.small(badge);
                        });
                }
            });
            ui.hyperlink_to("Open map", &card.map_url);
        });
}

impl eframe::App for FinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.advance_wheel();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.show_status(ui));
        egui::SidePanel::left("search_panel")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Food finder");
                ui.add_space(8.0);
                self.show_form(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| self.show_results(ui));

        self.show_wheel_window(ctx);
        self.show_winner_window(ctx);

        if self.wheel.is_spinning() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
