//! UI panels for the application
//!
//! This module provides the coordinate form overlaid on the map, the
//! status sidebar and the help window.

use crate::app::state::{
    AppState, CoordinateField, Endpoint, TilesProvider, group_thousands,
};
use crate::data::{RevealState, Snapshot};
use egui::{Color32, RichText, Ui};

/// Render the start/end inputs in the top-left corner of the map
pub fn coordinate_form(ctx: &egui::Context, state: &mut AppState) {
    egui::Window::new("coordinates")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            if coordinate_input(ui, &mut state.start_field, "Start (lat, lon)") {
                state.field_edited(Endpoint::Start, ctx);
            }
            ui.add_space(4.0);
            if coordinate_input(ui, &mut state.end_field, "End (lat, lon)") {
                state.field_edited(Endpoint::End, ctx);
            }
        });
}

/// Single-line input with its validation message; returns true when edited
fn coordinate_input(ui: &mut Ui, field: &mut CoordinateField, hint: &str) -> bool {
    let changed = ui
        .add(
            egui::TextEdit::singleline(&mut field.text)
                .hint_text(hint)
                .desired_width(220.0),
        )
        .changed();

    if let Some(error) = &field.error {
        ui.label(
            RichText::new(format!("⚠ {error}"))
                .small()
                .color(ui.visuals().warn_fg_color),
        );
    }

    changed
}

/// Status toggle in the top-right corner of the map.
///
/// While the panel is closed the button carries the fetch and reveal progress.
pub fn sidebar_toggle_button(ui: &mut Ui, state: &mut AppState) {
    let open = state.ui_settings.sidebar_open;
    let (label, width, hint) = if open {
        ("✕".to_string(), 36.0, "Hide status")
    } else {
        (collapsed_status(&state.snapshot), 110.0, "Show status")
    };

    let size = egui::vec2(width, 32.0);
    let top_right = ui.max_rect().right_top() + egui::vec2(-size.x - 10.0, 10.0);
    let rect = egui::Rect::from_min_size(top_right, size);

    let response = ui
        .put(rect, egui::Button::new(RichText::new(label).size(16.0)))
        .on_hover_text(hint);
    if response.clicked() {
        state.ui_settings.sidebar_open = !open;
    }
}

fn collapsed_status(snapshot: &Snapshot) -> String {
    if snapshot.is_fetching() {
        "☰  fetching…".to_string()
    } else if snapshot.segments.is_empty() {
        "☰".to_string()
    } else {
        let percent = snapshot.visible_segments().len() * 100 / snapshot.segments.len();
        format!("☰  {percent}%")
    }
}

/// Render the status sidebar
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.ui_settings.sidebar_open {
        return;
    }

    egui::SidePanel::right("main_sidebar")
        .default_width(280.0)
        .min_width(240.0)
        .max_width(400.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_stats_section(ui, state);
                    ui.add_space(8.0);
                    ui.separator();
                    render_settings_section(ui, state);
                });
        });
}

fn stat_row(ui: &mut Ui, label: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).strong());
        });
    });
}

fn render_stats_section(ui: &mut Ui, state: &AppState) {
    let snapshot = &state.snapshot;

    ui.label(
        RichText::new("🛣 Roads")
            .strong()
            .color(ui.visuals().strong_text_color()),
    );
    ui.add_space(4.0);

    if snapshot.is_fetching() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Fetching from Overpass...").italics());
        });
    }

    stat_row(ui, "Ways:", group_thousands(snapshot.way_count()));
    stat_row(ui, "Nodes:", group_thousands(snapshot.node_count()));
    stat_row(
        ui,
        "Segments:",
        group_thousands(snapshot.segments.len()),
    );

    let revealed = snapshot.visible_segments().len();
    stat_row(ui, "Revealed:", group_thousands(revealed));
    if !snapshot.segments.is_empty() {
        let progress = revealed as f32 / snapshot.segments.len() as f32;
        ui.add(egui::ProgressBar::new(progress).show_percentage());
    }
    stat_row(
        ui,
        "Drawn:",
        group_thousands(state.stats.segments_rendered),
    );

    ui.add_space(8.0);
    ui.separator();

    ui.label(
        RichText::new("🗺 Query")
            .strong()
            .color(ui.visuals().strong_text_color()),
    );
    ui.add_space(4.0);

    let bbox = snapshot.bbox;
    ui.label(format!("Lat: {:.5}° to {:.5}°", bbox.min_lat, bbox.max_lat));
    ui.label(format!("Lon: {:.5}° to {:.5}°", bbox.min_lon, bbox.max_lon));
    if !bbox.is_finite() {
        ui.label(
            RichText::new("⚠ Query box contains NaN")
                .small()
                .color(Color32::RED),
        );
    }

    if state.stats.fetches_started > 0 {
        stat_row(ui, "Requests:", state.stats.fetches_started.to_string());
    }
    if state.stats.last_fetch_time_ms > 0.0 {
        stat_row(ui, "Last fetch:", state.stats.format_fetch_time());
    }
    if state.stats.fetches_failed > 0 {
        stat_row(ui, "Failed:", state.stats.fetches_failed.to_string());
    }

    ui.label(RichText::new(state.fetcher.endpoint()).small().weak());
}

fn render_settings_section(ui: &mut Ui, state: &mut AppState) {
    ui.collapsing("Display", |ui| {
        ui.horizontal(|ui| {
            ui.label("Line Width:");
            ui.add(
                egui::Slider::new(&mut state.ui_settings.line_width, 0.5..=10.0)
                    .suffix(" px")
                    .step_by(0.5),
            );
        });

        ui.horizontal(|ui| {
            ui.label("Line Color:");
            ui.color_edit_button_srgba(&mut state.ui_settings.line_color);
        });

        ui.checkbox(
            &mut state.ui_settings.show_query_bounds,
            "Show query bounds",
        );
        ui.label(RichText::new("Green = start, Red = end").small());
    });

    ui.collapsing("Animation", |ui| {
        let reveal = &state.snapshot.reveal;
        let status = match reveal.state() {
            RevealState::Idle => "Idle".to_string(),
            RevealState::Revealing { index } => format!("Revealing ({})", index + 1),
            RevealState::Complete { .. } => "Complete".to_string(),
        };
        ui.label(format!(
            "{status}, one segment every {} ms",
            reveal.period().as_millis()
        ));
        if ui.button("⟲ Replay").clicked() {
            state.restart_reveal();
        }
    });

    ui.collapsing("Input", |ui| {
        let mut lenient = state.ui_settings.lenient_input;
        if ui
            .checkbox(&mut lenient, "Lenient input (no validation)")
            .changed()
        {
            state.ui_settings.lenient_input = lenient;
            state.reset_fields();
        }
        ui.label(
            RichText::new("Malformed text turns into NaN and is sent as is")
                .small()
                .weak(),
        );
    });

    ui.collapsing("Map Tiles", |ui| {
        for provider in TilesProvider::all() {
            let selected = state.ui_settings.tiles_provider == *provider;
            if ui.selectable_label(selected, provider.name()).clicked() {
                state.ui_settings.tiles_provider = *provider;
            }
        }
    });
}

/// Render the help overlay
pub fn help_overlay(ctx: &egui::Context, show: &mut bool) {
    egui::Window::new("Help")
        .open(show)
        .collapsible(false)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.heading("Road Reveal");
            ui.separator();

            ui.label("Draws the OpenStreetMap roads between two points, one segment at a time.");
            ui.add_space(8.0);

            ui.label(RichText::new("📍 Coordinates").strong());
            ui.label("• Type \"lat, lon\" into the Start and End fields");
            ui.label("• Roads are fetched for the box around both points, plus 10%");
            ui.add_space(8.0);

            ui.label(RichText::new("🖱 Map Controls").strong());
            ui.label("• Left drag: Pan the map");
            ui.label("• Ctrl + mouse wheel: Zoom in/out");
            ui.label("• Double click: Zoom in");
            ui.add_space(8.0);

            ui.separator();
            ui.label(
                RichText::new("Press F1 to toggle this help")
                    .small()
                    .italics(),
            );
        });
}
