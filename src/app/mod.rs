//! Application module
//!
//! This module provides the main application structure:
//! - Full-screen map view with the revealed road segments on top
//! - Start/end coordinate form in the top-left corner
//! - Toggleable status sidebar

mod plugin;
pub mod settings;
mod state;
mod tiles;
mod ui_panels;

use crate::app::plugin::{LineStyle, QueryBoundsLayer, RenderStats, RoadLayer};
pub use crate::app::settings::Settings;
use crate::app::state::AppState;
use crate::app::tiles::BaseMaps;
use crate::data::{DataError, OverpassClient};
use eframe::egui;
use std::sync::Arc;
use tokio::sync::RwLock;
use walkers::{Map, MapMemory};

/// Main application structure
pub struct RoadRevealApp {
    /// Application state (snapshot, inputs, fetcher, etc.)
    state: AppState,

    /// Tile caches of every base map
    base_maps: BaseMaps,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Show help overlay
    show_help: bool,

    /// Shared render statistics (updated by the road layer each frame)
    render_stats: Arc<RwLock<RenderStats>>,

    /// Time of the previous animation tick
    last_tick: instant::Instant,
}

impl RoadRevealApp {
    pub fn new(settings: Settings, cc: &eframe::CreationContext<'_>) -> Result<Self, DataError> {
        let client = OverpassClient::new(settings.overpass_url.clone())?;

        let (mut state, initial_fetch) = AppState::new(&settings, client);
        state.run_effect(initial_fetch, &cc.egui_ctx);

        let mut map_memory = MapMemory::default();
        if map_memory.set_zoom(settings.zoom).is_err() {
            tracing::warn!("Ignoring invalid zoom level {}", settings.zoom);
        }

        tracing::info!(
            "Initialized with start {} and end {}",
            settings.start,
            settings.end
        );

        Ok(Self {
            state,
            base_maps: BaseMaps::new(&cc.egui_ctx),
            map_memory,
            show_help: false,
            render_stats: Arc::new(RwLock::new(RenderStats::default())),
            last_tick: instant::Instant::now(),
        })
    }

    /// Advance the reveal animation by the wall time since the last frame
    fn advance_animation(&mut self, ctx: &egui::Context) {
        let now = instant::Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.state.tick(elapsed);

        if let Some(wait) = self.state.snapshot.reveal.time_until_next_step() {
            ctx.request_repaint_after(wait);
        }
    }
}

#[profiling::all_functions]
impl eframe::App for RoadRevealApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::F1) {
                self.show_help = !self.show_help;
            }
        });

        self.state.process_fetch_results();
        self.advance_animation(ctx);

        if self.show_help {
            ui_panels::help_overlay(ctx, &mut self.show_help);
        }

        ui_panels::render_sidebar(ctx, &mut self.state);
        ui_panels::coordinate_form(ctx, &mut self.state);

        // Capture values we need before the closure
        let snapshot = &self.state.snapshot;
        let road_layer = RoadLayer::new(
            snapshot.segments.clone(),
            snapshot.reveal.visible_len(),
            LineStyle {
                color: self.state.ui_settings.line_color,
                width: self.state.ui_settings.line_width,
            },
            self.render_stats.clone(),
        );
        let bounds_layer = self
            .state
            .ui_settings
            .show_query_bounds
            .then(|| QueryBoundsLayer::new(snapshot.bbox, snapshot.start, snapshot.end));
        let my_position = if snapshot.start.is_finite() {
            walkers::lat_lon(snapshot.start.lat, snapshot.start.lon)
        } else {
            walkers::lat_lon(0.0, 0.0)
        };
        let tiles_provider = self.state.ui_settings.tiles_provider;
        let attribution_text = tiles_provider.attribution().text;

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let tiles = self.base_maps.get_mut(tiles_provider);

                let mut map = Map::new(Some(tiles), &mut self.map_memory, my_position)
                    .with_plugin(road_layer);
                if let Some(bounds_layer) = bounds_layer {
                    map = map.with_plugin(bounds_layer);
                }

                ui.add(map);

                // Use try_read for non-blocking UI polling.
                if let Ok(render_stats) = self.render_stats.try_read() {
                    self.state.stats.segments_rendered = render_stats.segments_rendered;
                }

                ui_panels::sidebar_toggle_button(ui, &mut self.state);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    attribution_text,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });
    }
}
