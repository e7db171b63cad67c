use crate::app::state::TilesProvider;
use crate::data::{Coordinate, DEFAULT_OVERPASS_URL};
use crate::entrypoints::cli::parse_args;
use clap::Parser;
use egui::Color32;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Road Reveal - Fetches OpenStreetMap roads around two coordinates and animates them over an interactive map
pub struct Settings {
    /// Start coordinate as "lat, lon"
    #[clap(long, default_value = "49.982967, 36.183048", allow_hyphen_values = true)]
    pub start: Coordinate,

    /// End coordinate as "lat, lon"
    #[clap(long, default_value = "49.992669, 36.231978", allow_hyphen_values = true)]
    pub end: Coordinate,

    /// Overpass API interpreter endpoint
    #[clap(long, default_value = DEFAULT_OVERPASS_URL)]
    pub overpass_url: String,

    /// Milliseconds between two reveal steps
    #[clap(long, default_value = "10")]
    pub tick_ms: u64,

    /// Road line width in pixels
    #[clap(long, default_value = "5.0")]
    pub line_width: f32,

    /// Road line color as #RRGGBB or #RRGGBBAA
    #[clap(long, default_value = "#ffff0064", value_parser = parse_hex_color)]
    pub line_color: Color32,

    /// Initial map zoom level
    #[clap(long, default_value = "13.0")]
    pub zoom: f64,

    /// Base map tiles
    #[clap(long, value_enum, default_value = "carto")]
    pub tiles: TilesProvider,

    /// Apply coordinate edits without validation (malformed text becomes NaN)
    #[clap(long, default_value = "false")]
    pub lenient_input: bool,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (alpha unmultiplied)
pub fn parse_hex_color(text: &str) -> Result<Color32, String> {
    let hex = text.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{text:?} is not a #RRGGBB or #RRGGBBAA color"));
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color32::from_rgba_unmultiplied(
        channel(0)?,
        channel(2)?,
        channel(4)?,
        alpha,
    ))
}
