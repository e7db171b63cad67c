//! Road Reveal: fetches the OpenStreetMap roads around two coordinates and
//! draws them over an interactive map, one segment at a time.
//!
//! The [`data`] module holds everything that does not need a window: input
//! parsing, the padded query region, the Overpass client, segment extraction
//! and the reveal animator, tied together by [`data::Snapshot`].

mod app;
pub mod data;
mod entrypoints;

pub use app::{RoadRevealApp, Settings};
pub use entrypoints::run::run_native;
