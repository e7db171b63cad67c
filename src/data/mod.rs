//! Road data pipeline
//!
//! Everything between the two coordinates typed by the user and the list of
//! segments drawn on the map, with no dependency on the UI.
//!
//! # Architecture
//!
//! - **[`Coordinate`]**: `"lat, lon"` parsing, strict or lenient
//! - **[`BoundingBox`]**: padded query region around start and end
//! - **[`OverpassClient`]**: highway query against the Overpass API
//! - **[`extract_segments`]**: ways flattened into sorted [`Segment`]s
//! - **[`RevealAnimator`]**: fixed-period reveal of the segment list
//! - **[`Snapshot`]**: immutable state advanced by [`Snapshot::update`]
//!
//! # Usage Example
//!
//! ```rust
//! use road_reveal::data::{Coordinate, Effect, Event, Snapshot};
//! use std::time::Duration;
//!
//! let start = Coordinate::new(49.982967, 36.183048);
//! let end = Coordinate::new(49.992669, 36.231978);
//! let (snapshot, Effect::Fetch { generation, bbox }) =
//!     Snapshot::new(start, end, Duration::from_millis(10));
//! assert_eq!(bbox.to_string().split(',').count(), 4);
//!
//! // Normally the elements come from `OverpassClient::fetch_highways(&bbox)`
//! let (snapshot, _) = snapshot.update(Event::FetchSucceeded {
//!     generation,
//!     elements: Vec::new(),
//! });
//! assert!(snapshot.visible_segments().is_empty());
//! ```

mod bbox;
mod coordinate;
mod edges;
pub mod overpass;
mod pipeline;
mod reveal;

// Public API exports
pub use bbox::{BoundingBox, PADDING_RATIO};
pub use coordinate::{Coordinate, CoordinateError};
pub use edges::{Segment, compare_segments, extract_segments, segment_count};
pub use overpass::{DEFAULT_OVERPASS_URL, GeoElement, GeometryPoint, Node, OverpassClient, Way};
pub use pipeline::{Effect, Event, Snapshot};
pub use reveal::{DEFAULT_TICK, RevealAnimator, RevealState};

/// Error types for fetching road data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Overpass API responded with {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Invalid Overpass response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _: fn(Coordinate, Coordinate) -> BoundingBox = BoundingBox::padded;
        let _: fn(&[GeoElement]) -> Vec<Segment> = extract_segments;
        let _: fn() -> RevealAnimator = RevealAnimator::default;
    }

    #[test]
    fn test_error_messages() {
        let error = DataError::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(
            error.to_string(),
            "Overpass API responded with 429 Too Many Requests"
        );
    }
}
