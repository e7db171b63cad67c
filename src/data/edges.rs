//! Flattening of way geometry into sorted straight segments

use super::GeoElement;
use geo::{Coord, Line};
use std::cmp::Ordering;

/// One straight edge between consecutive geometry points of a way.
///
/// `start` and `end` use x = longitude and y = latitude.
pub type Segment = Line<f64>;

/// Extract every edge of every way and sort them by `(lon1, lat1)`.
///
/// A way with n geometry points contributes n - 1 segments, so ways with
/// fewer than two points contribute nothing. Nodes and other elements are
/// ignored. The sort is stable, so edges sharing a start point keep their
/// input order.
pub fn extract_segments(elements: &[GeoElement]) -> Vec<Segment> {
    profiling::scope!("extract_segments");

    let mut segments: Vec<Segment> = elements
        .iter()
        .filter_map(GeoElement::as_way)
        .flat_map(|way| {
            way.geometry.windows(2).map(|pair| {
                Line::new(
                    Coord {
                        x: pair[0].lon,
                        y: pair[0].lat,
                    },
                    Coord {
                        x: pair[1].lon,
                        y: pair[1].lat,
                    },
                )
            })
        })
        .collect();

    segments.sort_by(compare_segments);
    segments
}

/// Ascending start longitude, then ascending start latitude
pub fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    a.start
        .x
        .total_cmp(&b.start.x)
        .then_with(|| a.start.y.total_cmp(&b.start.y))
}

/// Number of segments [`extract_segments`] produces for `elements`
pub fn segment_count(elements: &[GeoElement]) -> usize {
    elements
        .iter()
        .filter_map(GeoElement::as_way)
        .map(|way| way.geometry.len().saturating_sub(1))
        .sum()
}
