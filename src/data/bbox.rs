//! Padded query region derived from the start and end coordinates

use super::Coordinate;
use std::fmt;

/// Fraction of each axis span added on both sides of the box
pub const PADDING_RATIO: f64 = 0.1;

/// Axis-aligned latitude/longitude box
///
/// Always derived from two coordinates via [`BoundingBox::padded`], never
/// edited field by field. Its `Display` form is the `south,west,north,east`
/// order Overpass expects in a bbox filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box spanning `a` and `b`, grown by [`PADDING_RATIO`] of the span on each axis.
    ///
    /// Identical points give a zero-sized box. A NaN component turns both
    /// bounds of its axis into NaN.
    pub fn padded(a: Coordinate, b: Coordinate) -> Self {
        let (min_lat, max_lat) = padded_axis(a.lat, b.lat);
        let (min_lon, max_lon) = padded_axis(a.lon, b.lon);
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.min_lat, self.min_lon, self.max_lat, self.max_lon]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Whether both boxes describe the same query region, treating NaN bounds as equal.
    pub fn same_region(&self, other: &Self) -> bool {
        fn eq(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        eq(self.min_lat, other.min_lat)
            && eq(self.min_lon, other.min_lon)
            && eq(self.max_lat, other.max_lat)
            && eq(self.max_lon, other.max_lon)
    }

    /// As a `geo::Rect` with x = longitude and y = latitude
    pub fn to_rect(&self) -> geo::Rect<f64> {
        geo::Rect::new(
            geo::Coord {
                x: self.min_lon,
                y: self.min_lat,
            },
            geo::Coord {
                x: self.max_lon,
                y: self.max_lat,
            },
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

fn padded_axis(a: f64, b: f64) -> (f64, f64) {
    // Comparisons with NaN are false, so a NaN input lands in the span below.
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    let span = max - min;
    (min - PADDING_RATIO * span, max + PADDING_RATIO * span)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Coordinate = Coordinate::new(49.982967, 36.183048);
    const END: Coordinate = Coordinate::new(49.992669, 36.231978);

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_default_scenario() {
        let bbox = BoundingBox::padded(START, END);

        let lat_span = END.lat - START.lat;
        let lon_span = END.lon - START.lon;
        assert_close(bbox.min_lat, START.lat - 0.1 * lat_span);
        assert_close(bbox.max_lat, END.lat + 0.1 * lat_span);
        assert_close(bbox.min_lon, START.lon - 0.1 * lon_span);
        assert_close(bbox.max_lon, END.lon + 0.1 * lon_span);

        assert!((bbox.min_lat - 49.982).abs() < 0.001);
        assert!((bbox.max_lat - 49.993).abs() < 0.001);
    }

    #[test]
    fn test_order_of_corners_does_not_matter() {
        let forward = BoundingBox::padded(START, END);
        let backward = BoundingBox::padded(END, START);
        assert_eq!(forward, backward);

        let crossed = BoundingBox::padded(
            Coordinate::new(START.lat, END.lon),
            Coordinate::new(END.lat, START.lon),
        );
        assert_eq!(forward, crossed);
    }

    #[test]
    fn test_contains_both_corners() {
        let points = [
            (START, END),
            (Coordinate::new(-10.0, 170.0), Coordinate::new(10.0, -170.0)),
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.5, 0.0)),
        ];
        for (a, b) in points {
            let bbox = BoundingBox::padded(a, b);
            assert!(bbox.contains(a), "{bbox} should contain {a}");
            assert!(bbox.contains(b), "{bbox} should contain {b}");
        }
    }

    #[test]
    fn test_identical_points_have_no_padding() {
        let bbox = BoundingBox::padded(START, START);
        assert_eq!(bbox.min_lat, START.lat);
        assert_eq!(bbox.max_lat, START.lat);
        assert_eq!(bbox.min_lon, START.lon);
        assert_eq!(bbox.max_lon, START.lon);
        assert_eq!(bbox.center(), START);
    }

    #[test]
    fn test_query_string_format() {
        let bbox = BoundingBox::padded(Coordinate::new(0.0, 10.0), Coordinate::new(10.0, 20.0));
        assert_eq!(bbox.to_string(), "-1,9,11,21");
    }

    #[test]
    fn test_nan_propagates_to_its_axis_only() {
        let bbox = BoundingBox::padded(Coordinate::new(f64::NAN, 1.0), Coordinate::new(2.0, 3.0));
        assert!(bbox.min_lat.is_nan());
        assert!(bbox.max_lat.is_nan());
        assert!(bbox.min_lon.is_finite());
        assert!(bbox.max_lon.is_finite());
        assert!(!bbox.is_finite());
        assert!(bbox.to_string().starts_with("NaN,"));
    }

    #[test]
    fn test_same_region() {
        let a = BoundingBox::padded(START, END);
        assert!(a.same_region(&BoundingBox::padded(END, START)));
        assert!(!a.same_region(&BoundingBox::padded(START, START)));

        let nan = Coordinate::new(f64::NAN, f64::NAN);
        let broken = BoundingBox::padded(nan, END);
        assert!(broken.same_region(&BoundingBox::padded(nan, END)));
        assert!(!broken.same_region(&a));
    }

    #[test]
    fn test_to_rect_axes() {
        let bbox = BoundingBox::padded(Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 2.0));
        let rect = bbox.to_rect();
        assert_eq!(rect.min(), geo::Coord { x: 2.0, y: 1.0 });
        assert_eq!(rect.max(), geo::Coord { x: 2.0, y: 1.0 });
    }
}
