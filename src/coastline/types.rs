//! Shared coastline data types
//!
//! Points, canonical endpoint keys, boundary segments and the stitched
//! polylines handed to the renderer.

use serde::{Deserialize, Serialize};

/// Maximum number of extension steps for a single polyline.
pub const ITERATION_CAP: usize = 2000;

/// Quantization factor for endpoint keys (1e-6 map units).
const KEY_PRECISION: f64 = 1_000_000.0;

// =============================================================================
// POINTS
// =============================================================================

/// A 2D point in map coordinates
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Canonical key used for endpoint matching
    pub fn key(&self) -> PointKey {
        PointKey::from(*self)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Quantized, hashable form of a [`Point`].
///
/// Two endpoints are the same vertex when their keys are equal. Coordinates
/// are rounded to a fixed precision so values that differ only by
/// floating-point noise still compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointKey(pub i64, pub i64);

impl From<Point> for PointKey {
    fn from(p: Point) -> Self {
        PointKey(
            (p.x * KEY_PRECISION).round() as i64,
            (p.y * KEY_PRECISION).round() as i64,
        )
    }
}

// =============================================================================
// SEGMENTS AND POLYLINES
// =============================================================================

/// Which kind of coast a boundary belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// Land against ocean, numbered by the landmass
    Land,
    /// Land against lake, numbered by the lake
    Lake,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 2] = [BoundaryKind::Land, BoundaryKind::Lake];

    pub fn display_name(&self) -> &'static str {
        match self {
            BoundaryKind::Land => "Land",
            BoundaryKind::Lake => "Lake",
        }
    }
}

/// A single diagram edge that lies on a coast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundarySegment {
    pub start: Point,
    pub end: Point,
    pub kind: BoundaryKind,
    pub feature_number: usize,
}

impl BoundarySegment {
    pub fn new(start: Point, end: Point, kind: BoundaryKind, feature_number: usize) -> Self {
        Self { start, end, kind, feature_number }
    }

    /// The endpoint opposite the one matching `key`, if either matches.
    pub fn other_end(&self, key: PointKey) -> Option<Point> {
        if self.start.key() == key {
            Some(self.end)
        } else if self.end.key() == key {
            Some(self.start)
        } else {
            None
        }
    }
}

/// An ordered chain of coast points for one landmass or lake
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub kind: BoundaryKind,
    pub feature_number: usize,
    pub points: Vec<Point>,
    /// True iff the chain returned to its first point before the step cap
    pub closed: bool,
}

impl Polyline {
    /// Total length along the chain
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_float_noise() {
        let a = Point::new(0.1 + 0.2, 1.0);
        let b = Point::new(0.3, 1.0);
        assert_ne!(a.x, b.x);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_close_points() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(10.00001, 10.0);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_other_end() {
        let seg = BoundarySegment::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            BoundaryKind::Land,
            0,
        );
        assert_eq!(seg.other_end(Point::new(0.0, 0.0).key()), Some(Point::new(1.0, 0.0)));
        assert_eq!(seg.other_end(Point::new(1.0, 0.0).key()), Some(Point::new(0.0, 0.0)));
        assert_eq!(seg.other_end(Point::new(5.0, 5.0).key()), None);
    }

    #[test]
    fn test_polyline_length() {
        let line = Polyline {
            kind: BoundaryKind::Lake,
            feature_number: 0,
            points: vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 5.0)],
            closed: false,
        };
        assert!((line.length() - 6.0).abs() < 1e-9);
    }
}
