//! Coastline extraction
//!
//! Turns a classified planar subdivision into closed (or, for broken input,
//! open) polylines tracing every land/ocean and land/lake boundary:
//!
//! 1. [`collect_boundary_segments`] emits one segment per edge between an
//!    exposed cell and a submerged neighbour.
//! 2. [`stitch_coastlines`] chains the segments of each landmass or lake
//!    into ordered polylines.

pub mod segments;
pub mod stitch;
pub mod types;

pub use segments::collect_boundary_segments;
pub use stitch::{stitch_coastlines, stitch_feature, SegmentArena};
pub use types::{BoundaryKind, BoundarySegment, Point, PointKey, Polyline, ITERATION_CAP};

use crate::diagram::PlanarSubdivision;
use crate::features::Cell;

/// Extract all coastline polylines in one pass.
pub fn extract_coastlines<S: PlanarSubdivision + ?Sized>(
    subdivision: &S,
    cells: &[Cell],
    sea_level: f32,
) -> Vec<Polyline> {
    let segments = collect_boundary_segments(subdivision, cells, sea_level);
    stitch_coastlines(&segments)
}

/// Summary counts for a set of coastline polylines
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoastlineStats {
    pub land_polylines: usize,
    pub lake_polylines: usize,
    pub closed: usize,
    pub open: usize,
    pub points: usize,
}

impl CoastlineStats {
    pub fn from_polylines(polylines: &[Polyline]) -> Self {
        let mut stats = CoastlineStats::default();
        for line in polylines {
            match line.kind {
                BoundaryKind::Land => stats.land_polylines += 1,
                BoundaryKind::Lake => stats.lake_polylines += 1,
            }
            if line.closed {
                stats.closed += 1;
            } else {
                stats.open += 1;
            }
            stats.points += line.points.len();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Diagram, Edge};
    use crate::features::FeatureType;

    /// A 3x3 block of unit squares. The centre cell (4) is an island in an
    /// ocean ring; the ring's outer sides are border edges.
    fn island_grid(center: FeatureType) -> (Diagram, Vec<Cell>) {
        let mut sites = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                sites.push(Point::new(x as f64 + 0.5, y as f64 + 0.5));
            }
        }

        let mut edges = Vec::new();
        let mut halfedges = vec![Vec::new(); 9];
        let idx = |x: usize, y: usize| y * 3 + x;

        // Vertical edges x = 0..=3, horizontal edges y = 0..=3
        for y in 0..3 {
            for x in 0..=3 {
                let left = if x > 0 { Some(idx(x - 1, y)) } else { None };
                let right = if x < 3 { Some(idx(x, y)) } else { None };
                let p0 = Point::new(x as f64, y as f64);
                let p1 = Point::new(x as f64, y as f64 + 1.0);
                let (l, r) = match (left, right) {
                    (Some(l), r) => (Some(l), r),
                    (None, r) => (r, None),
                };
                let e = edges.len();
                edges.push(Edge::new(p0, p1, l, r));
                for c in [l, r].into_iter().flatten() {
                    halfedges[c].push(e);
                }
            }
        }
        for y in 0..=3 {
            for x in 0..3 {
                let below = if y > 0 { Some(idx(x, y - 1)) } else { None };
                let above = if y < 3 { Some(idx(x, y)) } else { None };
                let p0 = Point::new(x as f64, y as f64);
                let p1 = Point::new(x as f64 + 1.0, y as f64);
                let (l, r) = match (below, above) {
                    (Some(b), a) => (Some(b), a),
                    (None, a) => (a, None),
                };
                let e = edges.len();
                edges.push(Edge::new(p0, p1, l, r));
                for c in [l, r].into_iter().flatten() {
                    halfedges[c].push(e);
                }
            }
        }

        let diagram = Diagram::new(sites, edges, halfedges, Vec::new());
        let mut cells: Vec<Cell> = (0..9)
            .map(|_| Cell {
                elevation: 0.0,
                feature_type: FeatureType::Ocean,
                feature_index: 0,
            })
            .collect();
        cells[4] = Cell {
            elevation: 0.8,
            feature_type: center,
            feature_index: 0,
        };
        (diagram, cells)
    }

    #[test]
    fn test_island_is_one_closed_loop() {
        let (diagram, cells) = island_grid(FeatureType::Land);
        let polylines = extract_coastlines(&diagram, &cells, 0.2);

        assert_eq!(polylines.len(), 1);
        let line = &polylines[0];
        assert_eq!(line.kind, BoundaryKind::Land);
        assert!(line.closed);
        assert_eq!(line.points.len(), 5);
        assert_eq!(line.points.first(), line.points.last());
        assert!((line.length() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_lake_shore_numbered_by_lake() {
        let (diagram, mut cells) = island_grid(FeatureType::Lake);
        for cell in cells.iter_mut() {
            cell.elevation = 0.9;
            cell.feature_type = FeatureType::Land;
        }
        cells[4] = Cell { elevation: 0.05, feature_type: FeatureType::Lake, feature_index: 0 };

        let polylines = extract_coastlines(&diagram, &cells, 0.2);
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].kind, BoundaryKind::Lake);
        assert_eq!(polylines[0].feature_number, 0);
        assert!(polylines[0].closed);
    }

    #[test]
    fn test_stats() {
        let (diagram, cells) = island_grid(FeatureType::Land);
        let polylines = extract_coastlines(&diagram, &cells, 0.2);
        let stats = CoastlineStats::from_polylines(&polylines);
        assert_eq!(
            stats,
            CoastlineStats {
                land_polylines: 1,
                lake_polylines: 0,
                closed: 1,
                open: 0,
                points: 5,
            }
        );
    }

    #[test]
    fn test_sea_level_above_everything() {
        let (diagram, cells) = island_grid(FeatureType::Land);
        assert!(extract_coastlines(&diagram, &cells, 1.0).is_empty());
    }
}
