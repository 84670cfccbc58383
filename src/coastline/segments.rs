//! Boundary edge collection
//!
//! Walks every exposed cell and emits one [`BoundarySegment`] for each edge
//! it shares with a submerged neighbour.

use super::types::{BoundaryKind, BoundarySegment};
use crate::diagram::PlanarSubdivision;
use crate::features::{Cell, FeatureType};

/// Collect all coast segments of a classified subdivision.
///
/// Cells are visited in index order and each cell's half-edges in the order
/// the subdivision stores them, so the output order is stable for a given
/// input. Edges without a cell on both sides (the map border) are skipped.
///
/// Segment numbering:
/// - neighbour is Ocean: `Land`, numbered by the exposed cell's feature index
/// - otherwise: `Lake`, numbered by the submerged neighbour's feature index
pub fn collect_boundary_segments<S: PlanarSubdivision + ?Sized>(
    subdivision: &S,
    cells: &[Cell],
    sea_level: f32,
) -> Vec<BoundarySegment> {
    let mut segments = Vec::new();
    let count = subdivision.cell_count().min(cells.len());

    for i in 0..count {
        let cell = &cells[i];
        if cell.elevation < sea_level {
            continue;
        }

        for &edge_index in subdivision.halfedges(i) {
            let edge = subdivision.edge(edge_index);
            let Some(j) = edge.other_cell(i) else {
                continue;
            };
            let Some(neighbor) = cells.get(j) else {
                continue;
            };
            if neighbor.elevation >= sea_level {
                continue;
            }

            let (kind, feature_number) = match neighbor.feature_type {
                FeatureType::Ocean => (BoundaryKind::Land, cell.feature_index),
                _ => (BoundaryKind::Lake, neighbor.feature_index),
            };

            segments.push(BoundarySegment::new(edge.p0, edge.p1, kind, feature_number));
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coastline::types::Point;
    use crate::diagram::{Diagram, Edge};

    fn cell(elevation: f32, feature_type: FeatureType, feature_index: usize) -> Cell {
        Cell { elevation, feature_type, feature_index }
    }

    /// Three cells in a row: 0 | 1 | 2, sharing vertical edges at x=1 and x=2.
    /// Cell 0 also owns a border edge on its left side.
    fn strip() -> Diagram {
        let sites = vec![
            Point::new(0.5, 0.5),
            Point::new(1.5, 0.5),
            Point::new(2.5, 0.5),
        ];
        let edges = vec![
            Edge::new(Point::new(1.0, 0.0), Point::new(1.0, 1.0), Some(0), Some(1)),
            Edge::new(Point::new(2.0, 0.0), Point::new(2.0, 1.0), Some(1), Some(2)),
            Edge::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0), Some(0), None),
        ];
        let halfedges = vec![vec![2, 0], vec![0, 1], vec![1]];
        Diagram::new(sites, edges, halfedges, Vec::new())
    }

    #[test]
    fn test_land_against_ocean_uses_land_index() {
        let diagram = strip();
        let cells = vec![
            cell(0.1, FeatureType::Ocean, 0),
            cell(0.5, FeatureType::Land, 3),
            cell(0.6, FeatureType::Land, 3),
        ];

        let segments = collect_boundary_segments(&diagram, &cells, 0.2);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, BoundaryKind::Land);
        assert_eq!(segments[0].feature_number, 3);
        assert_eq!(segments[0].start, Point::new(1.0, 0.0));
        assert_eq!(segments[0].end, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_land_against_lake_uses_lake_index() {
        let diagram = strip();
        let cells = vec![
            cell(0.5, FeatureType::Land, 0),
            cell(0.1, FeatureType::Lake, 7),
            cell(0.6, FeatureType::Land, 0),
        ];

        let segments = collect_boundary_segments(&diagram, &cells, 0.2);
        assert_eq!(segments.len(), 2);
        for seg in &segments {
            assert_eq!(seg.kind, BoundaryKind::Lake);
            assert_eq!(seg.feature_number, 7);
        }
        // Discovery order follows cell order
        assert_eq!(segments[0].start, Point::new(1.0, 0.0));
        assert_eq!(segments[1].start, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_every_segment_straddles_sea_level() {
        let diagram = strip();
        let cells = vec![
            cell(0.3, FeatureType::Land, 0),
            cell(0.05, FeatureType::Ocean, 0),
            cell(0.2, FeatureType::Land, 1),
        ];
        let sea_level = 0.2;

        let segments = collect_boundary_segments(&diagram, &cells, sea_level);
        assert_eq!(segments.len(), 2);
        for seg in &segments {
            let edge = diagram
                .edges
                .iter()
                .find(|e| e.p0 == seg.start && e.p1 == seg.end)
                .unwrap();
            let a = cells[edge.left.unwrap()].elevation;
            let b = cells[edge.right.unwrap()].elevation;
            assert!((a >= sea_level) != (b >= sea_level));
        }
    }

    #[test]
    fn test_border_edges_are_skipped() {
        let diagram = strip();
        // Cell 0 is land and only touches the border on its left; no submerged
        // neighbour exists across interior edges.
        let cells = vec![
            cell(0.9, FeatureType::Land, 0),
            cell(0.9, FeatureType::Land, 0),
            cell(0.9, FeatureType::Land, 0),
        ];
        assert!(collect_boundary_segments(&diagram, &cells, 0.2).is_empty());
    }

    #[test]
    fn test_all_submerged_yields_nothing() {
        let diagram = strip();
        let cells = vec![
            cell(0.0, FeatureType::Ocean, 0),
            cell(0.1, FeatureType::Ocean, 0),
            cell(0.15, FeatureType::Ocean, 0),
        ];
        assert!(collect_boundary_segments(&diagram, &cells, 0.2).is_empty());
    }
}
