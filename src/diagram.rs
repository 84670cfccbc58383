//! Planar subdivision (Voronoi diagram) over the map
//!
//! Sites come from Poisson-disk sampling; the diagram is the dual of their
//! Delaunay triangulation. Every cell knows its incident edges (half-edges)
//! and every edge knows the cells on either side. Edges on the outer border
//! have only one cell.

use std::collections::HashMap;

use fast_poisson::Poisson2D;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::coastline::types::Point;

// =============================================================================
// ADAPTER
// =============================================================================

/// An edge between two cells (or one cell and the map border)
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub p0: Point,
    pub p1: Point,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl Edge {
    pub fn new(p0: Point, p1: Point, left: Option<usize>, right: Option<usize>) -> Self {
        Self { p0, p1, left, right }
    }

    /// The cell across this edge from `cell`.
    ///
    /// Returns `None` for border edges, which lack a cell on one side.
    pub fn other_cell(&self, cell: usize) -> Option<usize> {
        let (left, right) = (self.left?, self.right?);
        Some(if left == cell { right } else { left })
    }

    pub fn is_border(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }
}

/// Read access to a finished cell/edge graph.
///
/// Iteration order of `halfedges` must be stable between calls; coastline
/// stitching depends on it.
pub trait PlanarSubdivision {
    fn cell_count(&self) -> usize;

    /// Indices of the edges incident to `cell`
    fn halfedges(&self, cell: usize) -> &[usize];

    fn edge(&self, index: usize) -> &Edge;

    /// Cells sharing an edge with `cell`, in half-edge order
    fn neighbors(&self, cell: usize) -> Vec<usize> {
        self.halfedges(cell)
            .iter()
            .filter_map(|&e| self.edge(e).other_cell(cell))
            .collect()
    }

    /// Whether `cell` owns an edge on the outer border
    fn is_border_cell(&self, cell: usize) -> bool {
        self.halfedges(cell).iter().any(|&e| self.edge(e).is_border())
    }
}

// =============================================================================
// DIAGRAM
// =============================================================================

/// Errors raised while building a diagram
#[derive(Debug)]
pub enum DiagramError {
    TooFewSites(usize),
    Triangulation(String),
}

impl std::fmt::Display for DiagramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagramError::TooFewSites(n) => write!(f, "Need at least 3 sites, got {}", n),
            DiagramError::Triangulation(e) => write!(f, "Triangulation error: {}", e),
        }
    }
}

impl std::error::Error for DiagramError {}

/// A concrete planar subdivision
#[derive(Clone, Debug)]
pub struct Diagram {
    pub sites: Vec<Point>,
    pub edges: Vec<Edge>,
    /// Per cell, indices into `edges`
    pub halfedges: Vec<Vec<usize>>,
    /// Delaunay triangles, kept for debug rendering
    pub triangles: Vec<[Point; 3]>,
}

impl Diagram {
    pub fn new(
        sites: Vec<Point>,
        edges: Vec<Edge>,
        halfedges: Vec<Vec<usize>>,
        triangles: Vec<[Point; 3]>,
    ) -> Self {
        Self { sites, edges, halfedges, triangles }
    }

    /// Polygon outline of a cell, vertices ordered by angle.
    pub fn cell_polygon(&self, cell: usize) -> Vec<Point> {
        let mut seen = HashMap::new();
        let mut vertices = Vec::new();
        for &e in &self.halfedges[cell] {
            let edge = &self.edges[e];
            for p in [edge.p0, edge.p1] {
                if seen.insert(p.key(), ()).is_none() {
                    vertices.push(p);
                }
            }
        }
        if vertices.len() < 3 {
            return vertices;
        }

        // Sort around the vertex mean; hull cells have their site on the outline
        let n = vertices.len() as f64;
        let cx = vertices.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = vertices.iter().map(|p| p.y).sum::<f64>() / n;
        vertices.sort_by(|a, b| {
            let angle_a = (a.y - cy).atan2(a.x - cx);
            let angle_b = (b.y - cy).atan2(b.x - cx);
            angle_a.total_cmp(&angle_b)
        });
        vertices
    }
}

impl PlanarSubdivision for Diagram {
    fn cell_count(&self) -> usize {
        self.sites.len()
    }

    fn halfedges(&self, cell: usize) -> &[usize] {
        &self.halfedges[cell]
    }

    fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Poisson-disk sites covering a `width` x `height` map.
pub fn poisson_sites(width: f64, height: f64, min_distance: f64, seed: u64) -> Vec<Point> {
    Poisson2D::new()
        .with_seed(seed)
        .with_dimensions([width, height], min_distance)
        .into_iter()
        .map(|p| Point::new(p[0], p[1]))
        .collect()
}

/// Build a Voronoi diagram from Poisson-disk sites.
pub fn build_voronoi(
    width: f64,
    height: f64,
    min_distance: f64,
    seed: u64,
) -> Result<Diagram, DiagramError> {
    let sites = poisson_sites(width, height, min_distance, seed);
    voronoi_from_sites(&sites, width, height)
}

/// Build a Voronoi diagram from explicit sites.
///
/// Cells are indexed in the triangulation's vertex order, which is the
/// insertion order of `sites` with exact duplicates dropped. Circumcenters
/// are clamped to the map rectangle.
///
/// Each Delaunay edge becomes one Voronoi edge:
/// - interior edge: between the circumcenters of its two triangles
/// - hull edge: from the inner triangle's circumcenter to the hull edge's
///   midpoint, plus one border edge per end (midpoint to hull site) that
///   closes the hull cell. Border edges have no right cell.
pub fn voronoi_from_sites(
    sites: &[Point],
    width: f64,
    height: f64,
) -> Result<Diagram, DiagramError> {
    if sites.len() < 3 {
        return Err(DiagramError::TooFewSites(sites.len()));
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for site in sites {
        triangulation
            .insert(Point2::new(site.x, site.y))
            .map_err(|e| DiagramError::Triangulation(format!("{:?}", e)))?;
    }

    let cell_count = triangulation.num_vertices();
    if cell_count < 3 {
        return Err(DiagramError::TooFewSites(cell_count));
    }

    let cell_sites: Vec<Point> = triangulation
        .vertices()
        .map(|v| {
            let p = v.position();
            Point::new(p.x, p.y)
        })
        .collect();

    let clamp = |p: Point2<f64>| Point::new(p.x.clamp(0.0, width), p.y.clamp(0.0, height));

    let mut edges = Vec::new();
    let mut edge_of_pair: HashMap<(usize, usize), usize> = HashMap::new();
    let mut border_edges: Vec<Vec<usize>> = vec![Vec::new(); cell_count];

    for directed in triangulation.directed_edges() {
        let a = directed.from().fix().index();
        let b = directed.to().fix().index();
        if a > b {
            continue;
        }

        let left_face = directed.face().as_inner();
        let right_face = directed.rev().face().as_inner();

        match (left_face, right_face) {
            (Some(l), Some(r)) => {
                edge_of_pair.insert((a, b), edges.len());
                edges.push(Edge::new(
                    clamp(l.circumcenter()),
                    clamp(r.circumcenter()),
                    Some(a),
                    Some(b),
                ));
            }
            (Some(face), None) | (None, Some(face)) => {
                let mid = cell_sites[a].midpoint(&cell_sites[b]);
                edge_of_pair.insert((a, b), edges.len());
                edges.push(Edge::new(clamp(face.circumcenter()), mid, Some(a), Some(b)));

                for cell in [a, b] {
                    border_edges[cell].push(edges.len());
                    edges.push(Edge::new(mid, cell_sites[cell], Some(cell), None));
                }
            }
            // Only possible when every site is collinear
            (None, None) => {}
        }
    }

    let mut halfedges = Vec::with_capacity(cell_count);
    for vertex in triangulation.vertices() {
        let v = vertex.fix().index();
        let mut incident = Vec::new();
        for out in vertex.out_edges() {
            let w = out.to().fix().index();
            if let Some(&e) = edge_of_pair.get(&(v.min(w), v.max(w))) {
                incident.push(e);
            }
        }
        incident.extend(border_edges[v].iter().copied());
        halfedges.push(incident);
    }

    let triangles = triangulation
        .inner_faces()
        .map(|face| {
            face.vertices().map(|v| {
                let p = v.position();
                Point::new(p.x, p.y)
            })
        })
        .collect();

    Ok(Diagram::new(cell_sites, edges, halfedges, triangles))
}
