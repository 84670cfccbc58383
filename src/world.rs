//! Map data container
//!
//! Runs the full generation pipeline and bundles its products:
//! sites -> Voronoi diagram -> elevation -> features -> coastlines.

use std::path::Path;

use crate::coastline::{self, CoastlineStats, Polyline};
use crate::diagram::{self, Diagram, DiagramError};
use crate::features::{self, Cell, FeatureSummary};
use crate::params::MapParams;
use crate::render::{self, ExportError};
use crate::seeds::MapSeeds;
use crate::terrain;

/// All generated map data bundled together
pub struct MapWorld {
    pub params: MapParams,
    /// Seeds used for generation (allows recreation)
    pub seeds: MapSeeds,
    pub diagram: Diagram,
    /// Elevation and classification per cell, in diagram cell order
    pub cells: Vec<Cell>,
    /// Land coasts first, then lake shores
    pub coastlines: Vec<Polyline>,
}

impl MapWorld {
    /// Generate a map with seeds derived from `params.seed`.
    pub fn generate(params: &MapParams) -> Result<Self, DiagramError> {
        Self::generate_with_seeds(params, MapSeeds::from_master(params.seed))
    }

    pub fn generate_with_seeds(params: &MapParams, seeds: MapSeeds) -> Result<Self, DiagramError> {
        let width = params.width as f64;
        let height = params.height as f64;

        let diagram = diagram::build_voronoi(width, height, params.pds_max_distance, seeds.sites)?;
        let elevation = terrain::generate_elevation(
            &diagram.sites,
            width,
            height,
            &params.elevation,
            seeds.elevation,
        );
        let cells = features::classify_cells(&diagram, &elevation, params.sea_level);
        let coastlines = coastline::extract_coastlines(&diagram, &cells, params.sea_level);

        Ok(Self {
            params: params.clone(),
            seeds,
            diagram,
            cells,
            coastlines,
        })
    }

    pub fn coastline_stats(&self) -> CoastlineStats {
        CoastlineStats::from_polylines(&self.coastlines)
    }

    pub fn feature_summary(&self) -> FeatureSummary {
        features::summarize(&self.cells)
    }

    pub fn render_svg(&self) -> String {
        render::render_svg(&self.diagram, &self.cells, &self.coastlines, &self.params)
    }

    pub fn write_svg(&self, path: &Path) -> Result<(), ExportError> {
        render::write_svg(path, &self.render_svg())
    }

    pub fn export_png(&self, path: &Path) -> Result<(), ExportError> {
        render::export_png(path, &self.diagram, &self.cells, &self.coastlines, &self.params)
    }
}
