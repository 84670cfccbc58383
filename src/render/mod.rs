//! Map rendering: SVG documents and PNG rasters

pub mod colors;
pub mod png;
pub mod svg;

pub use png::{export_png, rasterize};
pub use svg::render_svg;

use std::fs;
use std::path::Path;

use crate::features::Cell;
use crate::params::MapParams;
use crate::terrain::quantize_step;

/// Value used to color a cell: its elevation, or its step band
pub fn cell_value(cell: &Cell, params: &MapParams) -> f32 {
    if params.render.polygon.use_step_instead_of_elevation && params.elevation.step.apply {
        quantize_step(cell.elevation)
    } else {
        cell.elevation
    }
}

/// Write an SVG document to disk.
pub fn write_svg(path: &Path, svg: &str) -> Result<(), ExportError> {
    fs::write(path, svg).map_err(ExportError::Io)
}

/// Errors that can occur while writing map files
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Image(image::ImageError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureType;

    #[test]
    fn test_cell_value_uses_step_when_enabled() {
        let cell = Cell { elevation: 0.47, feature_type: FeatureType::Land, feature_index: 0 };
        let mut params = MapParams::default();
        assert_eq!(cell_value(&cell, &params), 0.47);

        params.render.polygon.use_step_instead_of_elevation = true;
        assert!((cell_value(&cell, &params) - 0.4).abs() < 1e-6);

        params.elevation.step.apply = false;
        assert_eq!(cell_value(&cell, &params), 0.47);
    }
}
