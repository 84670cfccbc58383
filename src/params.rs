//! Configuration parameters for map generation
//!
//! Every struct uses `#[serde(default)]`, so a JSON file only needs the
//! fields it wants to change.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// ELEVATION
// =============================================================================

/// Multi-octave noise synthesis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctavationParams {
    pub apply: bool,
    /// Number of octaves
    pub iterations: u32,
    /// Amplitude decay per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Base frequency across the map's larger dimension
    pub frequency: f64,
    pub standard_ratio: f64,
    pub billowed_ratio: f64,
    pub ridged_ratio: f64,
}

impl Default for OctavationParams {
    fn default() -> Self {
        Self {
            apply: true,
            iterations: 10,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 2.0,
            standard_ratio: 1.0,
            billowed_ratio: 0.0,
            ridged_ratio: 0.0,
        }
    }
}

/// Power curve applied to raw elevation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptingParams {
    pub apply: bool,
    pub amount: f64,
}

impl Default for SculptingParams {
    fn default() -> Self {
        Self { apply: true, amount: 2.0 }
    }
}

/// Radial falloff that sinks the map border
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandMaskParams {
    pub apply: bool,
    /// Border band that is forced under water, in percent of the half-extent
    pub margin: f64,
}

impl Default for IslandMaskParams {
    fn default() -> Self {
        Self { apply: true, margin: 5.0 }
    }
}

/// A stage that is either on or off
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub apply: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self { apply: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationParams {
    pub octavation: OctavationParams,
    pub sculpting: SculptingParams,
    pub island_mask: IslandMaskParams,
    pub normalize: Toggle,
    /// Quantize elevation into 0.1 bands for step rendering
    pub step: Toggle,
}

// =============================================================================
// RENDERING
// =============================================================================

/// SVG `shape-rendering` hint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeRendering {
    Auto,
    OptimizeSpeed,
    #[default]
    CrispEdges,
    GeometricPrecision,
}

impl ShapeRendering {
    pub fn svg_value(&self) -> &'static str {
        match self {
            ShapeRendering::Auto => "auto",
            ShapeRendering::OptimizeSpeed => "optimizeSpeed",
            ShapeRendering::CrispEdges => "crispEdges",
            ShapeRendering::GeometricPrecision => "geometricPrecision",
        }
    }
}

/// How cell polygons are filled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Greyscale,
    FeatureType,
    #[default]
    Colorized,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonParams {
    pub use_step_instead_of_elevation: bool,
    pub color: ColorMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub shape_rendering: ShapeRendering,
    pub polygon: PolygonParams,
    pub draw_coastline: bool,
    pub draw_triangles: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            shape_rendering: ShapeRendering::default(),
            polygon: PolygonParams::default(),
            draw_coastline: true,
            draw_triangles: false,
        }
    }
}

// =============================================================================
// MAP
// =============================================================================

/// Top-level map configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapParams {
    /// Minimum distance between Poisson-disk sites
    pub pds_max_distance: f64,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub export_png: bool,
    /// Elevation threshold separating water from land (0..1)
    pub sea_level: f32,
    pub elevation: ElevationParams,
    pub render: RenderParams,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            pds_max_distance: 4.0,
            width: 700,
            height: 700,
            seed: 1337,
            export_png: false,
            sea_level: 0.2,
            elevation: ElevationParams::default(),
            render: RenderParams::default(),
        }
    }
}

impl MapParams {
    /// Small, coarse map for quick runs and tests
    pub fn small() -> Self {
        Self {
            width: 160,
            height: 120,
            pds_max_distance: 6.0,
            ..Default::default()
        }
    }

    /// Read parameters from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let text = fs::read_to_string(path).map_err(ParamsError::Io)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ParamsError> {
        let params: MapParams =
            serde_json::from_str(text).map_err(|e| ParamsError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Write parameters to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ParamsError> {
        let text =
            serde_json::to_string_pretty(self).map_err(|e| ParamsError::Parse(e.to_string()))?;
        fs::write(path, text).map_err(ParamsError::Io)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParamsError::Invalid(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.sea_level) {
            return Err(ParamsError::Invalid(format!(
                "sea_level must be within 0..1, got {}",
                self.sea_level
            )));
        }
        if !(self.pds_max_distance > 0.0) {
            return Err(ParamsError::Invalid(format!(
                "pds_max_distance must be positive, got {}",
                self.pds_max_distance
            )));
        }
        if self.elevation.octavation.apply && self.elevation.octavation.iterations == 0 {
            return Err(ParamsError::Invalid("octavation needs at least one iteration".into()));
        }
        Ok(())
    }
}

/// Errors that can occur while loading or saving parameters
#[derive(Debug)]
pub enum ParamsError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "I/O error: {}", e),
            ParamsError::Parse(e) => write!(f, "Parse error: {}", e),
            ParamsError::Invalid(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl std::error::Error for ParamsError {}
