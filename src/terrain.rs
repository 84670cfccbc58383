//! Per-cell elevation synthesis
//!
//! Layered pipeline, each stage gated by its parameters:
//! 1. Multi-octave noise (standard, billowed and ridged blends)
//! 2. Sculpting (power curve)
//! 3. Island mask (sinks the map border)
//! 4. Normalization to 0..1

use noise::{NoiseFn, Simplex};
use rayon::prelude::*;

use crate::coastline::types::Point;
use crate::params::{ElevationParams, IslandMaskParams, OctavationParams};

/// Elevation used when octavation is disabled
const FLAT_ELEVATION: f64 = 0.5;

/// Width of one step band
const STEP_SIZE: f32 = 0.1;

// =============================================================================
// NOISE
// =============================================================================

/// Sum of octaves at a point, returned as (standard, billowed, ridged),
/// each in 0..1.
fn octave_noise(noise: &Simplex, x: f64, y: f64, params: &OctavationParams) -> (f64, f64, f64) {
    let mut amplitude = 1.0;
    let mut frequency = params.frequency;
    let mut norm = 0.0;
    let (mut standard, mut billowed, mut ridged) = (0.0, 0.0, 0.0);

    for _ in 0..params.iterations {
        let v = noise.get([x * frequency, y * frequency]).clamp(-1.0, 1.0);
        standard += v * amplitude;
        billowed += v.abs() * amplitude;
        ridged += (1.0 - v.abs()) * amplitude;

        norm += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    if norm <= 0.0 {
        return (0.5, 0.0, 1.0);
    }
    ((standard / norm + 1.0) / 2.0, billowed / norm, ridged / norm)
}

/// Blend the three noise flavours by their configured ratios.
fn blend(values: (f64, f64, f64), params: &OctavationParams) -> f64 {
    let total = params.standard_ratio + params.billowed_ratio + params.ridged_ratio;
    if total <= 0.0 {
        return values.0;
    }
    (values.0 * params.standard_ratio
        + values.1 * params.billowed_ratio
        + values.2 * params.ridged_ratio)
        / total
}

// =============================================================================
// SHAPING
// =============================================================================

/// Multiplier that falls to zero at the map border.
///
/// Cells within `margin` percent of the half-extent fade linearly to zero;
/// a gentle radial term favours land near the centre.
pub fn island_mask(p: Point, width: f64, height: f64, params: &IslandMaskParams) -> f64 {
    let nx = (p.x - width / 2.0) / (width / 2.0);
    let ny = (p.y - height / 2.0) / (height / 2.0);

    let edge_distance = 1.0 - nx.abs().max(ny.abs());
    let band = (params.margin / 100.0).max(1e-6);
    let edge = (edge_distance / band).clamp(0.0, 1.0);

    let radial = ((nx * nx + ny * ny) / 2.0).min(1.0);
    edge * (1.0 - 0.5 * radial)
}

/// Rescale values in place so they span 0..1.
pub fn normalize(values: &mut [f32]) {
    let min = values.iter().copied().fold(f32::MAX, f32::min);
    let max = values.iter().copied().fold(f32::MIN, f32::max);
    let range = max - min;

    for v in values.iter_mut() {
        *v = if range > f32::EPSILON { (*v - min) / range } else { 0.0 };
    }
}

/// Elevation quantized down to its step band
pub fn quantize_step(elevation: f32) -> f32 {
    (elevation / STEP_SIZE).floor() * STEP_SIZE
}

// =============================================================================
// MAIN GENERATION
// =============================================================================

/// Generate one elevation value per site, in site order.
pub fn generate_elevation(
    sites: &[Point],
    width: f64,
    height: f64,
    params: &ElevationParams,
    seed: u64,
) -> Vec<f32> {
    let noise = Simplex::new(seed as u32);
    let extent = width.max(height).max(1.0);

    let mut elevation: Vec<f32> = sites
        .par_iter()
        .map(|&p| {
            let mut e = if params.octavation.apply {
                let values = octave_noise(&noise, p.x / extent, p.y / extent, &params.octavation);
                blend(values, &params.octavation)
            } else {
                FLAT_ELEVATION
            };

            if params.sculpting.apply {
                e = e.clamp(0.0, 1.0).powf(params.sculpting.amount);
            }

            if params.island_mask.apply {
                e *= island_mask(p, width, height, &params.island_mask);
            }

            e as f32
        })
        .collect();

    if params.normalize.apply {
        normalize(&mut elevation);
    }

    elevation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_sites(width: f64, height: f64, step: f64) -> Vec<Point> {
        let mut sites = Vec::new();
        let mut y = step / 2.0;
        while y < height {
            let mut x = step / 2.0;
            while x < width {
                sites.push(Point::new(x, y));
                x += step;
            }
            y += step;
        }
        sites
    }

    #[test]
    fn test_normalized_range() {
        let sites = grid_sites(100.0, 100.0, 5.0);
        let elevation = generate_elevation(&sites, 100.0, 100.0, &ElevationParams::default(), 1337);

        assert_eq!(elevation.len(), sites.len());
        let min = elevation.iter().copied().fold(f32::MAX, f32::min);
        let max = elevation.iter().copied().fold(f32::MIN, f32::max);
        assert!(min.abs() < 1e-6);
        assert!((max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let sites = grid_sites(80.0, 60.0, 4.0);
        let params = ElevationParams::default();
        let a = generate_elevation(&sites, 80.0, 60.0, &params, 7);
        let b = generate_elevation(&sites, 80.0, 60.0, &params, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_terrain() {
        let sites = grid_sites(80.0, 60.0, 4.0);
        let params = ElevationParams::default();
        let a = generate_elevation(&sites, 80.0, 60.0, &params, 7);
        let b = generate_elevation(&sites, 80.0, 60.0, &params, 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_island_mask_sinks_border() {
        let params = IslandMaskParams::default();
        assert_eq!(island_mask(Point::new(0.0, 50.0), 100.0, 100.0, &params), 0.0);
        assert_eq!(island_mask(Point::new(50.0, 100.0), 100.0, 100.0, &params), 0.0);
        assert!((island_mask(Point::new(50.0, 50.0), 100.0, 100.0, &params) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_input_normalizes_to_zero() {
        let mut values = vec![0.4f32; 5];
        normalize(&mut values);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_blend_ratios() {
        let params = OctavationParams {
            standard_ratio: 0.0,
            billowed_ratio: 1.0,
            ridged_ratio: 1.0,
            ..Default::default()
        };
        assert!((blend((0.9, 0.2, 0.6), &params) - 0.4).abs() < 1e-9);

        let zero = OctavationParams {
            standard_ratio: 0.0,
            billowed_ratio: 0.0,
            ridged_ratio: 0.0,
            ..Default::default()
        };
        assert_eq!(blend((0.9, 0.2, 0.6), &zero), 0.9);
    }

    #[test]
    fn test_quantize_step() {
        assert!((quantize_step(0.37) - 0.3).abs() < 1e-6);
        assert_eq!(quantize_step(0.0), 0.0);
    }
}
