//! Color scales for cell fills

use crate::features::FeatureType;
use crate::params::ColorMode;

pub type Rgb = [u8; 3];

pub const OCEAN_DEEP: Rgb = [0x71, 0xAB, 0xD8];
pub const OCEAN_SHALLOW: Rgb = [0xD8, 0xF2, 0xFE];
pub const LAND_LOW: Rgb = [0x94, 0xBF, 0x8B];
pub const LAND_HILLS: Rgb = [0xEF, 0xEB, 0xC0];
pub const LAND_MOUNTAIN: Rgb = [0xAA, 0x87, 0x53];
pub const LAND_PEAK: Rgb = [0xFF, 0xFF, 0xFF];

/// Piecewise-linear scale over sorted stops, clamped at both ends
pub struct ColorScale {
    stops: Vec<(f32, Rgb)>,
}

impl ColorScale {
    pub fn new(stops: Vec<(f32, Rgb)>) -> Self {
        Self { stops }
    }

    /// Water from deep (elevation 0) to shallow (sea level)
    pub fn ocean(sea_level: f32) -> Self {
        Self::new(vec![(0.0, OCEAN_DEEP), (sea_level, OCEAN_SHALLOW)])
    }

    /// Land from lowland green to white peaks
    pub fn land(sea_level: f32) -> Self {
        Self::new(vec![
            (sea_level, LAND_LOW),
            (0.4, LAND_HILLS),
            (0.7, LAND_MOUNTAIN),
            (0.95, LAND_PEAK),
        ])
    }

    pub fn greyscale() -> Self {
        Self::new(vec![(0.0, [0, 0, 0]), (1.0, [255, 255, 255])])
    }

    pub fn sample(&self, value: f32) -> Rgb {
        let Some(&(first_at, first)) = self.stops.first() else {
            return [255, 255, 255];
        };
        if value <= first_at {
            return first;
        }

        for pair in self.stops.windows(2) {
            let (a_at, a) = pair[0];
            let (b_at, b) = pair[1];
            if value <= b_at {
                let span = b_at - a_at;
                let t = if span > 0.0 { (value - a_at) / span } else { 1.0 };
                return lerp(a, b, t);
            }
        }

        self.stops[self.stops.len() - 1].1
    }
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

pub fn feature_color(feature_type: FeatureType) -> Rgb {
    match feature_type {
        FeatureType::Ocean => OCEAN_DEEP,
        FeatureType::Land => LAND_LOW,
        FeatureType::Lake => OCEAN_SHALLOW,
    }
}

/// Fill color for one cell
pub struct Palette {
    mode: ColorMode,
    sea_level: f32,
    ocean: ColorScale,
    land: ColorScale,
    grey: ColorScale,
}

impl Palette {
    pub fn new(mode: ColorMode, sea_level: f32) -> Self {
        Self {
            mode,
            sea_level,
            ocean: ColorScale::ocean(sea_level),
            land: ColorScale::land(sea_level),
            grey: ColorScale::greyscale(),
        }
    }

    pub fn color(&self, value: f32, feature_type: FeatureType) -> Rgb {
        match self.mode {
            ColorMode::Greyscale => self.grey.sample(value),
            ColorMode::FeatureType => feature_color(feature_type),
            ColorMode::Colorized => {
                if value < self.sea_level {
                    self.ocean.sample(value)
                } else {
                    self.land.sample(value)
                }
            }
        }
    }
}

pub fn hex(color: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}
