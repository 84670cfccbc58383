//! Raster export of the map
//!
//! Fills each cell polygon with its palette color and draws coastlines on
//! top as one-pixel lines.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};

use super::colors::Palette;
use super::{cell_value, ExportError};
use crate::coastline::{BoundaryKind, Point, Polyline};
use crate::diagram::Diagram;
use crate::features::Cell;
use crate::params::MapParams;

/// Crossing-number test for a closed polygon
fn contains(polygon: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn fill_polygon(img: &mut RgbImage, polygon: &[Point], color: Rgb<u8>) {
    if polygon.len() < 3 {
        return;
    }
    let (w, h) = img.dimensions();

    let min_x = polygon.iter().map(|p| p.x).fold(f64::MAX, f64::min).floor().max(0.0) as u32;
    let min_y = polygon.iter().map(|p| p.y).fold(f64::MAX, f64::min).floor().max(0.0) as u32;
    let max_x = polygon.iter().map(|p| p.x).fold(f64::MIN, f64::max).ceil().max(0.0) as u32;
    let max_y = polygon.iter().map(|p| p.y).fold(f64::MIN, f64::max).ceil().max(0.0) as u32;

    for y in min_y..max_y.min(h) {
        for x in min_x..max_x.min(w) {
            if contains(polygon, x as f64 + 0.5, y as f64 + 0.5) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_line(img: &mut RgbImage, a: Point, b: Point, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let steps = a.distance(&b).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = (a.x + (b.x - a.x) * t).floor();
        let y = (a.y + (b.y - a.y) * t).floor();
        if x >= 0.0 && y >= 0.0 && (x as u32) < w && (y as u32) < h {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Rasterize cells and coastlines at map size.
pub fn rasterize(
    diagram: &Diagram,
    cells: &[Cell],
    coastlines: &[Polyline],
    params: &MapParams,
) -> RgbImage {
    let mut img: RgbImage =
        ImageBuffer::from_pixel(params.width, params.height, Rgb([255, 255, 255]));
    let palette = Palette::new(params.render.polygon.color, params.sea_level);

    for (i, cell) in cells.iter().enumerate().take(diagram.sites.len()) {
        let color = palette.color(cell_value(cell, params), cell.feature_type);
        fill_polygon(&mut img, &diagram.cell_polygon(i), Rgb(color));
    }

    if params.render.draw_coastline {
        for line in coastlines {
            let color = match line.kind {
                BoundaryKind::Land => Rgb([0, 0, 0]),
                BoundaryKind::Lake => Rgb([128, 128, 128]),
            };
            for pair in line.points.windows(2) {
                draw_line(&mut img, pair[0], pair[1], color);
            }
        }
    }

    img
}

/// Rasterize and save to `path` as PNG, whatever its extension.
pub fn export_png(
    path: &Path,
    diagram: &Diagram,
    cells: &[Cell],
    coastlines: &[Polyline],
    params: &MapParams,
) -> Result<(), ExportError> {
    let img = rasterize(diagram, cells, coastlines, params);
    img.save_with_format(path, ImageFormat::Png).map_err(ExportError::Image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Edge;
    use crate::features::FeatureType;
    use crate::params::ColorMode;

    #[test]
    fn test_contains() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(contains(&square, 2.0, 2.0));
        assert!(!contains(&square, 5.0, 2.0));
    }

    #[test]
    fn test_rasterize_fills_cell_and_draws_coast() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(8.0, 8.0),
            Point::new(0.0, 8.0),
        ];
        let edges = (0..4)
            .map(|i| Edge::new(corners[i], corners[(i + 1) % 4], Some(0), None))
            .collect();
        let diagram =
            Diagram::new(vec![Point::new(4.0, 4.0)], edges, vec![vec![0, 1, 2, 3]], Vec::new());
        let cells = vec![Cell {
            elevation: 0.5,
            feature_type: FeatureType::Lake,
            feature_index: 0,
        }];
        let coast = vec![Polyline {
            kind: BoundaryKind::Land,
            feature_number: 0,
            points: vec![Point::new(1.0, 1.5), Point::new(6.0, 1.5)],
            closed: false,
        }];

        let mut params = MapParams { width: 10, height: 10, ..Default::default() };
        params.render.polygon.color = ColorMode::FeatureType;
        let img = rasterize(&diagram, &cells, &coast, &params);

        assert_eq!(img.dimensions(), (10, 10));
        assert_eq!(*img.get_pixel(4, 5), Rgb([0xD8, 0xF2, 0xFE]));
        assert_eq!(*img.get_pixel(9, 9), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(3, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_export_writes_png_regardless_of_extension() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let edges = (0..4)
            .map(|i| Edge::new(corners[i], corners[(i + 1) % 4], Some(0), None))
            .collect();
        let diagram =
            Diagram::new(vec![Point::new(2.0, 2.0)], edges, vec![vec![0, 1, 2, 3]], Vec::new());
        let cells = vec![Cell {
            elevation: 0.5,
            feature_type: FeatureType::Land,
            feature_index: 0,
        }];
        let params = MapParams { width: 4, height: 4, ..Default::default() };

        let path = std::env::temp_dir().join(format!("coastmap_export_{}.jpg", std::process::id()));
        export_png(&path, &diagram, &cells, &[], &params).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
