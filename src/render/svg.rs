//! SVG map writer
//!
//! Produces a complete SVG document as a `String`: filled cell polygons,
//! optional Delaunay triangles, and coastline strokes. No I/O happens here.

use std::fmt::Write;

use super::colors::{hex, Palette};
use super::cell_value;
use crate::coastline::{BoundaryKind, Point, Polyline};
use crate::diagram::Diagram;
use crate::features::Cell;
use crate::params::MapParams;

/// Stroke color and width for a coastline kind
pub fn coastline_style(kind: BoundaryKind) -> (&'static str, f32) {
    match kind {
        BoundaryKind::Land => ("black", 1.0),
        BoundaryKind::Lake => ("grey", 0.9),
    }
}

/// Build a path `d` attribute; returns `None` below two points.
pub fn path_data(points: &[Point], close: bool) -> Option<String> {
    if points.len() < 2 {
        return None;
    }

    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{:.2},{:.2}", cmd, p.x, p.y);
    }
    if close {
        d.push('Z');
    }
    Some(d)
}

fn write_cells(out: &mut String, diagram: &Diagram, cells: &[Cell], params: &MapParams) {
    let palette = Palette::new(params.render.polygon.color, params.sea_level);

    for (i, cell) in cells.iter().enumerate().take(diagram.sites.len()) {
        let polygon = diagram.cell_polygon(i);
        let Some(d) = path_data(&polygon, true) else {
            continue;
        };
        let fill = hex(palette.color(cell_value(cell, params), cell.feature_type));
        let _ = writeln!(out, r#"    <path id="{}" d="{}" fill="{}"/>"#, i, d, fill);
    }
}

fn write_triangles(out: &mut String, diagram: &Diagram) {
    for triangle in &diagram.triangles {
        if let Some(d) = path_data(triangle, true) {
            let _ = writeln!(
                out,
                r#"    <path d="{}" stroke="black" fill="none" stroke-width="0.7"/>"#,
                d
            );
        }
    }
}

fn write_coastlines(out: &mut String, coastlines: &[Polyline]) {
    for line in coastlines {
        let Some(d) = path_data(&line.points, line.closed) else {
            continue;
        };
        let (stroke, width) = coastline_style(line.kind);
        let _ = writeln!(
            out,
            r#"    <path class="coast-{}" data-feature="{}" d="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round" fill="none"/>"#,
            line.kind.display_name().to_lowercase(),
            line.feature_number,
            d,
            stroke,
            width
        );
    }
}

/// Render the whole map.
pub fn render_svg(
    diagram: &Diagram,
    cells: &[Cell],
    coastlines: &[Polyline],
    params: &MapParams,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" shape-rendering="{}">"#,
        params.render.shape_rendering.svg_value(),
        w = params.width,
        h = params.height,
    );
    let _ = writeln!(out, r#"  <g fill="white">"#);

    write_cells(&mut out, diagram, cells, params);

    if params.render.draw_coastline {
        write_coastlines(&mut out, coastlines);
    }

    if params.render.draw_triangles {
        write_triangles(&mut out, diagram);
    }

    let _ = writeln!(out, "  </g>");
    let _ = writeln!(out, "</svg>");
    out
}
