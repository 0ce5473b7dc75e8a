//! Path normalizer.
//!
//! Flattens any nested grouping in a drawing down to a flat list of
//! stroke/fill polylines, classifying each leaf path by how its coloring
//! attributes combine:
//!
//! 1. Has fill, has stroke - stroked filled shape, yields both passes
//! 2. No fill, has stroke - standard line or closed empty shape
//! 3. Has fill, no stroke - strokeless filled shape
//! 4. No fill, no stroke - invisible path, discarded

use brushkit_core::{Color, GeometryError, PathKind, PlanError, Point, Polyline};
use lyon::algorithms::path::iterator::PathIterator;
use tracing::debug;

use crate::drawing::{Drawing, DrawingItem, DrawingPath};

/// A flattened polyline still carrying the paint it came from, ready for
/// color snapping.
#[derive(Debug, Clone)]
pub struct NormalizedPath {
    /// The flattened geometry and metadata.
    pub polyline: Polyline,
    /// The paint color of the pass (stroke color for stroke passes, fill
    /// color for fill passes).
    pub color: Color,
    /// The source element's opacity.
    pub opacity: f64,
}

/// Flatten a drawing into classified polylines at the given curve
/// resolution.
///
/// Fails fast with [`PlanError::MalformedDrawing`] when the geometry
/// contains non-finite coordinates; no partial output is returned.
pub fn flatten_drawing(drawing: &Drawing, resolution: f64) -> Result<Vec<NormalizedPath>, PlanError> {
    let mut out = Vec::new();
    for item in &drawing.items {
        flatten_item(item, resolution, &mut out)?;
    }
    Ok(out)
}

fn flatten_item(
    item: &DrawingItem,
    resolution: f64,
    out: &mut Vec<NormalizedPath>,
) -> Result<(), PlanError> {
    match item {
        DrawingItem::Group(children) => {
            for child in children {
                flatten_item(child, resolution, out)?;
            }
            Ok(())
        }
        DrawingItem::Path(path) => flatten_path(path, resolution, out),
    }
}

fn flatten_path(
    path: &DrawingPath,
    resolution: f64,
    out: &mut Vec<NormalizedPath>,
) -> Result<(), PlanError> {
    let stroke_width = if path.stroke_width.is_nan() {
        // SVG files sometimes save NaN stroke widths; treat as unstroked.
        0.0
    } else {
        path.stroke_width
    };
    let has_stroke = stroke_width != 0.0 && path.stroke.map(|c| c.is_visible()).unwrap_or(false);
    let has_fill = path.fill.map(|c| c.is_visible()).unwrap_or(false);

    if !has_stroke && !has_fill {
        debug!(name = %path.name, "discarding invisible path");
        return Ok(());
    }

    let subpaths = flatten_geometry(path, resolution)?;

    if has_stroke {
        let color = path.stroke.unwrap_or(Color::rgb(0, 0, 0));
        for polyline in &subpaths {
            let mut p = polyline.clone();
            p.kind = PathKind::Stroke;
            out.push(NormalizedPath {
                polyline: p,
                color,
                opacity: path.opacity,
            });
        }
    }

    if has_fill {
        let color = path.fill.unwrap_or(Color::rgb(0, 0, 0));
        for polyline in &subpaths {
            let mut p = polyline.clone();
            p.kind = PathKind::Fill;
            out.push(NormalizedPath {
                polyline: p,
                color,
                opacity: path.opacity,
            });
        }
    }

    Ok(())
}

/// Flatten one path's geometry into polylines, one per subpath.
fn flatten_geometry(path: &DrawingPath, resolution: f64) -> Result<Vec<Polyline>, PlanError> {
    let mut subpaths = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for event in path.geometry.iter().flattened(resolution as f32) {
        match event {
            lyon::path::Event::Begin { at } => {
                current = vec![Point::new(at.x as f64, at.y as f64)];
            }
            lyon::path::Event::Line { to, .. } => {
                current.push(Point::new(to.x as f64, to.y as f64));
            }
            lyon::path::Event::End { close, .. } => {
                if !current.is_empty() {
                    subpaths.push(finish_subpath(std::mem::take(&mut current), close, path)?);
                }
            }
            _ => {}
        }
    }

    Ok(subpaths)
}

fn finish_subpath(
    points: Vec<Point>,
    close: bool,
    path: &DrawingPath,
) -> Result<Polyline, PlanError> {
    // A single-point subpath cannot be a ring; clear the closed flag so
    // downstream offsetting never sees a single-point polygon.
    let closed = close && points.len() > 1;
    let polyline = Polyline {
        points,
        tool: None,
        kind: PathKind::Stroke,
        name: path.name.clone(),
        closed,
    };
    if !polyline.is_finite() {
        return Err(PlanError::Geometry(GeometryError::NonFiniteCoordinate {
            name: path.name.clone(),
        }));
    }
    Ok(polyline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::DrawingPath;

    fn square_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_groups_are_flattened() {
        let geometry = DrawingPath::polyline_geometry(&square_points(), false);
        let leaf = DrawingItem::Path(DrawingPath::stroked(geometry, Color::rgb(10, 20, 30)));
        let mut drawing = Drawing::new();
        drawing.push_group(vec![DrawingItem::Group(vec![leaf.clone()]), leaf]);

        let paths = flatten_drawing(&drawing, 0.25).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].polyline.kind, PathKind::Stroke);
    }

    #[test]
    fn test_stroked_filled_shape_yields_both_passes() {
        let geometry = DrawingPath::polyline_geometry(&square_points(), true);
        let mut path = DrawingPath::filled(geometry, Color::rgb(200, 0, 0));
        path.stroke = Some(Color::rgb(0, 0, 0));
        path.stroke_width = 1.0;

        let mut drawing = Drawing::new();
        drawing.push_path(path);

        let paths = flatten_drawing(&drawing, 0.25).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].polyline.kind, PathKind::Stroke);
        assert_eq!(paths[1].polyline.kind, PathKind::Fill);
        assert!(paths[1].polyline.closed);
    }

    #[test]
    fn test_invisible_path_is_discarded() {
        let geometry = DrawingPath::polyline_geometry(&square_points(), false);
        let mut path = DrawingPath::stroked(geometry, Color::rgba(0, 0, 0, 0.0));
        path.stroke_width = 0.0;

        let mut drawing = Drawing::new();
        drawing.push_path(path);

        assert!(flatten_drawing(&drawing, 0.25).unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_geometry_fails_fast() {
        let geometry = DrawingPath::polyline_geometry(&square_points(), false);
        let path = DrawingPath::stroked(geometry, Color::rgb(0, 0, 0)).named("bad");

        let err = finish_subpath(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)], false, &path)
            .unwrap_err();
        assert!(matches!(err, PlanError::Geometry(_)));
    }

    #[test]
    fn test_single_point_subpath_is_never_closed() {
        let geometry = DrawingPath::polyline_geometry(&square_points(), false);
        let path = DrawingPath::stroked(geometry, Color::rgb(0, 0, 0));

        let polyline = finish_subpath(vec![Point::new(1.0, 1.0)], true, &path).unwrap();
        assert!(!polyline.closed);
    }
}
