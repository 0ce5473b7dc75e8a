//! Input drawing model.
//!
//! A [`Drawing`] is a tree of groups and styled vector paths, the shape the
//! external editor hands over. Path geometry is a [`lyon::path::Path`] so
//! curved segments survive until the normalizer flattens them at the
//! requested resolution.

use brushkit_core::{Color, Point};
use lyon::math::point;
use lyon::path::Path;

/// A styled vector path inside a drawing.
#[derive(Debug, Clone)]
pub struct DrawingPath {
    /// The path geometry, possibly with curved segments and multiple
    /// subpaths.
    pub geometry: Path,
    /// Label for progress reporting, may be empty.
    pub name: String,
    /// Stroke paint, if the path is stroked.
    pub stroke: Option<Color>,
    /// Stroke width; a zero width disables the stroke pass even when a
    /// stroke color is present.
    pub stroke_width: f64,
    /// Fill paint, if the path is filled.
    pub fill: Option<Color>,
    /// Element opacity, `0.0..=1.0`, multiplied over both paints.
    pub opacity: f64,
}

impl DrawingPath {
    /// Create a stroked path with default width and full opacity.
    pub fn stroked(geometry: Path, color: Color) -> Self {
        Self {
            geometry,
            name: String::new(),
            stroke: Some(color),
            stroke_width: 1.0,
            fill: None,
            opacity: 1.0,
        }
    }

    /// Create a filled path with no stroke and full opacity.
    pub fn filled(geometry: Path, color: Color) -> Self {
        Self {
            geometry,
            name: String::new(),
            stroke: None,
            stroke_width: 0.0,
            fill: Some(color),
            opacity: 1.0,
        }
    }

    /// Set the path label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the element opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Build straight-segment geometry from a point list.
    pub fn polyline_geometry(points: &[Point], closed: bool) -> Path {
        let mut builder = Path::builder();
        if let Some(first) = points.first() {
            builder.begin(point(first.x as f32, first.y as f32));
            for p in &points[1..] {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            if closed {
                builder.close();
            } else {
                builder.end(false);
            }
        }
        builder.build()
    }
}

/// A node of the drawing tree.
#[derive(Debug, Clone)]
pub enum DrawingItem {
    /// A nested group of items; groups carry no style of their own.
    Group(Vec<DrawingItem>),
    /// A leaf path.
    Path(DrawingPath),
}

/// A complete vector drawing: the planner's input.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// Top-level items, in paint order.
    pub items: Vec<DrawingItem>,
}

impl Drawing {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level path.
    pub fn push_path(&mut self, path: DrawingPath) {
        self.items.push(DrawingItem::Path(path));
    }

    /// Append a top-level group.
    pub fn push_group(&mut self, items: Vec<DrawingItem>) {
        self.items.push(DrawingItem::Group(items));
    }
}
