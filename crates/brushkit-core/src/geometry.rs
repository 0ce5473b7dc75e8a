//! 2D geometry primitives for toolpath planning.
//!
//! A [`Polyline`] is the planner's unit of work: one continuous pen stroke
//! or one ring of a filled shape, with the metadata the pipeline needs to
//! route it to a physical tool.

use serde::{Deserialize, Serialize};

use crate::tools::ToolId;

/// A 2D point in drawing coordinates (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Whether a polyline came from a stroked outline or a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathKind {
    /// A drawn outline; gets overshoot compensation on emission.
    Stroke,
    /// A ring of a filled shape; drawn as-is.
    Fill,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::Stroke => write!(f, "stroke"),
            PathKind::Fill => write!(f, "fill"),
        }
    }
}

/// An ordered sequence of 2D points representing one continuous pen stroke.
///
/// Created by the path normalizer from raw drawing geometry, rewritten by
/// the offsetter and the travel optimizer, and consumed by the emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// The points of the path, in traversal order.
    pub points: Vec<Point>,
    /// The physical tool this path is assigned to. `None` until the color
    /// snapper has run (or when the source carried no recognizable tool).
    pub tool: Option<ToolId>,
    /// Stroke or fill origin.
    pub kind: PathKind,
    /// Label of the source path, may be empty.
    pub name: String,
    /// Whether the path is a closed ring.
    pub closed: bool,
}

impl Polyline {
    /// Create a new open stroke polyline with no tool assigned.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            tool: None,
            kind: PathKind::Stroke,
            name: String::new(),
            closed: false,
        }
    }

    /// First point of the path, if any.
    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point of the path, if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Reverse the traversal direction in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Total traversal length of the path.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// True if every point has finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }

    /// Append another polyline's points, dropping the shared point when the
    /// join is seamless (distance zero between our last and its first).
    pub fn join(&mut self, other: &Polyline) {
        let skip = match (self.last_point(), other.first_point()) {
            (Some(a), Some(b)) if a == b => 1,
            _ => 0,
        };
        self.points.extend(other.points.iter().skip(skip));
    }
}
