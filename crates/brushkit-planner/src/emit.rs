//! Toolpath emitter.
//!
//! Serializes the final ordered polyline set into a command stream:
//! wash/tool-change actions interleaved with move/pen commands per
//! polyline, status text for progress display, and an unconditional
//! closing sequence.

use brushkit_core::{Command, PathKind, Point, Polyline};

/// Marker reported when painting starts.
pub const MARKER_PAINT_BEGIN: &str = "paint-begin";
/// Marker reported when the closing sequence has drained.
pub const MARKER_PAINT_COMPLETE: &str = "paint-complete";

/// Serialize ordered polylines into a command sequence.
///
/// For each polyline: a wash-and-load when its tool differs from the
/// current one, a status line, then pen-up, a move to the first point, a
/// single pen-down, the remaining moves, and a final pen-up. Stroke
/// polylines get overshoot compensation; fills are drawn as-is.
///
/// The closing sequence (wash, park, completion status and marker) is
/// emitted even for an empty input.
pub fn emit_commands(polylines: &[Polyline], overshoot: f64) -> Vec<Command> {
    let mut commands = Vec::new();
    commands.push(Command::Custom(MARKER_PAINT_BEGIN.to_string()));

    let mut current_tool = None;

    for polyline in polylines {
        if polyline.points.is_empty() {
            continue;
        }

        if polyline.tool.is_some() && polyline.tool != current_tool {
            current_tool = polyline.tool.clone();
            commands.push(Command::Wash(polyline.tool.clone()));
        }

        commands.push(Command::Status(status_text(polyline)));
        emit_polyline(polyline, overshoot, &mut commands);
    }

    commands.push(Command::Wash(None));
    commands.push(Command::Park);
    commands.push(Command::Status("Painting complete".to_string()));
    commands.push(Command::Custom(MARKER_PAINT_COMPLETE.to_string()));

    commands
}

fn status_text(polyline: &Polyline) -> String {
    if polyline.name.is_empty() {
        format!("Drawing {}", polyline.kind)
    } else {
        format!("Drawing {}: {}", polyline.kind, polyline.name)
    }
}

fn emit_polyline(polyline: &Polyline, overshoot: f64, commands: &mut Vec<Command>) {
    let points = if polyline.kind == PathKind::Stroke && overshoot > 0.0 {
        apply_overshoot(&polyline.points, overshoot)
    } else {
        polyline.points.clone()
    };

    commands.push(Command::PenUp);
    let mut iter = points.into_iter();
    if let Some(first) = iter.next() {
        commands.push(Command::Move(first));
        commands.push(Command::PenDown);
        for point in iter {
            commands.push(Command::Move(point));
        }
    }

    // Closed rings return to their start before lifting.
    if polyline.closed {
        if let Some(first) = polyline.points.first() {
            commands.push(Command::Move(*first));
        }
    }
    commands.push(Command::PenUp);
}

/// Extend each point along its incoming segment's tangent to compensate
/// for physical brush/pen bend. The first point stays put; every later
/// point shifts by `overshoot` in the direction of the segment leading
/// into it.
fn apply_overshoot(points: &[Point], overshoot: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        if i == 0 {
            out.push(*point);
            continue;
        }
        let prev = points[i - 1];
        let dx = point.x - prev.x;
        let dy = point.y - prev.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            out.push(Point::new(
                point.x + dx / len * overshoot,
                point.y + dy / len * overshoot,
            ));
        } else {
            out.push(*point);
        }
    }
    out
}
