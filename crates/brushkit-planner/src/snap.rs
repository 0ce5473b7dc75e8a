//! Color snapper.
//!
//! Maps a path's paint color (with opacity) to the nearest available
//! physical tool, or to a skip marker. Partially transparent paint goes to
//! the water/dip intermediate tool when the device has one; near-misses and
//! policy skips both degrade to [`SnapResult::Skip`], never to an error.
//!
//! Snapping is pure: identical `(color, opacity, tool set)` inputs always
//! produce the identical outcome.

use brushkit_core::{Color, ToolId, ToolSet};

/// Outcome of snapping a color to the active tool set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapResult {
    /// Use this physical tool.
    Tool(ToolId),
    /// Do not paint this path at all.
    Skip,
}

/// Snap a paint color to a tool identifier.
///
/// Transparency is checked first: an element opacity below 1, or a color
/// alpha strictly between 0 and 1, routes to the water/dip tool when the
/// set has one and to [`SnapResult::Skip`] otherwise. Opaque colors match
/// the nearest tool by RGB distance, subject to the set's snap tolerance
/// and the skip-white policy.
pub fn snap(color: &Color, opacity: f64, tools: &ToolSet, skip_white: bool) -> SnapResult {
    if opacity < 1.0 || (color.a > 0.0 && color.a < 1.0) {
        return match tools.water_tool() {
            Some(water) => SnapResult::Tool(water.clone()),
            None => SnapResult::Skip,
        };
    }

    // The matcher does not take opacity into account; normalize alpha to 1
    // before measuring distance.
    let color = color.opaque();

    let mut best: Option<(&ToolId, f64)> = None;
    for tool in tools.tools() {
        let dist = color.distance_sq(&tool.color);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((&tool.id, dist)),
        }
    }

    match best {
        Some((id, dist)) if dist <= tools.snap_tolerance_sq() => {
            if skip_white && tools.white_tool() == Some(id) {
                SnapResult::Skip
            } else {
                SnapResult::Tool(id.clone())
            }
        }
        // Nothing within tolerance, or an empty tool set.
        _ => SnapResult::Skip,
    }
}
