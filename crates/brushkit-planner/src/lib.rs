//! # Brushkit Planner
//!
//! Turns an arbitrary vector drawing into an ordered sequence of
//! single-color, single-tool polylines and serializes them into a device
//! command stream ready for the scheduler.
//!
//! Pipeline, leaves first:
//! 1. Path normalizer - flattens nested groups into classified polylines
//! 2. Color snapper - maps paint colors to physical tools
//! 3. Path offsetter - converts fills into concentric strokeable rings
//! 4. Travel optimizer - reorders same-tool polylines for minimal travel
//! 5. Toolpath emitter - serializes polylines into commands, with
//!    overshoot compensation for strokes
//!
//! The whole pipeline is pure and synchronous: identical inputs always
//! produce byte-identical command sequences.

pub mod drawing;
pub mod emit;
pub mod normalize;
pub mod offset;
pub mod snap;
pub mod travel;

use brushkit_core::{Command, PathKind, PlanError, Polyline, ToolSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use drawing::{Drawing, DrawingItem, DrawingPath};
pub use emit::{emit_commands, MARKER_PAINT_BEGIN, MARKER_PAINT_COMPLETE};
pub use normalize::{flatten_drawing, NormalizedPath};
pub use offset::{concentric_insets, offset_polyline};
pub use snap::{snap, SnapResult};
pub use travel::optimize_travel;

/// Configuration recognized by [`plan`].
///
/// Defaults suit a letter-size watercolor job in millimeter units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Spacing between concentric fill passes; 0 strokes each fill outline
    /// once instead of filling it.
    pub offset_amount: f64,
    /// Maximum deviation when approximating curved segments as straight
    /// segments.
    pub flatten_resolution: f64,
    /// Whether to run the travel optimizer.
    pub travel_optimize: bool,
    /// Distance by which stroke endpoints are extended along their local
    /// tangent to compensate for brush bend.
    pub overshoot_distance: f64,
    /// Skip paths that snap to the designated white tool.
    pub skip_white: bool,
    /// Cumulative drawn distance after which the scheduler splices in a
    /// paint refill. Carried here so one options struct configures a whole
    /// job; the planner itself does not consume it.
    pub refill_threshold_distance: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            offset_amount: 10.0,
            flatten_resolution: 0.25,
            travel_optimize: true,
            overshoot_distance: 5.0,
            skip_white: true,
            refill_threshold_distance: 10805.0,
        }
    }
}

impl PlanOptions {
    fn validate(&self) -> Result<(), PlanError> {
        let positive = [
            ("flatten_resolution", self.flatten_resolution),
            ("refill_threshold_distance", self.refill_threshold_distance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidOption {
                    name: name.to_string(),
                    reason: format!("must be a positive finite number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("offset_amount", self.offset_amount),
            ("overshoot_distance", self.overshoot_distance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidOption {
                    name: name.to_string(),
                    reason: format!("must be a non-negative finite number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Plan a drawing into an ordered command sequence.
///
/// Pure and synchronous. Fails fast on malformed geometry or unusable
/// options; a partial plan is never returned. Paths whose color snaps to
/// skip are removed before emission, and degenerate paths are logged and
/// dropped without aborting the plan.
pub fn plan(
    drawing: &Drawing,
    tools: &ToolSet,
    options: &PlanOptions,
) -> Result<Vec<Command>, PlanError> {
    options.validate()?;

    let normalized = flatten_drawing(drawing, options.flatten_resolution)?;
    debug!(paths = normalized.len(), "drawing flattened");

    // Snap colors to tools; skips drop out here.
    let mut assigned: Vec<Polyline> = Vec::new();
    for entry in normalized {
        match snap(&entry.color, entry.opacity, tools, options.skip_white) {
            SnapResult::Tool(tool) => {
                let mut polyline = entry.polyline;
                polyline.tool = Some(tool);
                assigned.push(polyline);
            }
            SnapResult::Skip => {
                debug!(name = %entry.polyline.name, "skipping unpaintable path");
            }
        }
    }

    // Convert fills into strokeable passes.
    let mut passes: Vec<Polyline> = Vec::new();
    for mut polyline in assigned {
        if polyline.points.len() < 2 {
            warn!(name = %polyline.name, "dropping degenerate path");
            continue;
        }
        if polyline.kind == PathKind::Fill {
            // A fill outline is a ring even when the source forgot to
            // close it.
            if !polyline.closed && polyline.points.len() > 2 {
                polyline.closed = true;
            }
            if options.offset_amount > 0.0 {
                passes.extend(concentric_insets(
                    &polyline,
                    options.offset_amount,
                    options.flatten_resolution,
                ));
                continue;
            }
        }
        passes.push(polyline);
    }

    let ordered = if options.travel_optimize {
        optimize_travel(passes, &tools.sorted_tools())
    } else {
        passes
    };

    Ok(emit_commands(&ordered, options.overshoot_distance))
}
