//! Path offsetter.
//!
//! Converts filled shapes into strokeable passes by generating inset (or
//! outset) rings with `cavalier_contours`. Coordinates are scaled by a
//! fixed large integer factor and rounded before clipping so the offset
//! runs on integer-grid positions, then rescaled on the way out.

use brushkit_core::{GeometryError, Point, Polyline};
use cavalier_contours::polyline::{
    PlineSource, PlineSourceMut, PlineVertex, Polyline as Pline,
};
use tracing::{debug, warn};

/// Fixed integer scaling factor applied before the clipping step.
const CLIPPER_SCALE: f64 = 1000.0;

/// Upper bound on concentric fill passes for a single shape.
const MAX_FILL_PASSES: usize = 1024;

/// Offset a closed polyline by `amount`. Positive amounts walk inward
/// (inset), negative amounts outward, regardless of the source winding.
///
/// `resolution` bounds the error of the arc approximation used for the
/// round joins on the way back to straight segments.
///
/// Returns one polyline per closed sub-path of the offset result. An empty
/// offset result is an error; the caller must discard the original
/// polyline rather than emit empty geometry.
pub fn offset_polyline(
    polyline: &Polyline,
    amount: f64,
    resolution: f64,
) -> Result<Vec<Polyline>, GeometryError> {
    let scaled = simplify_scaled(&polyline.points, polyline.closed);

    if scaled.len() < 2 {
        return Err(GeometryError::DegeneratePath {
            name: polyline.name.clone(),
            point_count: scaled.len(),
        });
    }

    if amount == 0.0 {
        let mut out = polyline.clone();
        out.points = scaled
            .iter()
            .map(|p| Point::new(p.x / CLIPPER_SCALE, p.y / CLIPPER_SCALE))
            .collect();
        return Ok(vec![out]);
    }

    let mut pline = Pline::new();
    for p in &scaled {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);

    let delta = amount * CLIPPER_SCALE;
    let input_area = pline.area().abs();
    let inward = amount > 0.0;

    let mut results = pline.parallel_offset(delta);
    if results.is_empty() {
        if !inward {
            // An outset can never legitimately collapse; the sign convention
            // must have mapped our delta inward.
            results = pline.parallel_offset(-delta);
        }
    } else {
        let max_area = results
            .iter()
            .map(|p| p.area().abs())
            .fold(0.0f64, f64::max);
        if (max_area > input_area) == inward {
            results = pline.parallel_offset(-delta);
        }
    }

    let error = (resolution * CLIPPER_SCALE).max(1.0);
    let mut out = Vec::new();
    for result in results {
        let approx = result
            .arcs_to_approx_lines(error)
            .unwrap_or_else(|| result.clone());
        if approx.vertex_count() < 3 {
            continue;
        }
        let mut points = Vec::with_capacity(approx.vertex_count());
        for v in &approx.vertex_data {
            points.push(Point::new(v.x / CLIPPER_SCALE, v.y / CLIPPER_SCALE));
        }
        out.push(Polyline {
            points,
            tool: polyline.tool.clone(),
            kind: polyline.kind,
            name: polyline.name.clone(),
            closed: true,
        });
    }

    if out.is_empty() {
        Err(GeometryError::OffsetCollapsed {
            name: polyline.name.clone(),
            amount,
        })
    } else {
        Ok(out)
    }
}

/// Generate the concentric inset passes that paint a filled shape: the
/// outline itself, then rings every `spacing` inward until the offset
/// collapses.
pub fn concentric_insets(polyline: &Polyline, spacing: f64, resolution: f64) -> Vec<Polyline> {
    let mut out = vec![polyline.clone()];
    let mut frontier = vec![polyline.clone()];

    while !frontier.is_empty() && out.len() < MAX_FILL_PASSES {
        let mut next = Vec::new();
        for ring in &frontier {
            match offset_polyline(ring, spacing, resolution) {
                Ok(rings) => next.extend(rings),
                Err(GeometryError::OffsetCollapsed { .. }) => {
                    // Normal termination: the shape ran out of interior.
                    debug!(name = %ring.name, "fill pass collapsed, shape filled");
                }
                Err(err) => {
                    warn!(name = %ring.name, %err, "dropping unoffsetable fill ring");
                }
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }

    if out.len() >= MAX_FILL_PASSES {
        warn!(
            name = %polyline.name,
            "fill pass limit reached, shape may be under-filled"
        );
    }

    out
}

/// Scale points onto the integer clipping grid and drop duplicate and
/// collinear points.
fn simplify_scaled(points: &[Point], closed: bool) -> Vec<Point> {
    let mut scaled: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        let q = Point::new(
            (p.x * CLIPPER_SCALE).round(),
            (p.y * CLIPPER_SCALE).round(),
        );
        if scaled.last() != Some(&q) {
            scaled.push(q);
        }
    }

    // Closed rings sometimes repeat their first point at the end.
    if closed && scaled.len() > 1 && scaled.first() == scaled.last() {
        scaled.pop();
    }

    // Remove collinear interior points; half a grid unit of cross product
    // is below the rounding noise floor.
    let mut simplified: Vec<Point> = Vec::with_capacity(scaled.len());
    for p in scaled {
        while simplified.len() >= 2 {
            let a = simplified[simplified.len() - 2];
            let b = simplified[simplified.len() - 1];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross.abs() < 0.5 {
                simplified.pop();
            } else {
                break;
            }
        }
        simplified.push(p);
    }

    simplified
}
