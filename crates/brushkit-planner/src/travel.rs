//! Travel optimizer.
//!
//! Reorders same-tool polylines to minimize pen-up travel with a
//! nearest-neighbor heuristic, reversing paths so traversal starts at the
//! near end and joining paths whose endpoints touch exactly so no spurious
//! pen lift happens between them.

use brushkit_core::{Point, Polyline, ToolId};
use tracing::warn;

/// Which end of a candidate polyline was closest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    First,
    Last,
}

/// Reorder polylines for minimal pen-up travel, grouped by tool in
/// `tool_order` sequence.
///
/// Polylines carrying a tool that is not in `tool_order` (or no tool at
/// all) are assigned the first tool of the order rather than dropped. With
/// an empty `tool_order` the input is treated as a single group and tools
/// are left untouched.
///
/// Selection is deterministic: when two candidates are equidistant the
/// earlier candidate wins, so identical input always produces identical
/// output.
pub fn optimize_travel(polylines: Vec<Polyline>, tool_order: &[ToolId]) -> Vec<Polyline> {
    if polylines.len() <= 1 {
        return polylines;
    }

    let mut groups: Vec<Vec<Polyline>> = if tool_order.is_empty() {
        vec![Vec::new()]
    } else {
        (0..tool_order.len()).map(|_| Vec::new()).collect()
    };

    for mut polyline in polylines {
        if polyline.points.is_empty() {
            warn!(name = %polyline.name, "dropping empty polyline");
            continue;
        }
        let index = if tool_order.is_empty() {
            0
        } else {
            match polyline
                .tool
                .as_ref()
                .and_then(|t| tool_order.iter().position(|o| o == t))
            {
                Some(i) => i,
                None => {
                    // Unrecognized tools paint with the fallback tool rather
                    // than vanish from the output.
                    warn!(
                        name = %polyline.name,
                        tool = ?polyline.tool,
                        fallback = %tool_order[0],
                        "unrecognized tool, assigning fallback"
                    );
                    polyline.tool = Some(tool_order[0].clone());
                    0
                }
            }
        };
        groups[index].push(polyline);
    }

    let mut out = Vec::new();
    for group in groups {
        sort_group(group, &mut out);
    }
    out
}

/// Nearest-neighbor ordering of one tool group, appended to `out`.
fn sort_group(mut group: Vec<Polyline>, out: &mut Vec<Polyline>) {
    let mut last_point = Point::ORIGIN;
    let mut last_emitted: Option<usize> = None;

    while !group.is_empty() {
        let (index, endpoint, dist) = closest_candidate(&group, &last_point);
        let mut chosen = group.swap_remove(index);

        if endpoint == Endpoint::Last {
            chosen.reverse();
        }
        last_point = chosen.last_point().unwrap_or(last_point);

        match last_emitted {
            Some(target) if dist == 0.0 => {
                out[target].join(&chosen);
            }
            _ => {
                out.push(chosen);
                last_emitted = Some(out.len() - 1);
            }
        }
    }
}

/// Find the polyline/endpoint pair closest to `from` across the group.
/// Strict `<` comparison keeps the earliest candidate on ties.
fn closest_candidate(group: &[Polyline], from: &Point) -> (usize, Endpoint, f64) {
    let mut best = (0, Endpoint::First, f64::MAX);
    for (i, polyline) in group.iter().enumerate() {
        if let Some(first) = polyline.first_point() {
            let d = from.distance_to(&first);
            if d < best.2 {
                best = (i, Endpoint::First, d);
            }
        }
        if let Some(last) = polyline.last_point() {
            let d = from.distance_to(&last);
            if d < best.2 {
                best = (i, Endpoint::Last, d);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use brushkit_core::PathKind;
    use std::collections::BTreeSet;

    fn stroke(tool: &str, points: Vec<Point>) -> Polyline {
        Polyline {
            points,
            tool: Some(ToolId::new(tool)),
            kind: PathKind::Stroke,
            name: String::new(),
            closed: false,
        }
    }

    fn order() -> Vec<ToolId> {
        vec![ToolId::new("color0"), ToolId::new("color1")]
    }

    #[test]
    fn test_orders_by_distance_from_origin() {
        let far = stroke("color0", vec![Point::new(50.0, 50.0), Point::new(60.0, 50.0)]);
        let near = stroke("color0", vec![Point::new(1.0, 1.0), Point::new(10.0, 1.0)]);
        let result = optimize_travel(vec![far.clone(), near.clone()], &order());
        assert_eq!(result[0].points, near.points);
        assert_eq!(result[1].points, far.points);
    }

    #[test]
    fn test_reverses_when_far_end_is_closer() {
        let backwards = stroke("color0", vec![Point::new(30.0, 0.0), Point::new(1.0, 0.0)]);
        let result = optimize_travel(vec![backwards], &order());
        assert_eq!(result[0].first_point(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_touching_paths_are_joined() {
        let a = stroke("color0", vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        let b = stroke("color0", vec![Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
        let result = optimize_travel(vec![a, b], &order());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].points.len(), 3);
        assert_eq!(result[0].last_point(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_tool_groups_follow_tool_order() {
        let late = stroke("color1", vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)]);
        let early = stroke("color0", vec![Point::new(90.0, 90.0), Point::new(91.0, 90.0)]);
        let result = optimize_travel(vec![late.clone(), early.clone()], &order());
        assert_eq!(result[0].tool, early.tool);
        assert_eq!(result[1].tool, late.tool);
    }

    #[test]
    fn test_unknown_tool_gets_fallback() {
        let stray = stroke("color9", vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        let result = optimize_travel(vec![stray, stroke("color0", vec![Point::new(5.0, 0.0), Point::new(6.0, 0.0)])], &order());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.tool == Some(ToolId::new("color0"))));
    }

    #[test]
    fn test_points_are_preserved() {
        let input = vec![
            stroke("color0", vec![Point::new(3.0, 4.0), Point::new(5.0, 6.0)]),
            stroke("color1", vec![Point::new(7.0, 8.0), Point::new(9.0, 10.0)]),
            stroke("color0", vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]),
        ];
        let before: BTreeSet<String> = input
            .iter()
            .flat_map(|p| p.points.iter().map(|q| format!("{:?}", q)))
            .collect();
        let result = optimize_travel(input, &order());
        let after: BTreeSet<String> = result
            .iter()
            .flat_map(|p| p.points.iter().map(|q| format!("{:?}", q)))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_deterministic_on_equidistant_candidates() {
        let a = stroke("color0", vec![Point::new(5.0, 0.0), Point::new(20.0, 0.0)]);
        let b = stroke("color0", vec![Point::new(0.0, 5.0), Point::new(0.0, 20.0)]);
        let first = optimize_travel(vec![a.clone(), b.clone()], &order());
        for _ in 0..5 {
            assert_eq!(optimize_travel(vec![a.clone(), b.clone()], &order()), first);
        }
    }
}
