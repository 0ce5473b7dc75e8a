//! Physical tool sets.
//!
//! A [`ToolSet`] maps tool identifiers to physical paint colors and carries
//! the device capabilities that planning depends on: an optional water/dip
//! intermediate tool and a designated white tool for the skip-white policy.
//! Tool sets are immutable for the duration of a planning run.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Identifier of a physical tool (a paint well, a pen slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolId(String);

impl ToolId {
    /// Create a tool identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One physical tool: its identifier, paint color, and sort weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// The tool identifier.
    pub id: ToolId,
    /// The physical paint color of the tool.
    pub color: Color,
    /// Luminosity-derived sort weight; higher paints earlier.
    pub weight: f64,
}

/// An immutable set of physical tools available for one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSet {
    tools: Vec<ToolInfo>,
    water_tool: Option<ToolId>,
    white_tool: Option<ToolId>,
    /// Maximum acceptable squared RGB distance for a color match. Anything
    /// farther degrades to a skip rather than an error.
    snap_tolerance_sq: f64,
}

impl ToolSet {
    /// Create a tool set from `(id, color)` pairs. Sort weights are derived
    /// from each color's luminosity.
    pub fn new(tools: impl IntoIterator<Item = (ToolId, Color)>) -> Self {
        let tools = tools
            .into_iter()
            .map(|(id, color)| ToolInfo {
                weight: color.luminosity(),
                id,
                color,
            })
            .collect();
        Self {
            tools,
            water_tool: None,
            white_tool: None,
            snap_tolerance_sq: f64::MAX,
        }
    }

    /// Declare the water/dip intermediate tool, enabling transparent-paint
    /// handling in the color snapper.
    pub fn with_water_tool(mut self, id: ToolId) -> Self {
        self.water_tool = Some(id);
        self
    }

    /// Declare the designated white tool targeted by the skip-white policy.
    pub fn with_white_tool(mut self, id: ToolId) -> Self {
        self.white_tool = Some(id);
        self
    }

    /// Limit color matching to the given maximum RGB distance.
    pub fn with_snap_tolerance(mut self, max_distance: f64) -> Self {
        self.snap_tolerance_sq = max_distance * max_distance;
        self
    }

    /// The tools in definition order.
    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    /// The water/dip intermediate tool, if the device has one.
    pub fn water_tool(&self) -> Option<&ToolId> {
        self.water_tool.as_ref()
    }

    /// The designated white tool, if any.
    pub fn white_tool(&self) -> Option<&ToolId> {
        self.white_tool.as_ref()
    }

    /// Maximum acceptable squared RGB distance for a color match.
    pub fn snap_tolerance_sq(&self) -> f64 {
        self.snap_tolerance_sq
    }

    /// True if the set contains the given tool (including the water tool).
    pub fn contains(&self, id: &ToolId) -> bool {
        self.tools.iter().any(|t| &t.id == id) || self.water_tool.as_ref() == Some(id)
    }

    /// The physical color of a tool, if known.
    pub fn color_of(&self, id: &ToolId) -> Option<Color> {
        self.tools.iter().find(|t| &t.id == id).map(|t| t.color)
    }

    /// Fallback tool assigned to paths with a missing or unrecognized tool
    /// identifier: the first tool of the set.
    pub fn fallback_tool(&self) -> Option<&ToolId> {
        self.tools.first().map(|t| &t.id)
    }

    /// Tool identifiers in painting order: lightest paint first (descending
    /// sort weight), stable for equal weights. The water tool, when present,
    /// is appended last so water passes run after all paint passes.
    pub fn sorted_tools(&self) -> Vec<ToolId> {
        let mut order: Vec<&ToolInfo> = self.tools.iter().collect();
        order.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
        let mut ids: Vec<ToolId> = order.into_iter().map(|t| t.id.clone()).collect();
        if let Some(water) = &self.water_tool {
            ids.push(water.clone());
        }
        ids
    }

    /// True if the set has no paint tools at all.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
