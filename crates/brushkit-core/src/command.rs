//! The device command model.
//!
//! Commands are immutable once created; the toolpath emitter produces them
//! and ownership transfers to the scheduler, which dispatches them to the
//! device collaborator one at a time.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::tools::ToolId;

/// One action the plotting device can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Move the pen to a point (up or down, whatever it currently is).
    Move(Point),
    /// Lift the pen.
    PenUp,
    /// Lower the pen.
    PenDown,
    /// Select a tool without washing.
    ToolChange(ToolId),
    /// Wash the current tool and, when a tool is given, load it.
    Wash(Option<ToolId>),
    /// Park the carriage at its home position.
    Park,
    /// Report human-readable progress text. Fire-and-forget.
    Status(String),
    /// A named marker reported to the scheduler's observer when reached.
    Custom(String),
    /// Reload paint, detouring via the given safe return point.
    GetPaint(Point),
}

impl Command {
    /// True for commands that complete immediately on dispatch and never
    /// occupy the single in-flight slot.
    pub fn is_fire_and_forget(&self) -> bool {
        matches!(self, Command::Status(_) | Command::Custom(_))
    }

    /// The move target, for commands that have one.
    pub fn target(&self) -> Option<Point> {
        match self {
            Command::Move(p) | Command::GetPaint(p) => Some(*p),
            _ => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Move(p) => write!(f, "move ({:.2}, {:.2})", p.x, p.y),
            Command::PenUp => write!(f, "pen up"),
            Command::PenDown => write!(f, "pen down"),
            Command::ToolChange(t) => write!(f, "tool change to {t}"),
            Command::Wash(Some(t)) => write!(f, "wash and load {t}"),
            Command::Wash(None) => write!(f, "wash"),
            Command::Park => write!(f, "park"),
            Command::Status(s) => write!(f, "status: {s}"),
            Command::Custom(id) => write!(f, "marker: {id}"),
            Command::GetPaint(p) => write!(f, "get paint, return to ({:.2}, {:.2})", p.x, p.y),
        }
    }
}
