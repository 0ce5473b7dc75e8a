//! # Brushkit Core
//!
//! Core types, traits, and utilities for Brushkit.
//! Provides the fundamental abstractions shared by the planner and the
//! scheduler: 2D geometry, colors, tool sets, the command model, and the
//! unified error type.

pub mod color;
pub mod command;
pub mod error;
pub mod geometry;
pub mod tools;
pub mod types;

pub use color::Color;
pub use command::Command;
pub use error::{DeviceError, Error, GeometryError, PlanError, Result, SchedulerError};
pub use geometry::{PathKind, Point, Polyline};
pub use tools::{ToolId, ToolInfo, ToolSet};
pub use types::{PauseCallback, StatusCallback};
