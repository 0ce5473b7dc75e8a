//! Error handling for Brushkit
//!
//! Provides structured error types for all layers of the system:
//! - Geometry errors (degenerate or malformed path data)
//! - Plan errors (toolpath planning failures)
//! - Device errors (reported by the device collaborator)
//! - Scheduler errors (command streaming violations)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents errors arising from path geometry operations such as
/// flattening, simplification, and polygon offsetting.
#[derive(Error, Debug, Clone)]
pub enum GeometryError {
    /// Path has too few points to be usable
    #[error("Degenerate path '{name}': {point_count} point(s)")]
    DegeneratePath {
        /// Label of the offending path (may be empty).
        name: String,
        /// Number of points the path had after flattening.
        point_count: usize,
    },

    /// Polygon offset produced no output paths
    #[error("Offset of '{name}' by {amount} collapsed to nothing")]
    OffsetCollapsed {
        /// Label of the offending path (may be empty).
        name: String,
        /// The requested offset distance.
        amount: f64,
    },

    /// A coordinate is not a finite number
    #[error("Non-finite coordinate in path '{name}'")]
    NonFiniteCoordinate {
        /// Label of the offending path (may be empty).
        name: String,
    },

    /// Generic geometry error
    #[error("Geometry error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Plan error type
///
/// Represents failures of the toolpath planning pipeline. Planning fails
/// fast: no partial command sequence is ever returned.
#[derive(Error, Debug, Clone)]
pub enum PlanError {
    /// The input drawing contains unusable geometry
    #[error("Malformed drawing: {reason}")]
    MalformedDrawing {
        /// Why the drawing could not be planned.
        reason: String,
    },

    /// The tool set cannot be used for planning
    #[error("Invalid tool set: {reason}")]
    InvalidToolSet {
        /// Why the tool set was rejected.
        reason: String,
    },

    /// A planning option has an unusable value
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption {
        /// The option name.
        name: String,
        /// Why the value is unusable.
        reason: String,
    },

    /// A geometry operation failed in a non-recoverable way
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Device error type
///
/// Represents errors reported by the device collaborator when dispatching
/// a command. The scheduler treats these as fatal for the running job.
#[derive(Error, Debug, Clone)]
pub enum DeviceError {
    /// Device is not connected
    #[error("Device not connected")]
    NotConnected,

    /// Device rejected a command
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason the command was rejected.
        reason: String,
    },

    /// Device did not acknowledge within its deadline
    #[error("Device timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Generic device error
    #[error("Device error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Scheduler error type
///
/// Represents internal invariant violations of the command buffer
/// scheduler. These indicate host misuse rather than device trouble.
#[derive(Error, Debug, Clone)]
pub enum SchedulerError {
    /// A second dispatch was attempted while a command was in flight
    #[error("Dispatch attempted while a command is in flight")]
    AlreadyInFlight,

    /// The job was aborted by the host
    #[error("Job aborted")]
    Aborted,

    /// Generic scheduler error
    #[error("Scheduler error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for Brushkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Plan error
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Device error
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Scheduler error
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a device error
    pub fn is_device_error(&self) -> bool {
        matches!(self, Error::Device(_))
    }

    /// Check if this is a plan error
    pub fn is_plan_error(&self) -> bool {
        matches!(self, Error::Plan(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
