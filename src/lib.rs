//! # Brushkit
//!
//! Toolpath planning and command streaming for pen/brush plotting robots:
//! - Vector drawing normalization to flat polylines
//! - Snapping colors to a finite physical tool set
//! - Concentric inset walks for region fills
//! - Greedy travel-distance reduction between strokes
//! - Tangent overshoot for faded brush stroke endings
//! - A tick-driven command buffer scheduler with pause/resume/abort and
//!   automatic paint-refill splicing
//!
//! ## Architecture
//!
//! Brushkit is organized as a workspace with multiple crates:
//!
//! 1. **brushkit-core** - Geometry, colors, tool sets, commands, errors
//! 2. **brushkit-planner** - The drawing-to-command-list pipeline
//! 3. **brushkit-scheduler** - Buffered streaming against a device
//! 4. **brushkit** - Facade crate and demo binary

// Re-export modules for main.rs
pub use brushkit_planner as planner;
pub use brushkit_scheduler as scheduler;

pub use brushkit_core::{
    Color, Command, DeviceError, Error, GeometryError, PathKind, PauseCallback, PlanError, Point,
    Polyline, Result, SchedulerError, StatusCallback, ToolId, ToolInfo, ToolSet,
};

pub use brushkit_planner::{
    plan, Drawing, DrawingItem, DrawingPath, PlanOptions, SnapResult, MARKER_PAINT_BEGIN,
    MARKER_PAINT_COMPLETE,
};

pub use brushkit_scheduler::{
    Device, NoOpDevice, Progress, RefillMode, Scheduler, SchedulerConfig, SchedulerEvent,
    SchedulerObserver,
};

/// Initialize the tracing subscriber for the demo binary. Honors
/// `RUST_LOG`, defaulting to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
