//! Tick-driven command buffer scheduler for brushkit.
//!
//! The planner produces an ordered command list; this crate drains it
//! against a [`Device`] collaborator one command at a time. See
//! [`Scheduler`] for the draining rules and the paint-refill splice.

pub mod device;
pub mod scheduler;

pub use device::{Device, NoOpDevice};
pub use scheduler::{
    Progress, RefillMode, Scheduler, SchedulerConfig, SchedulerEvent, SchedulerObserver,
};
