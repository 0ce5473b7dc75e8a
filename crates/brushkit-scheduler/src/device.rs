//! Device collaborator contract.
//!
//! The scheduler drives a physical plotting device through this trait:
//! exactly one outbound call per command. Calls start the physical action
//! and return immediately; the host delivers the device's acknowledgment
//! by calling [`Scheduler::on_ack`](crate::Scheduler::on_ack) when the
//! action finishes. `report_status` is fire-and-forget and needs no
//! acknowledgment.

use brushkit_core::{Point, Result, ToolId};

/// The device-control collaborator the scheduler dispatches commands to.
pub trait Device {
    /// Move the pen to a point.
    fn move_to(&mut self, point: Point) -> Result<()>;

    /// Lift the pen.
    fn pen_up(&mut self) -> Result<()>;

    /// Lower the pen.
    fn pen_down(&mut self) -> Result<()>;

    /// Select a tool without washing.
    fn set_tool(&mut self, tool: &ToolId) -> Result<()>;

    /// Clean the current tool and, when given, load a new one.
    fn wash_and_load(&mut self, tool: Option<&ToolId>) -> Result<()>;

    /// Park the carriage at its home position.
    fn park(&mut self) -> Result<()>;

    /// Reload paint, then return to the given safe point.
    fn request_paint_reload(&mut self, return_point: Point) -> Result<()>;

    /// Report progress text. Fire-and-forget, no acknowledgment.
    fn report_status(&mut self, text: &str);
}

/// A device that accepts everything and does nothing. Useful for tests
/// and dry runs.
#[derive(Debug, Default)]
pub struct NoOpDevice;

impl Device for NoOpDevice {
    fn move_to(&mut self, _point: Point) -> Result<()> {
        Ok(())
    }

    fn pen_up(&mut self) -> Result<()> {
        Ok(())
    }

    fn pen_down(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_tool(&mut self, _tool: &ToolId) -> Result<()> {
        Ok(())
    }

    fn wash_and_load(&mut self, _tool: Option<&ToolId>) -> Result<()> {
        Ok(())
    }

    fn park(&mut self) -> Result<()> {
        Ok(())
    }

    fn request_paint_reload(&mut self, _return_point: Point) -> Result<()> {
        Ok(())
    }

    fn report_status(&mut self, _text: &str) {}
}
