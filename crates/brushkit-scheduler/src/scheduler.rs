//! Command buffer scheduler.
//!
//! Owns the live queue of pending commands and drains it one command at a
//! time under a single-concurrent-command invariant. The host calls
//! [`Scheduler::tick`] on a fixed cadence; the device collaborator's
//! acknowledgment comes back through [`Scheduler::on_ack`]. Cumulative
//! drawn distance is tracked so a paint-refill detour can be spliced in
//! ahead of the remaining work.
//!
//! Commands execute in strict insertion order. The only permitted
//! reordering is the refill splice, inserted at the current head of the
//! queue, never appended to the tail.

use std::collections::VecDeque;

use brushkit_core::{Command, PauseCallback, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::device::Device;

/// When the scheduler injects automatic paint reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefillMode {
    /// Never refill automatically.
    Off,
    /// Refill once cumulative drawn distance exceeds the threshold.
    Distance,
}

/// Configuration for the command buffer scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Refill trigger policy.
    pub refill_mode: RefillMode,
    /// Cumulative drawn distance after which a refill is spliced in.
    pub refill_threshold_distance: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refill_mode: RefillMode::Distance,
            refill_threshold_distance: 10805.0,
        }
    }
}

/// A progress snapshot delivered to the observer on every state change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Commands no longer waiting in the buffer.
    pub done: usize,
    /// Total commands enqueued for the running job.
    pub total: usize,
    /// Whether a command is currently in flight.
    pub busy: bool,
    /// Whether the scheduler is paused.
    pub paused: bool,
}

/// Events delivered to the scheduler's observer.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// The queue state changed.
    Progress(Progress),
    /// A `Custom` marker command was reached.
    Marker(String),
    /// A device dispatch failed; the job was aborted. No automatic retry
    /// is attempted.
    Fatal(String),
}

/// Observer callback invoked on every scheduler state change.
pub type SchedulerObserver = Box<dyn FnMut(SchedulerEvent) + Send>;

/// Bounded history of recent move targets, used to pick a safe point to
/// return to before a paint-refill detour.
///
/// Cleared whenever the pen lifts: mid-stroke points are only safe return
/// targets while the stroke is still in progress.
#[derive(Debug, Default)]
struct ReturnPointHistory {
    points: VecDeque<Point>,
    last: Option<Point>,
}

impl ReturnPointHistory {
    const CAPACITY: usize = 4;

    fn record_move(&mut self, point: Point) {
        self.points.push_front(point);
        self.points.truncate(Self::CAPACITY);
        self.last = Some(point);
    }

    fn reset(&mut self) {
        self.points.clear();
    }

    /// The oldest of the kept recent targets: far enough back that paint
    /// was still flowing there. Falls back to the last point issued.
    fn return_point(&self) -> Option<Point> {
        self.points.back().copied().or(self.last)
    }
}

/// The command buffer scheduler.
///
/// All mutation happens on the tick and acknowledgment paths; the struct
/// owns every piece of job state and there is no ambient mutability.
pub struct Scheduler<D: Device> {
    device: D,
    config: SchedulerConfig,
    buffer: VecDeque<Command>,
    in_flight: bool,
    paused: bool,
    total: usize,
    pause_callback: Option<PauseCallback>,
    observer: Option<SchedulerObserver>,
    history: ReturnPointHistory,
    pen_down: bool,
    distance_since_refill: f64,
}

impl<D: Device> Scheduler<D> {
    /// Create a scheduler for one print job.
    pub fn new(device: D, config: SchedulerConfig) -> Self {
        Self {
            device,
            config,
            buffer: VecDeque::new(),
            in_flight: false,
            paused: false,
            total: 0,
            pause_callback: None,
            observer: None,
            history: ReturnPointHistory::default(),
            pen_down: false,
            distance_since_refill: 0.0,
        }
    }

    /// Install the progress/observability callback.
    pub fn set_observer(&mut self, observer: SchedulerObserver) {
        self.observer = Some(observer);
    }

    /// Append commands to the tail of the buffer, in order.
    pub fn enqueue(&mut self, commands: impl IntoIterator<Item = Command>) {
        let before = self.buffer.len();
        self.buffer.extend(commands);
        self.total += self.buffer.len() - before;
        self.notify_progress();
    }

    /// Number of commands still waiting in the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }

    /// Total commands enqueued for the running job.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether a command is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Whether the scheduler is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the job is finished: buffer empty and nothing in flight.
    pub fn is_idle(&self) -> bool {
        self.buffer.is_empty() && !self.in_flight
    }

    /// A reference to the device collaborator.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// A mutable reference to the device collaborator.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Scheduling tick: dequeue and dispatch the head command when nothing
    /// is in flight and the scheduler is not paused.
    ///
    /// The host invokes this on a fixed cadence, independent of command
    /// completion. This is the only entry point that may dequeue.
    pub fn tick(&mut self) {
        if self.in_flight || self.paused {
            return;
        }
        if let Some(command) = self.buffer.pop_front() {
            self.dispatch(command);
        }
    }

    /// Completion continuation: the device collaborator finished the
    /// in-flight command.
    ///
    /// Acknowledgments arriving when nothing is in flight (for example
    /// after an abort) are ignored.
    pub fn on_ack(&mut self) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        self.command_finished();
    }

    /// Request a pause. When nothing is in flight the callback runs
    /// immediately; otherwise it runs from the completion continuation of
    /// the in-flight command.
    pub fn pause(&mut self, callback: PauseCallback) {
        self.paused = true;
        if self.in_flight {
            self.pause_callback = Some(callback);
        } else {
            callback();
        }
        self.notify_progress();
    }

    /// Clear the pause; draining resumes on the next tick.
    pub fn resume(&mut self) {
        self.paused = false;
        self.pause_callback = None;
        self.notify_progress();
    }

    /// Abort the job: clear the buffer and return to idle. Side effects of
    /// an already-dispatched command are not rolled back, and its late
    /// acknowledgment will be ignored.
    pub fn abort(&mut self) {
        debug!(remaining = self.buffer.len(), "aborting job");
        self.reset_job_state();
        self.notify_progress();
    }

    fn reset_job_state(&mut self) {
        self.buffer.clear();
        self.in_flight = false;
        self.paused = false;
        self.total = 0;
        self.pause_callback = None;
        self.history = ReturnPointHistory::default();
        self.pen_down = false;
        self.distance_since_refill = 0.0;
    }

    /// Dispatch one command to the device. Fire-and-forget commands
    /// complete synchronously; everything else occupies the single
    /// in-flight slot until `on_ack`.
    fn dispatch(&mut self, command: Command) {
        debug!(%command, "dispatching");

        let result = match &command {
            Command::Move(point) => {
                if self.pen_down {
                    if let Some(last) = self.history.last {
                        self.distance_since_refill += last.distance_to(point);
                    }
                }
                self.history.record_move(*point);
                self.device.move_to(*point)
            }
            Command::PenUp => {
                // The pen is not mid-stroke; old return points are stale.
                self.history.reset();
                self.pen_down = false;
                self.device.pen_up()
            }
            Command::PenDown => {
                self.pen_down = true;
                self.device.pen_down()
            }
            Command::ToolChange(tool) => self.device.set_tool(tool),
            Command::Wash(tool) => self.device.wash_and_load(tool.as_ref()),
            Command::Park => self.device.park(),
            Command::GetPaint(return_point) => {
                self.distance_since_refill = 0.0;
                self.pen_down = false;
                self.device.request_paint_reload(*return_point)
            }
            Command::Status(text) => {
                self.device.report_status(text);
                self.command_finished();
                return;
            }
            Command::Custom(marker) => {
                self.notify(SchedulerEvent::Marker(marker.clone()));
                self.command_finished();
                return;
            }
        };

        match result {
            Ok(()) => self.in_flight = true,
            Err(err) => self.fatal(&command, err),
        }
    }

    /// Shared completion path for acknowledged and fire-and-forget
    /// commands.
    fn command_finished(&mut self) {
        if self.buffer.is_empty() {
            // Job complete: reset progress and return to idle.
            self.total = 0;
            self.distance_since_refill = 0.0;
            self.notify_progress();
            return;
        }

        self.notify_progress();

        if self.paused {
            if let Some(callback) = self.pause_callback.take() {
                callback();
            }
            return;
        }

        if self.config.refill_mode == RefillMode::Distance
            && self.distance_since_refill > self.config.refill_threshold_distance
        {
            self.splice_refill();
        }
    }

    /// Splice the paint-refill detour in ahead of the next head command:
    /// reload (with a safe return point) and lower the pen again.
    fn splice_refill(&mut self) {
        let return_point = self.history.return_point().unwrap_or(Point::ORIGIN);
        debug!(
            distance = self.distance_since_refill,
            ?return_point,
            "splicing paint refill"
        );
        self.buffer.push_front(Command::PenDown);
        self.buffer.push_front(Command::GetPaint(return_point));
        self.total += 2;
        self.distance_since_refill = 0.0;
        self.notify_progress();
    }

    fn fatal(&mut self, command: &Command, err: brushkit_core::Error) {
        error!(%command, %err, "device dispatch failed, aborting job");
        let message = format!("dispatch of '{command}' failed: {err}");
        self.reset_job_state();
        self.notify(SchedulerEvent::Fatal(message));
        self.notify_progress();
    }

    fn notify_progress(&mut self) {
        let progress = Progress {
            done: self.total - self.buffer.len(),
            total: self.total,
            busy: self.in_flight,
            paused: self.paused,
        };
        self.notify(SchedulerEvent::Progress(progress));
    }

    fn notify(&mut self, event: SchedulerEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        } else if matches!(event, SchedulerEvent::Fatal(_)) {
            warn!("fatal scheduler event with no observer installed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_point_history_keeps_four() {
        let mut history = ReturnPointHistory::default();
        for i in 0..6 {
            history.record_move(Point::new(i as f64, 0.0));
        }
        // Oldest of the kept four is the move at x = 2.
        assert_eq!(history.return_point(), Some(Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_return_point_falls_back_to_last_after_reset() {
        let mut history = ReturnPointHistory::default();
        history.record_move(Point::new(3.0, 4.0));
        history.reset();
        assert_eq!(history.return_point(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_return_point_empty_history() {
        let history = ReturnPointHistory::default();
        assert_eq!(history.return_point(), None);
    }
}
