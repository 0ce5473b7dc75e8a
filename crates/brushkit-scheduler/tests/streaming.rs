use brushkit_core::{Command, DeviceError, Point, ToolId};
use brushkit_scheduler::{Device, RefillMode, Scheduler, SchedulerConfig, SchedulerEvent};
use std::sync::{Arc, Mutex};

// Mock device for testing: logs every call it receives.
struct MockDevice {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl MockDevice {
    fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    fn failing_on(call: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(call.to_string()),
        }
    }

    fn log(&self, call: String) -> brushkit_core::Result<()> {
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(DeviceError::CommandRejected { reason: call }.into());
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Device for MockDevice {
    fn move_to(&mut self, target: Point) -> brushkit_core::Result<()> {
        self.log(format!("move {} {}", target.x, target.y))
    }

    fn pen_up(&mut self) -> brushkit_core::Result<()> {
        self.log("up".to_string())
    }

    fn pen_down(&mut self) -> brushkit_core::Result<()> {
        self.log("down".to_string())
    }

    fn set_tool(&mut self, tool: &ToolId) -> brushkit_core::Result<()> {
        self.log(format!("tool {tool}"))
    }

    fn wash_and_load(&mut self, tool: Option<&ToolId>) -> brushkit_core::Result<()> {
        match tool {
            Some(tool) => self.log(format!("wash {tool}")),
            None => self.log("wash".to_string()),
        }
    }

    fn park(&mut self) -> brushkit_core::Result<()> {
        self.log("park".to_string())
    }

    fn request_paint_reload(&mut self, return_point: Point) -> brushkit_core::Result<()> {
        self.log(format!("refill {} {}", return_point.x, return_point.y))
    }

    fn report_status(&mut self, text: &str) {
        self.calls.lock().unwrap().push(format!("status {text}"));
    }
}

/// Drive the scheduler to idle: tick, then acknowledge whatever went out.
fn run_to_idle(scheduler: &mut Scheduler<MockDevice>) {
    for _ in 0..10_000 {
        if scheduler.is_idle() {
            return;
        }
        scheduler.tick();
        if scheduler.is_busy() {
            scheduler.on_ack();
        }
    }
    panic!("scheduler did not reach idle");
}

fn no_refill_config() -> SchedulerConfig {
    SchedulerConfig {
        refill_mode: RefillMode::Off,
        ..SchedulerConfig::default()
    }
}

#[test]
fn test_commands_execute_in_fifo_order() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());

    scheduler.enqueue([
        Command::PenUp,
        Command::Move(Point::new(1.0, 2.0)),
        Command::PenDown,
        Command::Move(Point::new(3.0, 4.0)),
        Command::PenUp,
        Command::Park,
    ]);
    run_to_idle(&mut scheduler);

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["up", "move 1 2", "down", "move 3 4", "up", "park"]
    );
}

#[test]
fn test_single_command_in_flight() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());

    scheduler.enqueue([Command::PenUp, Command::PenDown]);
    scheduler.tick();
    assert!(scheduler.is_busy());

    // Further ticks while a command is in flight dispatch nothing.
    scheduler.tick();
    scheduler.tick();
    assert_eq!(calls.lock().unwrap().len(), 1);

    scheduler.on_ack();
    scheduler.tick();
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn test_fire_and_forget_completes_without_ack() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());

    scheduler.enqueue([
        Command::Status("hello".to_string()),
        Command::Custom("marker".to_string()),
    ]);
    scheduler.tick();
    assert!(!scheduler.is_busy());
    scheduler.tick();
    assert!(scheduler.is_idle());

    // Custom markers go to the observer, not the device.
    assert_eq!(*calls.lock().unwrap(), vec!["status hello"]);
}

#[test]
fn test_custom_marker_reaches_observer() {
    let mut scheduler = Scheduler::new(MockDevice::new(), no_refill_config());
    let markers = Arc::new(Mutex::new(Vec::new()));
    let sink = markers.clone();
    scheduler.set_observer(Box::new(move |event| {
        if let SchedulerEvent::Marker(name) = event {
            sink.lock().unwrap().push(name);
        }
    }));

    scheduler.enqueue([Command::Custom("paint-begin".to_string())]);
    scheduler.tick();

    assert_eq!(*markers.lock().unwrap(), vec!["paint-begin"]);
}

#[test]
fn test_pause_while_in_flight_defers_callback() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());
    let paused_flag = Arc::new(Mutex::new(false));

    scheduler.enqueue([Command::PenUp, Command::PenDown]);
    scheduler.tick();
    assert!(scheduler.is_busy());

    let flag = paused_flag.clone();
    scheduler.pause(Box::new(move || {
        *flag.lock().unwrap() = true;
    }));

    // The in-flight command has not completed: callback must wait.
    assert!(!*paused_flag.lock().unwrap());
    scheduler.tick();
    assert_eq!(calls.lock().unwrap().len(), 1);

    scheduler.on_ack();
    assert!(*paused_flag.lock().unwrap());

    // Paused: nothing new dispatches.
    scheduler.tick();
    assert_eq!(calls.lock().unwrap().len(), 1);

    scheduler.resume();
    scheduler.tick();
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn test_pause_while_idle_invokes_callback_immediately() {
    let mut scheduler = Scheduler::new(MockDevice::new(), no_refill_config());
    let paused_flag = Arc::new(Mutex::new(false));

    let flag = paused_flag.clone();
    scheduler.pause(Box::new(move || {
        *flag.lock().unwrap() = true;
    }));

    assert!(*paused_flag.lock().unwrap());
    assert!(scheduler.is_paused());
}

#[test]
fn test_long_stroke_triggers_exactly_one_refill() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let config = SchedulerConfig {
        refill_mode: RefillMode::Distance,
        refill_threshold_distance: 100.0,
    };
    let mut scheduler = Scheduler::new(device, config);

    // One continuous 150-step stroke, one unit per step.
    let mut commands = vec![Command::Move(Point::new(0.0, 0.0)), Command::PenDown];
    for i in 1..=150 {
        commands.push(Command::Move(Point::new(i as f64, 0.0)));
    }
    commands.push(Command::PenUp);
    scheduler.enqueue(commands);
    run_to_idle(&mut scheduler);

    let calls = calls.lock().unwrap();
    let refills: Vec<&String> = calls.iter().filter(|c| c.starts_with("refill")).collect();
    assert_eq!(refills.len(), 1, "expected exactly one refill splice");

    // The splice fires after cumulative distance passes 100, returns to
    // the oldest of the last four move targets, and lowers the pen before
    // continuing.
    assert_eq!(refills[0], "refill 98 0");
    let refill_index = calls.iter().position(|c| c.starts_with("refill")).unwrap();
    assert_eq!(calls[refill_index - 1], "move 101 0");
    assert_eq!(calls[refill_index + 1], "down");
    assert_eq!(calls[refill_index + 2], "move 102 0");
    assert_eq!(calls.last().unwrap(), "up");
}

#[test]
fn test_no_refill_while_pen_up() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let config = SchedulerConfig {
        refill_mode: RefillMode::Distance,
        refill_threshold_distance: 10.0,
    };
    let mut scheduler = Scheduler::new(device, config);

    // Long travel moves with the pen up consume no paint.
    let commands = (0..20).map(|i| Command::Move(Point::new(i as f64 * 50.0, 0.0)));
    scheduler.enqueue(commands.collect::<Vec<_>>());
    run_to_idle(&mut scheduler);

    assert!(calls.lock().unwrap().iter().all(|c| !c.starts_with("refill")));
}

#[test]
fn test_abort_clears_buffer_and_ignores_late_ack() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());

    scheduler.enqueue([Command::PenUp, Command::PenDown, Command::Park]);
    scheduler.tick();
    assert!(scheduler.is_busy());

    scheduler.abort();
    assert!(scheduler.is_idle());
    assert_eq!(scheduler.remaining(), 0);
    assert_eq!(scheduler.total(), 0);

    // The aborted command's acknowledgment arrives late and is ignored.
    scheduler.on_ack();
    scheduler.tick();
    assert_eq!(*calls.lock().unwrap(), vec!["up"]);
}

#[test]
fn test_device_error_aborts_job_with_fatal_event() {
    let device = MockDevice::failing_on("down");
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());
    let fatals = Arc::new(Mutex::new(Vec::new()));
    let sink = fatals.clone();
    scheduler.set_observer(Box::new(move |event| {
        if let SchedulerEvent::Fatal(message) = event {
            sink.lock().unwrap().push(message);
        }
    }));

    scheduler.enqueue([Command::PenUp, Command::PenDown, Command::Park]);
    scheduler.tick();
    scheduler.on_ack();
    scheduler.tick();

    assert!(scheduler.is_idle());
    assert_eq!(scheduler.remaining(), 0);
    assert_eq!(fatals.lock().unwrap().len(), 1);
    // The failed command and everything after it never ran.
    assert_eq!(*calls.lock().unwrap(), vec!["up"]);
}

#[test]
fn test_progress_reports_done_and_total() {
    let mut scheduler = Scheduler::new(MockDevice::new(), no_refill_config());
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = snapshots.clone();
    scheduler.set_observer(Box::new(move |event| {
        if let SchedulerEvent::Progress(progress) = event {
            sink.lock().unwrap().push(progress);
        }
    }));

    scheduler.enqueue([Command::PenUp, Command::PenDown, Command::Park]);
    run_to_idle(&mut scheduler);

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.first().map(|p| (p.done, p.total)), Some((0, 3)));
    assert!(snapshots.iter().any(|p| p.done == 2 && p.total == 3));
    // Job completion resets the counters.
    assert_eq!(snapshots.last().map(|p| (p.done, p.total)), Some((0, 0)));
}

#[test]
fn test_enqueue_while_draining_extends_job() {
    let device = MockDevice::new();
    let calls = device.calls.clone();
    let mut scheduler = Scheduler::new(device, no_refill_config());

    scheduler.enqueue([Command::PenUp]);
    scheduler.tick();
    scheduler.enqueue([Command::Park]);
    assert_eq!(scheduler.total(), 2);

    scheduler.on_ack();
    run_to_idle(&mut scheduler);
    assert_eq!(*calls.lock().unwrap(), vec!["up", "park"]);
}
