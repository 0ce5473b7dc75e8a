//! Demo binary: plans a small watercolor drawing and streams the
//! resulting commands through the scheduler against a console device.

use std::sync::Arc;

use brushkit::{
    init_logging, plan, Color, Command, Device, Drawing, DrawingPath, PlanOptions, Point, Progress,
    RefillMode, Scheduler, SchedulerConfig, SchedulerEvent, ToolId, ToolSet,
};
use parking_lot::Mutex;
use tracing::info;

/// Device that narrates every command to the log.
struct ConsoleDevice;

impl Device for ConsoleDevice {
    fn move_to(&mut self, target: Point) -> brushkit::Result<()> {
        info!("move to ({:.2}, {:.2})", target.x, target.y);
        Ok(())
    }

    fn pen_up(&mut self) -> brushkit::Result<()> {
        info!("pen up");
        Ok(())
    }

    fn pen_down(&mut self) -> brushkit::Result<()> {
        info!("pen down");
        Ok(())
    }

    fn set_tool(&mut self, tool: &ToolId) -> brushkit::Result<()> {
        info!("tool change: {tool}");
        Ok(())
    }

    fn wash_and_load(&mut self, tool: Option<&ToolId>) -> brushkit::Result<()> {
        match tool {
            Some(tool) => info!("wash brush, load {tool}"),
            None => info!("wash brush"),
        }
        Ok(())
    }

    fn park(&mut self) -> brushkit::Result<()> {
        info!("park");
        Ok(())
    }

    fn request_paint_reload(&mut self, return_point: Point) -> brushkit::Result<()> {
        info!(
            "reload paint, returning to ({:.2}, {:.2})",
            return_point.x, return_point.y
        );
        Ok(())
    }

    fn report_status(&mut self, text: &str) {
        info!("status: {text}");
    }
}

fn watercolor_tools() -> ToolSet {
    ToolSet::new([
        (ToolId::new("color0"), Color::rgb(0, 0, 0)),
        (ToolId::new("color1"), Color::rgb(180, 28, 20)),
        (ToolId::new("color2"), Color::rgb(221, 124, 24)),
        (ToolId::new("color3"), Color::rgb(235, 200, 25)),
        (ToolId::new("color4"), Color::rgb(60, 128, 60)),
        (ToolId::new("color5"), Color::rgb(40, 60, 150)),
        (ToolId::new("color6"), Color::rgb(112, 60, 130)),
        (ToolId::new("color7"), Color::rgb(255, 255, 255)),
    ])
    .with_water_tool(ToolId::new("water2"))
    .with_white_tool(ToolId::new("color7"))
}

fn sample_drawing() -> Drawing {
    let mut drawing = Drawing::new();

    let square = DrawingPath::polyline_geometry(
        &[
            Point::new(20.0, 20.0),
            Point::new(120.0, 20.0),
            Point::new(120.0, 120.0),
            Point::new(20.0, 120.0),
        ],
        true,
    );
    drawing.push_path(DrawingPath::filled(square, Color::rgb(190, 30, 25)).named("sun"));

    let zigzag = DrawingPath::polyline_geometry(
        &[
            Point::new(140.0, 30.0),
            Point::new(170.0, 80.0),
            Point::new(200.0, 30.0),
            Point::new(230.0, 80.0),
        ],
        false,
    );
    drawing.push_path(
        DrawingPath::stroked(zigzag, Color::rgb(45, 65, 145))
            .named("waves")
            .with_opacity(1.0),
    );

    drawing
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let tools = watercolor_tools();
    let options = PlanOptions::default();
    let commands: Vec<Command> = plan(&sample_drawing(), &tools, &options)?;
    info!("planned {} commands", commands.len());

    let config = SchedulerConfig {
        refill_mode: RefillMode::Distance,
        refill_threshold_distance: options.refill_threshold_distance,
    };
    let mut scheduler = Scheduler::new(ConsoleDevice, config);

    let last_progress: Arc<Mutex<Option<Progress>>> = Arc::new(Mutex::new(None));
    let progress_slot = last_progress.clone();
    scheduler.set_observer(Box::new(move |event| match event {
        SchedulerEvent::Progress(progress) => *progress_slot.lock() = Some(progress),
        SchedulerEvent::Marker(name) => info!("marker: {name}"),
        SchedulerEvent::Fatal(message) => info!("fatal: {message}"),
    }));

    scheduler.enqueue(commands);
    while !scheduler.is_idle() {
        scheduler.tick();
        if scheduler.is_busy() {
            // A real host would wait for the device here.
            scheduler.on_ack();
        }
    }

    if let Some(progress) = *last_progress.lock() {
        info!(
            "job finished: done={} total={} busy={} paused={}",
            progress.done, progress.total, progress.busy, progress.paused
        );
    }

    Ok(())
}
