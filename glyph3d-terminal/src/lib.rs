/// Terminal front end for the glyph3d point-cloud renderer
use anyhow::{anyhow, Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};
use glyph3d_core::{
    error::RenderResult, frame_slot, Camera, DisplaySink, Frame, FrameBuffer, FramePublisher,
    FrameReceiver, RenderError, Scene, SurfaceSize,
};
use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod config;
pub mod logging;
pub mod scenes;
pub mod sink;

pub use config::{AppConfig, Args};
pub use sink::{TerminalSink, TerminalSize};

/// How a run ended when nothing went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The configured frame count was reached
    Completed { frames: u64 },
    /// The user asked to stop
    Interrupted { frames: u64 },
}

/// How often the pipelined display checks for input while no frame is ready
const INPUT_POLL: Duration = Duration::from_millis(20);

/// What the display got while waiting on the render thread
#[derive(Debug)]
enum NextFrame {
    Ready(Frame),
    Interrupted,
    Closed,
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    camera: Camera,
    config: AppConfig,
}

/// Wait up to `timeout` for an interrupt key. Returns early when one arrives.
fn wait_for_interrupt(timeout: Duration) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if sink::is_interrupt(&key) {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}

/// Wait for the next published frame, calling `interrupted` every `poll`
/// until one arrives. A slow frame therefore never delays an interrupt.
fn next_frame<F>(
    receiver: &FrameReceiver,
    poll: Duration,
    mut interrupted: F,
) -> Result<NextFrame>
where
    F: FnMut() -> Result<bool>,
{
    loop {
        match receiver.wait_timeout(poll) {
            Ok(Some(frame)) => return Ok(NextFrame::Ready(frame)),
            Ok(None) => {
                if interrupted()? {
                    return Ok(NextFrame::Interrupted);
                }
            }
            Err(RenderError::HandoffClosed) => return Ok(NextFrame::Closed),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Render frames on the calling thread and publish each complete one.
///
/// Stops after `limit` frames, when `stop` is raised, or when the display
/// side drops its receiver.
pub fn produce_frames<S: SurfaceSize>(
    mut scene: Scene,
    camera: Camera,
    surface: S,
    publisher: FramePublisher,
    stop: Arc<AtomicBool>,
    limit: Option<u64>,
) -> RenderResult<u64> {
    let mut buffer = FrameBuffer::new(0, 0);
    let mut frame = 0u64;

    while !stop.load(Ordering::Relaxed) && limit.map_or(true, |l| frame < l) {
        let (width, height) = surface.surface_size()?;
        buffer.resize(width, height);

        scene.pose_for_frame(frame);
        let rendered = scene.render(&camera, &mut buffer)?;
        if publisher.publish(rendered).is_err() {
            debug!(frame, "display hung up");
            break;
        }
        frame += 1;
    }

    Ok(frame)
}

impl TerminalApp {
    pub fn new(scene: Scene, camera: Camera, config: AppConfig) -> Self {
        Self {
            scene,
            camera,
            config,
        }
    }

    pub fn run(&mut self) -> Result<RunOutcome> {
        let mut out = stdout();
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

        let mut sink = TerminalSink::new(out);
        sink.register_palette(scenes::PALETTE);

        let result = if self.config.pipelined {
            self.pipelined_loop(&mut sink)
        } else {
            self.main_loop(&mut sink)
        };

        // Cleanup, even when the loop failed
        let mut out = sink.into_inner();
        let restored = execute!(out, terminal::LeaveAlternateScreen, cursor::Show)
            .and_then(|_| terminal::disable_raw_mode())
            .and_then(|_| out.flush());
        if let Err(e) = &restored {
            warn!("failed to restore terminal: {e}");
        }

        let outcome = result?;
        restored.context("failed to restore terminal")?;
        Ok(outcome)
    }

    /// Render and display on one thread
    pub fn main_loop<D: DisplaySink>(&mut self, sink: &mut D) -> Result<RunOutcome> {
        let mut buffer = FrameBuffer::new(0, 0);
        let surface = TerminalSize;
        let mut frame = 0u64;
        info!(scene = ?self.config.scene, "render loop started");

        loop {
            if self.config.frames.is_some_and(|limit| frame >= limit) {
                return Ok(RunOutcome::Completed { frames: frame });
            }

            let frame_start = Instant::now();
            self.scene.pose_for_frame(frame);
            let stats = self
                .scene
                .render_to(&self.camera, &mut buffer, sink, &surface)
                .with_context(|| format!("failed to render frame {frame}"))?;
            debug!(frame, plotted = stats.plotted, "frame flushed");
            frame += 1;

            // Interrupts are only looked at between frames
            let remaining = self.config.frame_time.saturating_sub(frame_start.elapsed());
            if wait_for_interrupt(remaining)? {
                return Ok(RunOutcome::Interrupted { frames: frame });
            }
        }
    }

    /// Render on a worker thread, display complete frames on this one
    pub fn pipelined_loop<D: DisplaySink>(&mut self, sink: &mut D) -> Result<RunOutcome> {
        let (publisher, receiver) = frame_slot();
        let stop = Arc::new(AtomicBool::new(false));

        let scene = self.scene.clone();
        let camera = self.camera.clone();
        let limit = self.config.frames;
        let producer_stop = Arc::clone(&stop);
        let producer = thread::Builder::new()
            .name("glyph3d-render".into())
            .spawn(move || produce_frames(scene, camera, TerminalSize, publisher, producer_stop, limit))
            .context("failed to spawn render thread")?;
        info!(scene = ?self.config.scene, "pipelined render loop started");

        let displayed = self.display_frames(&receiver, sink);

        stop.store(true, Ordering::Relaxed);
        drop(receiver);
        let produced = producer
            .join()
            .map_err(|_| anyhow!("render thread panicked"))?
            .context("render thread failed")?;
        debug!(produced, "render thread finished");

        displayed
    }

    fn display_frames<D: DisplaySink>(
        &self,
        receiver: &FrameReceiver,
        sink: &mut D,
    ) -> Result<RunOutcome> {
        let mut frames = 0u64;

        loop {
            let next = next_frame(receiver, INPUT_POLL, || wait_for_interrupt(Duration::ZERO))?;
            let frame = match next {
                NextFrame::Ready(frame) => frame,
                NextFrame::Interrupted => return Ok(RunOutcome::Interrupted { frames }),
                NextFrame::Closed => return Ok(RunOutcome::Completed { frames }),
            };

            let frame_start = Instant::now();
            sink.flush(&frame).context("failed to display frame")?;
            frames += 1;

            let remaining = self.config.frame_time.saturating_sub(frame_start.elapsed());
            if wait_for_interrupt(remaining)? {
                return Ok(RunOutcome::Interrupted { frames });
            }
        }
    }
}
