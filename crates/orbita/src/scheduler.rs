//! Fixed-cadence frame loop.

use std::time::{Duration, Instant};

use color_eyre::Result;
use tracing::{error, info};

/// Host answer to "render another frame?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Continue,
    Stop,
}

/// Something the scheduler can drive: renders frames and provides the
/// refresh signal between them.
pub trait FrameHost {
    /// Render exactly one frame.
    fn render_frame(&mut self) -> Result<()>;

    /// Block until `deadline`, then say whether to keep going.
    fn wait_until(&mut self, deadline: Instant) -> Result<Refresh>;
}

/// Calls [`FrameHost::render_frame`] once per interval until the host stops.
#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    interval: Duration,
}

impl FrameScheduler {
    /// Scheduler for `fps` frames per second. Zero is treated as one.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
        }
    }

    /// Run until the host answers [`Refresh::Stop`]. Returns the number of
    /// frames rendered. A frame error ends the loop immediately.
    pub fn run<H: FrameHost>(&self, host: &mut H) -> Result<u64> {
        info!(interval_ms = self.interval.as_secs_f64() * 1000.0, "frame loop started");

        let mut frames = 0u64;
        let mut deadline = Instant::now();
        loop {
            if let Err(err) = host.render_frame() {
                error!("frame {} failed: {err:#}", frames + 1);
                return Err(err);
            }
            frames += 1;

            deadline += self.interval;
            let now = Instant::now();
            if deadline < now {
                // Behind schedule: render next as soon as possible, no bursts.
                deadline = now;
            }

            if host.wait_until(deadline)? == Refresh::Stop {
                info!(frames, "frame loop stopped");
                return Ok(frames);
            }
        }
    }
}
