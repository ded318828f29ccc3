//! Frame pacing for hosts without an async runtime.
//!
//! The scheduler drives a [`ModeController`] at a fixed cadence and pushes
//! redrawn frames to the [`OutputDriver`]. The caller is responsible for
//! sleeping between frames.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::controller::ModeController;
use crate::random::RandomSource;
use crate::store::ByteStorage;

/// Default target frame rate
pub const DEFAULT_FPS: u64 = 50;

/// Default frame duration based on target FPS
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS);

/// Result of a frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next frame
    pub next_deadline: Instant,
    /// How long to wait until the next frame, zero if behind schedule
    pub sleep_duration: Duration,
    /// Whether a new frame was written to the output
    pub redrawn: bool,
}

/// Frame scheduler with drift correction
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, driver);
///
/// loop {
///     scheduler.controller_mut().process_intents(&receiver);
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver, S: ByteStorage, R: RandomSource, const N: usize> {
    output: O,
    controller: ModeController<S, R, N>,
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl<O, S, R, const N: usize> FrameScheduler<O, S, R, N>
where
    O: OutputDriver,
    S: ByteStorage,
    R: RandomSource,
{
    /// Create a scheduler running at [`DEFAULT_FPS`]
    pub fn new(controller: ModeController<S, R, N>, output: O) -> Self {
        Self::with_frame_duration(controller, output, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        controller: ModeController<S, R, N>,
        output: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output,
            controller,
            next_frame: None,
            frame_duration,
        }
    }

    /// Run one frame and return timing information
    ///
    /// The output is only written when the active generator redrew the frame.
    /// If the caller fell behind by more than two frames the schedule restarts
    /// from `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let scheduled = match self.next_frame {
            Some(deadline) if now.saturating_duration_since(deadline) <= max_drift => deadline,
            _ => now,
        };

        let redrawn = self.controller.tick(now);
        if redrawn {
            self.output.write(self.controller.frame());
        }

        let next_deadline = scheduled + self.frame_duration;
        self.next_frame = Some(next_deadline);

        FrameResult {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
            redrawn,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn controller(&self) -> &ModeController<S, R, N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ModeController<S, R, N> {
        &mut self.controller
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_parts(self) -> (ModeController<S, R, N>, O) {
        (self.controller, self.output)
    }
}
