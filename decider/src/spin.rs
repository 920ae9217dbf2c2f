//! Spin reel shown before the final pick is revealed.
//!
//! The reel flips through random items, slowing down in phases: a fast run,
//! a slower run, then a final slow run before landing on the pick. Frames are
//! drawn by [`Selector::spin`](crate::selector::Selector::spin); this module
//! only describes the timing and the resulting frames.

use std::time::Duration;

/// Frames in the fast opening phase.
pub const DEFAULT_FAST_FRAMES: usize = 20;

/// Default phases as `(frames, interval in milliseconds)`.
const DEFAULT_PHASES: [(usize, u64); 3] = [(DEFAULT_FAST_FRAMES, 50), (8, 100), (4, 200)];

/// One constant-speed stretch of the reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPhase {
    /// Number of frames shown in this phase.
    pub frames: usize,

    /// How long each frame stays on screen.
    pub interval: Duration,
}

/// Ordered list of phases making up one spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinSchedule {
    phases: Vec<SpinPhase>,
}

impl SpinSchedule {
    /// Creates a schedule from explicit phases.
    #[must_use]
    pub fn new(phases: Vec<SpinPhase>) -> Self {
        Self { phases }
    }

    /// A schedule with no intermediate frames; the pick is shown immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self { phases: Vec::new() }
    }

    /// The phases in order.
    #[must_use]
    pub fn phases(&self) -> &[SpinPhase] {
        &self.phases
    }

    /// Total number of intermediate frames across all phases.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.phases.iter().map(|p| p.frames).sum()
    }

    /// Total time spent on intermediate frames.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.phases
            .iter()
            .map(|p| p.interval * u32::try_from(p.frames).unwrap_or(u32::MAX))
            .sum()
    }
}

impl Default for SpinSchedule {
    fn default() -> Self {
        Self::new(
            DEFAULT_PHASES
                .iter()
                .map(|&(frames, millis)| SpinPhase {
                    frames,
                    interval: Duration::from_millis(millis),
                })
                .collect(),
        )
    }
}

/// A single intermediate frame: which item to show and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinFrame {
    pub index: usize,
    pub delay: Duration,
}

/// The outcome of a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinReel {
    /// Intermediate frames, in display order.
    pub frames: Vec<SpinFrame>,

    /// Index of the item the reel lands on.
    pub selected: usize,
}
