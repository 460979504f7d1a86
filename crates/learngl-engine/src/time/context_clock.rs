use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds elapsed since the context was created (monotonic, unclamped).
    pub elapsed: f64,
}

/// Monotonic clock anchored at GPU context creation.
///
/// Never clamped: animations driven from it stay in phase with the wall clock,
/// including after the window was minimized.
#[derive(Debug, Clone)]
pub struct ContextClock {
    start: Instant,
}

impl ContextClock {
    /// Starts a clock at the current instant.
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Starts a clock at a given instant.
    pub fn started_at(start: Instant) -> Self {
        Self { start }
    }

    /// Samples the clock for the frame about to be rendered.
    pub fn tick(&self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&self, now: Instant) -> FrameTime {
        FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
        }
    }
}
