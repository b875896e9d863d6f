//! Stopwatch state machine
//!
//! Wall-clock based with no internal thread: every transition takes the
//! current instant, and the caller decides how often to `tick()`.
//!
//! ```text
//! Idle -> Running <-> Stopped
//!   ^________________/  (reset)
//! ```

use serde::{Deserialize, Serialize};

/// Current phase of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Zeroed, waiting for start
    #[default]
    Idle,
    /// Counting up from the start reference
    Running,
    /// Frozen, resumable
    Stopped,
}

/// Stopwatch engine
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    phase: TimerPhase,
    /// Instant (ms) with `elapsed = now - start_ref`; only set while running
    start_ref: Option<u64>,
    /// Last computed elapsed ms
    elapsed: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Last computed elapsed ms
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Elapsed ms as of `now`, without mutating
    pub fn elapsed_at(&self, now: u64) -> u64 {
        match (self.phase, self.start_ref) {
            (TimerPhase::Running, Some(start)) => now.saturating_sub(start),
            _ => self.elapsed,
        }
    }

    /// Start or resume. Accumulated time is kept, so a resume continues
    /// counting instead of starting over.
    pub fn start(&mut self, now: u64) {
        // Calling start while running would double count without this
        let elapsed = self.elapsed_at(now);
        self.elapsed = elapsed;
        self.start_ref = Some(now.saturating_sub(elapsed));
        self.phase = TimerPhase::Running;
        log::debug!("timer started at {} (resume from {} ms)", now, elapsed);
    }

    /// Refresh elapsed while running; returns the current value
    pub fn tick(&mut self, now: u64) -> u64 {
        if self.phase == TimerPhase::Running {
            self.elapsed = self.elapsed_at(now);
        }
        self.elapsed
    }

    /// Freeze elapsed. No-op unless running.
    pub fn stop(&mut self, now: u64) -> u64 {
        if self.phase == TimerPhase::Running {
            self.elapsed = self.elapsed_at(now);
            self.start_ref = None;
            self.phase = TimerPhase::Stopped;
            log::debug!("timer stopped at {} ms", self.elapsed);
        }
        self.elapsed
    }

    /// Back to idle with zero elapsed
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.start_ref = None;
        self.elapsed = 0;
    }
}
