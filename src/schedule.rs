//! Periodic tick timer
//!
//! Driven from the animation-frame loop: each frame feeds the elapsed time in,
//! then drains due ticks one at a time. There is only ever one timer, so
//! re-arming after a reset cannot start a second tick loop.

use crate::consts::MAX_FRAME_MS;

#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    interval_ms: f64,
    elapsed_ms: f64,
    armed: bool,
}

impl TickTimer {
    /// A disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the timer; the first tick is due one interval from now
    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = f64::from(interval_ms.max(1));
        self.elapsed_ms = 0.0;
        self.armed = true;
    }

    /// Stop the timer and drop any accumulated time
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Change the period for the next tick without losing accumulated time
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = f64::from(interval_ms.max(1));
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Feed elapsed wall time. Long gaps (hidden tab) are clamped.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.armed && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms.min(MAX_FRAME_MS);
        }
    }

    /// Consume one due tick, if any
    pub fn take_due(&mut self) -> bool {
        if self.armed && self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }

    /// Drop leftover time after hitting the per-frame tick cap
    pub fn discard_backlog(&mut self) {
        self.elapsed_ms = self.elapsed_ms.min(self.interval_ms);
    }
}
