//! Periodic tasks driven by simulated time
//!
//! Timers don't own callbacks; the game asks which timer is due next and runs
//! the matching handler itself. This keeps firing order deterministic and lets
//! a handler stop every timer before any other callback runs.

/// A cancellable repeating timer
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTimer {
    period_ms: f64,
    /// Time left until the next fire (meaningful only while running)
    until_next_ms: f64,
    running: bool,
}

impl PeriodicTimer {
    pub fn new(period_ms: u32) -> Self {
        let period_ms = f64::from(period_ms.max(1));
        Self {
            period_ms,
            until_next_ms: period_ms,
            running: false,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting a full period from now. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.until_next_ms = self.period_ms;
    }

    /// Cancel pending fires. No-op if already stopped.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Milliseconds until the next fire, `None` when stopped
    pub fn due_in(&self) -> Option<f64> {
        self.running.then_some(self.until_next_ms)
    }

    /// Let `ms` pass without reaching the next fire
    pub fn elapse(&mut self, ms: f64) {
        if self.running {
            self.until_next_ms -= ms;
        }
    }

    /// Consume the current fire and schedule the next one
    pub fn fire(&mut self) {
        self.until_next_ms += self.period_ms;
    }
}
