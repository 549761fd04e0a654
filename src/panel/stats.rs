//! Layout solve telemetry.

use std::time::{Duration, Instant};

/// Timing of a panel's layout solves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Duration of the most recent solve.
    pub last: Duration,
    /// Number of solves performed so far.
    pub solves: u64,
}

impl LayoutStats {
    /// Run `solve`, recording its duration.
    pub(crate) fn record<T>(&mut self, solve: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = solve();
        self.last = start.elapsed();
        self.solves += 1;
        out
    }

    /// Duration of the most recent solve in milliseconds.
    pub fn last_ms(&self) -> f64 {
        self.last.as_secs_f64() * 1000.0
    }
}
