//! Execution-deadline handle for one UDF invocation.
//!
//! Deadline enforcement is the embedding engine's job; a UDF only probes the
//! handle cooperatively. [`DeadlineTimer`] is the default wall-clock
//! implementation.

use std::time::{Duration, Instant};

use crate::limits::UdfLimits;

/// Deadline handle supplied by the embedding engine.
pub trait Timer: Send + Sync {
    /// True once the invocation's deadline has passed.
    fn timed_out(&self) -> bool;

    /// Milliseconds remaining before the deadline, 0 once passed.
    fn timeslice(&self) -> u64;
}

/// Wall-clock timer over a fixed budget.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineTimer {
    deadline: Instant,
}

impl DeadlineTimer {
    pub fn new(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
        }
    }

    pub fn from_limits(limits: &UdfLimits) -> Self {
        Self::new(Duration::from_millis(limits.execution_budget_ms))
    }
}

impl Timer for DeadlineTimer {
    fn timed_out(&self) -> bool {
        Instant::now() >= self.deadline
    }

    fn timeslice(&self) -> u64 {
        self.deadline
            .saturating_duration_since(Instant::now())
            .as_millis() as u64
    }
}
