//! Simulation time model.
//!
//! Time is a monotonically increasing integer `Step` counter.  The mapping
//! to model time is held in `StepClock`:
//!
//!   time = step * dt
//!
//! The time step is fixed for the whole run; there is no adaptive stepping.

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// `true` when `interval > 0` and this step is a multiple of it.
    #[inline]
    pub fn is_on_interval(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks the current step and converts it to model time.
#[derive(Clone, Debug)]
pub struct StepClock {
    /// Model time covered by one step.
    pub dt: f64,
    /// Number of completed steps.
    pub current_step: Step,
}

impl StepClock {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            current_step: Step::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_step = self.current_step + 1;
    }

    /// Model time elapsed since step 0.
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.current_step.0 as f64 * self.dt
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.3})", self.current_step, self.elapsed_time())
    }
}
