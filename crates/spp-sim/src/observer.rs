//! Flock observer trait for progress reporting and data collection.

use spp_agent::Agent;
use spp_core::Step;

/// Read-only view of the flock handed to snapshot observers.
///
/// Carries the two scalars a renderer needs to draw periodic wraparound
/// alongside the agents themselves.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// Agents in ascending `AgentId` order.
    pub agents:      &'a [Agent],
    pub grid_width:  usize,
    pub domain_size: f64,
}

/// Callbacks invoked by [`Flock::run`][crate::Flock::run] and
/// [`Flock::run_steps`][crate::Flock::run_steps].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — console progress
///
/// ```rust,ignore
/// struct Progress;
///
/// impl FlockObserver for Progress {
///     fn on_measurement(&mut self, step: Step, order: f64) {
///         println!("{step}: v = {order}");
///     }
/// }
/// ```
pub trait FlockObserver {
    /// Called before each step, with the index of the step about to run.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called every `measure_interval` completed steps with the order
    /// parameter of the post-step state.  `step` counts completed steps.
    fn on_measurement(&mut self, _step: Step, _order_parameter: f64) {}

    /// Called every `snapshot_interval` completed steps.
    fn on_snapshot(&mut self, _step: Step, _frame: &Frame<'_>) {}

    /// Called once when [`Flock::run`][crate::Flock::run] finishes.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`FlockObserver`] that does nothing.
pub struct NoopObserver;

impl FlockObserver for NoopObserver {}
