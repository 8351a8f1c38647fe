//! The `Flock` struct and its step loop.

use spp_agent::AgentStore;
use spp_core::{AgentId, Correction, FlockParams, MotherRng, Step, StepClock, UniformSource, Vec2};
use spp_spatial::SpatialGrid;
use tracing::debug;

use crate::{FlockObserver, Frame};

// ── Flock ─────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Flock<U>` owns every agent, the neighbor grid, and the uniform source,
/// and drives the five-phase step:
///
/// 1. **Rebin**: rebuild the grid from current positions.
/// 2. **Neighbors**: refresh each agent's neighbor list from its 3×3 stencil.
/// 3. **Heading**: compute each agent's pending heading from the frozen
///    pre-step velocities plus one noise draw, in ascending `AgentId` order.
/// 4. **Commit**: copy pending headings into velocities at drift speed.
/// 5. **Integrate**: move and wrap every agent.
///
/// Every agent finishes a phase before any agent starts the next, so the
/// result does not depend on the order agents are visited in.
///
/// Create via [`FlockBuilder`][crate::FlockBuilder].
pub struct Flock<U: UniformSource = MotherRng> {
    pub(crate) params: FlockParams,
    pub(crate) clock:  StepClock,
    pub(crate) agents: AgentStore,
    pub(crate) grid:   SpatialGrid,
    pub(crate) rng:    U,

    /// Pre-step velocities, indexed by `AgentId`.  Refilled every step.
    pub(crate) velocities: Vec<Vec2>,

    /// Configuration values replaced by defaults during construction.
    pub(crate) corrections: Vec<Correction>,
}

impl<U: UniformSource> Flock<U> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the flock by one time step.
    pub fn step(&mut self) {
        let constants = self.params.constants;
        let domain_size = self.params.domain_size();

        // ── Phase 1: rebin ────────────────────────────────────────────────
        self.grid.rebuild(self.agents.iter().map(|a| a.position));

        // ── Phase 2: neighbor refresh ─────────────────────────────────────
        let grid = &self.grid;
        for (i, agent) in self.agents.iter_mut().enumerate() {
            let id = AgentId(i as u32);
            agent.refresh_neighbors(
                grid.neighbors_of(id, grid.cell_of(id)),
                constants.interaction_radius,
            );
        }

        // ── Phase 3: pending headings from frozen velocities ──────────────
        self.agents.snapshot_velocities(&mut self.velocities);
        for agent in self.agents.iter_mut() {
            agent.compute_pending_heading(
                &self.velocities,
                self.params.noise_amplitude,
                &mut self.rng,
            );
        }

        // ── Phase 4: commit ───────────────────────────────────────────────
        for agent in self.agents.iter_mut() {
            agent.commit_velocity(constants.drift_speed);
        }

        // ── Phase 5: integrate ────────────────────────────────────────────
        for agent in self.agents.iter_mut() {
            agent.integrate_position(constants.dt, domain_size);
        }

        self.clock.advance();
    }

    /// Run from the current step to `total_steps`.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: FlockObserver>(&mut self, observer: &mut O) {
        while self.clock.current_step.0 < self.params.total_steps {
            self.advance(observer);
        }
        observer.on_run_end(self.clock.current_step);
    }

    /// Run exactly `n` steps from the current position (ignores
    /// `total_steps` and does not call `on_run_end`).
    pub fn run_steps<O: FlockObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.advance(observer);
        }
    }

    fn advance<O: FlockObserver>(&mut self, observer: &mut O) {
        observer.on_step_start(self.clock.current_step);
        self.step();

        let done = self.clock.current_step;
        if done.is_on_interval(self.params.measure_interval) {
            let order = self.order_parameter();
            debug!(step = done.0, order, "order parameter");
            observer.on_measurement(done, order);
        }
        if done.is_on_interval(self.params.snapshot_interval) {
            observer.on_snapshot(done, &self.frame());
        }
    }

    // ── Measurements ──────────────────────────────────────────────────────

    /// `|Σ vᵢ| / (drift_speed · N)`: 1 for perfect alignment, near 0 for
    /// disorder.
    pub fn order_parameter(&self) -> f64 {
        let norm = self.params.constants.drift_speed * self.agents.len() as f64;
        if norm <= 0.0 {
            return 0.0;
        }
        // Rounding can push a perfectly aligned flock a hair above 1.
        (self.agents.velocity_sum().length() / norm).min(1.0)
    }

    /// Renderer view of the current state.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            agents:      self.agents.as_slice(),
            grid_width:  self.params.grid_width,
            domain_size: self.params.domain_size(),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    #[inline]
    pub fn grid_width(&self) -> usize {
        self.params.grid_width
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn noise_amplitude(&self) -> f64 {
        self.params.noise_amplitude
    }

    #[inline]
    pub fn domain_size(&self) -> f64 {
        self.params.domain_size()
    }

    /// Number of completed steps.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }

    #[inline]
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// Grid as binned at the start of the last step.
    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn position(&self, id: AgentId) -> Option<Vec2> {
        self.agents.get(id).map(|a| a.position)
    }

    pub fn velocity(&self, id: AgentId) -> Option<Vec2> {
        self.agents.get(id).map(|a| a.velocity)
    }

    /// Values the builder replaced with defaults.  Empty in strict mode.
    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }
}
