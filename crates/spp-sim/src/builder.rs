//! Fluent builder for constructing a [`Flock`].

use spp_agent::{AgentStore, AgentStoreBuilder};
use spp_core::{FlockConfig, MotherRng, StepClock, UniformSource};
use spp_spatial::SpatialGrid;
use tracing::info;

use crate::{Flock, SimError, SimResult};

/// Fluent builder for [`Flock<U>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.with_rng(r)`           | [`MotherRng`]                             |
/// | `.agents(store)`         | Random positions and headings from the RNG |
/// | `.uniform_heading(a)`    | Random heading per agent                  |
/// | `.strict(true)`          | Out-of-range values corrected, not rejected |
///
/// Whatever the source, the RNG is reseeded with `config.seed` before the
/// first draw, so the seed alone determines the run.
///
/// # Example
///
/// ```rust,ignore
/// let mut flock = FlockBuilder::new(FlockConfig::with_seed(42)).build()?;
/// flock.run(&mut NoopObserver);
/// println!("{}", flock.order_parameter());
/// ```
pub struct FlockBuilder<U: UniformSource = MotherRng> {
    config:  FlockConfig,
    rng:     U,
    agents:  Option<AgentStore>,
    heading: Option<f64>,
    strict:  bool,
}

impl FlockBuilder<MotherRng> {
    pub fn new(config: FlockConfig) -> Self {
        Self {
            rng: MotherRng::new(config.seed),
            config,
            agents:  None,
            heading: None,
            strict:  false,
        }
    }
}

impl<U: UniformSource> FlockBuilder<U> {
    /// Swap the uniform source, e.g. for [`spp_core::SimRng`].
    pub fn with_rng<V: UniformSource>(self, rng: V) -> FlockBuilder<V> {
        FlockBuilder {
            config:  self.config,
            rng,
            agents:  self.agents,
            heading: self.heading,
            strict:  self.strict,
        }
    }

    /// Supply a hand-built population instead of drawing one.
    ///
    /// The store must hold exactly the resolved agent count, and every
    /// position must lie inside the domain.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Start every drawn agent with the same heading (radians).
    pub fn uniform_heading(mut self, angle: f64) -> Self {
        self.heading = Some(angle);
        self
    }

    /// Reject out-of-range configuration values instead of replacing them
    /// with defaults.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve the configuration, seed the RNG, place the agents, and
    /// allocate the grid.
    ///
    /// Constants that would let one step cross a whole grid cell are
    /// rejected in both modes.
    pub fn build(self) -> SimResult<Flock<U>> {
        // ── Resolve configuration ─────────────────────────────────────────
        let (params, corrections) = if self.strict {
            (self.config.resolve_strict()?, Vec::new())
        } else {
            self.config.resolve()
        };
        let constants = params.constants;
        constants.validate()?;
        let domain_size = params.domain_size();

        let grid = SpatialGrid::new(
            params.grid_width,
            constants.site_size,
            constants.interaction_radius,
        )?;

        // ── Seed and place agents ─────────────────────────────────────────
        let mut rng = self.rng;
        rng.reseed(params.seed);

        let agents = match self.agents {
            Some(store) => {
                if store.len() != params.agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: params.agent_count,
                        got:      store.len(),
                    });
                }
                let outside = store.enumerate().find(|(_, a)| {
                    !((0.0..domain_size).contains(&a.position.x)
                        && (0.0..domain_size).contains(&a.position.y))
                });
                if let Some((id, a)) = outside {
                    return Err(SimError::AgentOutsideDomain {
                        id,
                        position: a.position,
                        domain_size,
                    });
                }
                store
            }
            None => {
                let mut builder = AgentStoreBuilder::new(params.agent_count)
                    .domain_size(domain_size)
                    .drift_speed(constants.drift_speed);
                if let Some(angle) = self.heading {
                    builder = builder.uniform_heading(angle);
                }
                builder.build(&mut rng)
            }
        };

        info!(
            agents = agents.len(),
            grid_width = params.grid_width,
            domain_size,
            noise = params.noise_amplitude,
            seed = params.seed,
            "flock initialized"
        );

        Ok(Flock {
            clock:      StepClock::new(constants.dt),
            velocities: Vec::with_capacity(agents.len()),
            params,
            agents,
            grid,
            rng,
            corrections,
        })
    }
}

