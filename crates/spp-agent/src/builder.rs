//! Fluent builder for the initial agent population.
//!
//! # Usage
//!
//! ```rust
//! use spp_agent::AgentStoreBuilder;
//! use spp_core::MotherRng;
//!
//! let mut rng = MotherRng::new(42);
//! let store = AgentStoreBuilder::new(1_000)
//!     .domain_size(20.0)
//!     .drift_speed(0.03)
//!     .build(&mut rng);
//!
//! assert_eq!(store.len(), 1_000);
//! ```

use std::f64::consts::TAU;

use spp_core::{UniformSource, Vec2};

use crate::{Agent, AgentStore};

/// Places `count` agents uniformly at random in `[0, L) × [0, L)` with
/// uniformly random headings at a fixed speed.
pub struct AgentStoreBuilder {
    count:       usize,
    domain_size: f64,
    drift_speed: f64,
    heading:     Option<f64>,
}

impl AgentStoreBuilder {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            domain_size: 10.0,
            drift_speed: 0.03,
            heading:     None,
        }
    }

    /// Side length `L` of the periodic domain.
    pub fn domain_size(mut self, domain_size: f64) -> Self {
        self.domain_size = domain_size;
        self
    }

    pub fn drift_speed(mut self, drift_speed: f64) -> Self {
        self.drift_speed = drift_speed;
        self
    }

    /// Give every agent the same initial heading (radians) instead of a
    /// random one.  Positions are still random.
    pub fn uniform_heading(mut self, angle: f64) -> Self {
        self.heading = Some(angle);
        self
    }

    /// Draw the population from `rng`.
    ///
    /// Per agent, in ascending ID order: x, y, then the heading (skipped
    /// when [`uniform_heading`](Self::uniform_heading) is set).
    pub fn build<U: UniformSource>(self, rng: &mut U) -> AgentStore {
        let agents = (0..self.count)
            .map(|_| {
                let position = Vec2::new(
                    self.domain_size * rng.next_uniform(),
                    self.domain_size * rng.next_uniform(),
                );
                let angle = match self.heading {
                    Some(a) => a,
                    None    => TAU * rng.next_uniform(),
                };
                Agent::new(position, Vec2::from_polar(self.drift_speed, angle))
            })
            .collect();
        AgentStore::from_agents(agents)
    }
}
