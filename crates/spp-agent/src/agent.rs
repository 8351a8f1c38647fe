//! A single self-propelled particle.

use spp_core::{AgentId, UniformSource, Vec2};

/// One agent: position, fixed-speed velocity, and per-step scratch state.
///
/// `neighbors` holds `AgentId`s into the owning [`AgentStore`][crate::AgentStore];
/// it is rebuilt every step and never owns anything.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    /// Point in the periodic domain `[0, L) × [0, L)`.
    pub position: Vec2,

    /// Current heading.  `|velocity| == drift_speed` after every commit.
    pub velocity: Vec2,

    /// Next-step heading, staged so that no agent sees another agent's
    /// updated velocity within the same step.
    pub pending_velocity: Vec2,

    /// Agents strictly within the interaction radius, as of the last
    /// [`refresh_neighbors`](Self::refresh_neighbors).
    pub neighbors: Vec<AgentId>,
}

impl Agent {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            pending_velocity: velocity,
            neighbors: Vec::new(),
        }
    }

    /// `true` if `other` lies strictly closer than `radius`.
    #[inline]
    pub fn in_range(&self, other: Vec2, radius: f64) -> bool {
        self.position.distance(other) < radius
    }

    /// Replace the neighbor set with those `candidates` strictly closer than
    /// `radius`.
    ///
    /// Distance is measured on raw coordinates, not minimum-image ones: a
    /// candidate from a periodically adjacent cell on the far side of the
    /// seam is visited but does not pass the test.
    pub fn refresh_neighbors<I>(&mut self, candidates: I, radius: f64)
    where
        I: IntoIterator<Item = (AgentId, Vec2)>,
    {
        self.neighbors.clear();
        for (id, position) in candidates {
            if self.in_range(position, radius) {
                self.neighbors.push(id);
            }
        }
    }

    /// Unweighted mean of this agent's velocity and its neighbors'
    /// velocities (divisor `neighbor_count + 1`).
    ///
    /// `velocities` is indexed by `AgentId` and must hold pre-step values.
    pub fn neighborhood_mean(&self, velocities: &[Vec2]) -> Vec2 {
        let sum: Vec2 = self.velocity
            + self.neighbors.iter().map(|n| velocities[n.index()]).sum::<Vec2>();
        sum / (self.neighbors.len() + 1) as f64
    }

    /// Stage the next heading: the angle of the neighborhood mean plus a
    /// noise term uniform on `[-noise_amplitude/2, noise_amplitude/2)`,
    /// at the agent's current speed.
    ///
    /// Draws exactly one value from `rng`.
    pub fn compute_pending_heading<U: UniformSource>(
        &mut self,
        velocities:      &[Vec2],
        noise_amplitude: f64,
        rng:             &mut U,
    ) {
        let mean = self.neighborhood_mean(velocities);
        let noise = noise_amplitude * (rng.next_uniform() - 0.5);
        self.pending_velocity = Vec2::from_polar(self.velocity.length(), mean.angle() + noise);
    }

    /// Adopt the pending heading at exactly `drift_speed`.
    ///
    /// The length is rebuilt from the angle rather than rescaled, so the
    /// speed invariant holds even if the pending vector is degenerate.
    pub fn commit_velocity(&mut self, drift_speed: f64) {
        self.velocity = Vec2::from_polar(drift_speed, self.pending_velocity.angle());
    }

    /// Advance by `velocity * dt` and wrap each axis into `[0, domain_size)`.
    pub fn integrate_position(&mut self, dt: f64, domain_size: f64) {
        self.position += self.velocity * dt;
        self.position.x = wrap_coordinate(self.position.x, domain_size);
        self.position.y = wrap_coordinate(self.position.y, domain_size);
    }
}

/// Single-period wraparound into `[0, size)`.
///
/// `Constants::validate` keeps one step's displacement below a grid cell,
/// so one correction suffices.  The trailing check catches `-ε + size` rounding up
/// to exactly `size`.
#[inline]
pub fn wrap_coordinate(x: f64, size: f64) -> f64 {
    let wrapped = if x < 0.0 {
        x + size
    } else if x >= size {
        x - size
    } else {
        x
    };
    if wrapped >= size { 0.0 } else { wrapped }
}
