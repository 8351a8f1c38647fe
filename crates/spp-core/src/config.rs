//! Run configuration and its validation.
//!
//! A [`FlockConfig`] is the caller's raw request, exactly as it came off a
//! command line or a config file.  [`FlockConfig::resolve`] turns it into
//! [`FlockParams`], replacing each out-of-range value with its documented
//! default and reporting what it changed as a [`Correction`].  Corrections
//! are not failures: the run proceeds with the corrected values.

use std::fmt;

use tracing::warn;

use crate::{CoreError, CoreResult};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Physical constants of the model.
///
/// The defaults are those of the standard Vicsek setup.  The neighbor grid
/// requires `site_size >= interaction_radius`; [`Constants::validate`]
/// checks the time-step constants.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constants {
    /// Time step.
    pub dt: f64,
    /// Distance below which two agents align with each other.
    pub interaction_radius: f64,
    /// Side length of one grid cell.
    pub site_size: f64,
    /// Speed every agent keeps; only the heading evolves.
    pub drift_speed: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            dt:                 1.0,
            interaction_radius: 1.0,
            site_size:          1.0,
            drift_speed:        0.03,
        }
    }
}

impl Constants {
    /// `dt` and `drift_speed` must be finite and positive, and one step
    /// must move an agent less than one grid cell.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [("dt", self.dt), ("drift_speed", self.drift_speed)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::InvalidConstant {
                    name,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }
        let displacement = self.drift_speed * self.dt;
        if !(displacement < self.site_size) {
            return Err(CoreError::InvalidConstant {
                name:   "drift_speed * dt",
                value:  displacement,
                reason: "must be smaller than site_size",
            });
        }
        Ok(())
    }
}

// ── FlockConfig ───────────────────────────────────────────────────────────────

/// Top-level run configuration as requested by the caller.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlockConfig {
    /// Number of grid cells along each axis.  Minimum [`FlockConfig::MIN_GRID_WIDTH`].
    pub grid_width: i64,

    /// Number of agents.  Must lie in `1..=`[`FlockConfig::MAX_AGENT_COUNT`].
    pub agent_count: i64,

    /// Width of the uniform angular noise interval, in radians.  Must be
    /// finite and non-negative.
    pub noise_amplitude: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Total steps simulated by `Flock::run`.
    pub total_steps: u64,

    /// Report the order parameter every N steps.  0 disables measurement.
    pub measure_interval: u64,

    /// Emit an agent snapshot every N steps.  0 disables snapshots.
    pub snapshot_interval: u64,

    pub constants: Constants,
}

impl FlockConfig {
    pub const MIN_GRID_WIDTH: i64 = 10;
    pub const DEFAULT_GRID_WIDTH: i64 = 10;
    pub const DEFAULT_AGENT_COUNT: i64 = 100;
    /// IDs stop one short of `u32::MAX`, which is `AgentId::INVALID`.
    pub const MAX_AGENT_COUNT: i64 = u32::MAX as i64;
    pub const DEFAULT_NOISE_AMPLITUDE: f64 = 1.0;

    /// Configuration with every parameter at its default and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Replace out-of-range values with defaults.
    ///
    /// Every correction is logged at WARN level and returned alongside the
    /// usable parameters.
    pub fn resolve(&self) -> (FlockParams, Vec<Correction>) {
        let (params, corrections) = self.check();
        for c in &corrections {
            warn!(correction = %c, "flock configuration corrected");
        }
        (params, corrections)
    }

    /// Like [`resolve`](Self::resolve), but any correction is an error.
    /// Nothing is logged.
    pub fn resolve_strict(&self) -> CoreResult<FlockParams> {
        let (params, corrections) = self.check();
        match corrections.into_iter().next() {
            Some(c) => Err(CoreError::InvalidConfig(c)),
            None    => Ok(params),
        }
    }

    fn check(&self) -> (FlockParams, Vec<Correction>) {
        let mut corrections = Vec::new();

        let grid_width = if self.grid_width < Self::MIN_GRID_WIDTH {
            corrections.push(Correction::GridWidth {
                requested: self.grid_width,
                applied:   Self::DEFAULT_GRID_WIDTH,
            });
            Self::DEFAULT_GRID_WIDTH
        } else {
            self.grid_width
        };

        let agent_count = if !(1..=Self::MAX_AGENT_COUNT).contains(&self.agent_count) {
            corrections.push(Correction::AgentCount {
                requested: self.agent_count,
                applied:   Self::DEFAULT_AGENT_COUNT,
            });
            Self::DEFAULT_AGENT_COUNT
        } else {
            self.agent_count
        };

        let noise_ok = self.noise_amplitude.is_finite() && self.noise_amplitude >= 0.0;
        let noise_amplitude = if !noise_ok {
            corrections.push(Correction::NoiseAmplitude {
                requested: self.noise_amplitude,
                applied:   Self::DEFAULT_NOISE_AMPLITUDE,
            });
            Self::DEFAULT_NOISE_AMPLITUDE
        } else {
            self.noise_amplitude
        };

        let params = FlockParams {
            grid_width:        grid_width as usize,
            agent_count:       agent_count as usize,
            noise_amplitude,
            seed:              self.seed,
            total_steps:       self.total_steps,
            measure_interval:  self.measure_interval,
            snapshot_interval: self.snapshot_interval,
            constants:         self.constants,
        };
        (params, corrections)
    }
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            grid_width:        Self::DEFAULT_GRID_WIDTH,
            agent_count:       Self::DEFAULT_AGENT_COUNT,
            noise_amplitude:   Self::DEFAULT_NOISE_AMPLITUDE,
            seed:              0,
            total_steps:       100_000,
            measure_interval:  100,
            snapshot_interval: 0,
            constants:         Constants::default(),
        }
    }
}

// ── FlockParams ───────────────────────────────────────────────────────────────

/// Validated parameters a flock is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct FlockParams {
    pub grid_width:        usize,
    pub agent_count:       usize,
    pub noise_amplitude:   f64,
    pub seed:              u64,
    pub total_steps:       u64,
    pub measure_interval:  u64,
    pub snapshot_interval: u64,
    pub constants:         Constants,
}

impl FlockParams {
    /// Side length of the periodic square domain.
    #[inline]
    pub fn domain_size(&self) -> f64 {
        self.grid_width as f64 * self.constants.site_size
    }
}

// ── Correction ────────────────────────────────────────────────────────────────

/// One configuration value that was replaced by its default.
#[derive(Clone, Debug, PartialEq)]
pub enum Correction {
    GridWidth { requested: i64, applied: i64 },
    AgentCount { requested: i64, applied: i64 },
    NoiseAmplitude { requested: f64, applied: f64 },
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::GridWidth { requested, applied } => write!(
                f,
                "grid width {requested} is below the minimum {}, using {applied}",
                FlockConfig::MIN_GRID_WIDTH
            ),
            Correction::AgentCount { requested, applied } => write!(
                f,
                "agent count {requested} is outside 1..={}, using {applied}",
                FlockConfig::MAX_AGENT_COUNT
            ),
            Correction::NoiseAmplitude { requested, applied } => {
                write!(f, "noise amplitude {requested} is not a finite non-negative value, using {applied}")
            }
        }
    }
}
