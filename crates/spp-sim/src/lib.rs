//! `spp-sim` — step loop orchestrator for the spp flocking simulator.
//!
//! # Synchronous step
//!
//! ```text
//! for step in 0..params.total_steps:
//!   ① Rebin      — SpatialGrid::rebuild over all positions.
//!   ② Neighbors  — Agent::refresh_neighbors from the 3×3 periodic stencil.
//!   ③ Heading    — Agent::compute_pending_heading from frozen velocities,
//!                  one noise draw per agent in ascending AgentId order.
//!   ④ Commit     — Agent::commit_velocity at drift speed.
//!   ⑤ Integrate  — Agent::integrate_position with periodic wrap.
//!   then, on interval: on_measurement(order parameter), on_snapshot(frame)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use spp_core::FlockConfig;
//! use spp_sim::{FlockBuilder, NoopObserver};
//!
//! let config = FlockConfig { agent_count: 400, grid_width: 20, ..FlockConfig::with_seed(42) };
//! let mut flock = FlockBuilder::new(config).build()?;
//! flock.run_steps(1_000, &mut NoopObserver);
//! println!("v = {}", flock.order_parameter());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::FlockBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FlockObserver, Frame, NoopObserver};
pub use sim::Flock;
