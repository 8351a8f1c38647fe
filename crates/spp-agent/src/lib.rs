//! `spp-agent` — agent state and the per-step alignment rules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`agent`]     | `Agent` and its four update operations                      |
//! | [`store`]     | `AgentStore` (contiguous, `AgentId`-indexed)                |
//! | [`builder`]   | `AgentStoreBuilder` (random initial placement)              |
//!
//! # Per-step protocol
//!
//! ```text
//! refresh_neighbors        ← candidates supplied by the spatial grid
//! compute_pending_heading  ← reads pre-step velocities only
//! commit_velocity          ← pending → velocity, |velocity| = drift speed
//! integrate_position       ← periodic wraparound
//! ```
//!
//! Each phase must finish for every agent before the next one starts.

pub mod agent;
pub mod builder;
pub mod store;


pub use agent::Agent;
pub use builder::AgentStoreBuilder;
pub use store::AgentStore;
