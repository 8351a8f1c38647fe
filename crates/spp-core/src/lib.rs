//! `spp-core` — foundational types for the `spp` self-propelled particle
//! simulator.
//!
//! This crate is a dependency of every other `spp-*` crate.  It has no
//! `spp-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`vec2`]        | `Vec2` with polar accessors                           |
//! | [`step`]        | `Step`, `StepClock`                                   |
//! | [`rng`]         | `UniformSource`, `MotherRng`, `SimRng`                |
//! | [`config`]      | `FlockConfig`, `Constants`, `FlockParams`, `Correction` |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod step;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Constants, Correction, FlockConfig, FlockParams};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use rng::{MotherRng, SimRng, UniformSource};
pub use step::{Step, StepClock};
pub use vec2::Vec2;
