//! `spp-spatial` — periodic uniform-grid neighbor index.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `SpatialGrid` (packed cell lists), `GridEntry`, `Stencil`    |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Cost model
//!
//! Rebuild is two linear passes over the agents (count, then scatter).  A
//! neighbor query visits the agent's own cell and its eight periodic
//! neighbours, so with a bounded density the per-agent query cost is
//! constant and a full step is linear in the agent count.

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::{GridEntry, SpatialGrid, Stencil};
