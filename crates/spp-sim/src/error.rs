use spp_core::{AgentId, CoreError, Vec2};
use spp_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Strict configuration validation rejected a value.
    #[error("flock configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("spatial grid error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("agent store holds {got} agents but the configuration asks for {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("{id} at {position} lies outside the domain [0, {domain_size})")]
    AgentOutsideDomain {
        id:          AgentId,
        position:    Vec2,
        domain_size: f64,
    },
}

pub type SimResult<T> = Result<T, SimError>;
