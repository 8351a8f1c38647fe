//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `spp-spatial`.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    /// The 9-cell stencil only sees every neighbor when one cell spans at
    /// least the interaction radius.
    #[error("site size {site_size} is smaller than the interaction radius {radius}")]
    SiteSmallerThanRadius { site_size: f64, radius: f64 },

    #[error("site size must be finite and positive, got {0}")]
    InvalidSiteSize(f64),

    /// Below three cells per axis the periodic stencil visits a cell twice.
    #[error("grid width {0} is too narrow for a periodic 3x3 stencil")]
    GridTooNarrow(usize),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
