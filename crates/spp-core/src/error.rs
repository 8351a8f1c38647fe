//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

use crate::Correction;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Raised only by [`FlockConfig::resolve_strict`][crate::FlockConfig::resolve_strict];
    /// the default path corrects the value and keeps going.
    #[error("invalid configuration: {0}")]
    InvalidConfig(Correction),

    /// A physical constant that would break the periodic wrap.
    #[error("invalid constant {name} = {value}: {reason}")]
    InvalidConstant {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },
}

/// Shorthand result type for `spp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
