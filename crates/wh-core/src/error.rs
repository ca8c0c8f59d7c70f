//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::Coord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("map dimensions must be positive, got {width}x{depth}x{height}")]
    InvalidDimensions { width: u32, depth: u32, height: u32 },

    #[error("{0} degrees is not a cardinal rotation")]
    InvalidRotation(i32),

    #[error("step from {from} to {to} is not a single cardinal move")]
    NonCardinalStep { from: Coord, to: Coord },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wh-core`.
pub type CoreResult<T> = Result<T, CoreError>;
