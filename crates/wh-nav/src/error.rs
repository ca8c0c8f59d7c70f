//! Navigation error type.

use thiserror::Error;

use wh_core::{Coord, CoreError};

use crate::Goal;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no path from {from} to {goal}")]
    PathNotFound { from: Coord, goal: Goal },

    #[error("path origin {0} lies outside the map")]
    OutsideMap(Coord),

    #[error("invalid movement encoding: {0}")]
    Encoding(#[from] CoreError),
}

impl NavError {
    /// `true` for the exhausted-search case callers may recover from.
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, NavError::PathNotFound { .. })
    }
}

pub type NavResult<T> = Result<T, NavError>;
