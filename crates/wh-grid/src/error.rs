//! Grid-subsystem error type.

use thiserror::Error;

use wh_core::{Coord, CoreError, StorageId};

use crate::{Occupant, Side};

/// Errors produced by `wh-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {at} is occupied by {by}")]
    OccupiedCell { at: Coord, by: Occupant },

    #[error("level {z} is outside a map {height} levels high")]
    InvalidHeight { z: i32, height: u32 },

    #[error("{0} lies outside the map")]
    OutOfBounds(Coord),

    #[error("the out-of-bounds marker cannot be stored at {0}")]
    BoundaryWrite(Coord),

    #[error("expected an object at {at}, found {found}")]
    NotAnObject { at: Coord, found: Occupant },

    #[error("storage {0} is full")]
    StorageFull(StorageId),

    #[error("storage {0} is not attached")]
    UnknownStorage(StorageId),

    #[error("sensed an unexpected boundary {side} of {at}")]
    UnexpectedBoundary { at: Coord, side: Side },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;
