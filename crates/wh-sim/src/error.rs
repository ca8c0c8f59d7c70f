use thiserror::Error;

use wh_core::CoreError;
use wh_grid::GridError;
use wh_task::TaskError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{requested} objects requested but storages only hold {capacity}")]
    InsufficientCapacity { requested: usize, capacity: usize },

    #[error("no free ground cell left for {what}")]
    NoFreeCell { what: &'static str },

    #[error("too many entities to number: {0}")]
    IdOverflow(#[from] std::num::TryFromIntError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Task(#[from] TaskError),
}

pub type SimResult<T> = Result<T, SimError>;
