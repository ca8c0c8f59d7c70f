use thiserror::Error;

use wh_core::{AgentId, Coord, CoreError};
use wh_grid::{GridError, Occupant};
use wh_nav::NavError;

use crate::{Category, ClassifyError};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("agent {0} tried to pick up with a full inventory")]
    InventoryFull(AgentId),

    #[error("agent {0} tried to store with an empty inventory")]
    InventoryEmpty(AgentId),

    #[error("agent {agent} cannot move onto {at}: blocked by {by}")]
    MoveBlocked { agent: AgentId, at: Coord, by: Occupant },

    #[error("agent {agent} expected object ahead at {at}, found {found}")]
    PickUpMissed { agent: AgentId, at: Coord, found: Occupant },

    #[error("category {0} has no storage partition")]
    UnknownCategory(Category),

    #[error("no free storage left for category {0}")]
    NoSpace(Category),

    #[error("agent {agent} could not rebuild its plan: {source}")]
    RebuildFailed { agent: AgentId, source: NavError },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TaskResult<T> = Result<T, TaskError>;
