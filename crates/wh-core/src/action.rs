//! Agent task states and the primitive actions an agent's queue holds.

use std::fmt;

use crate::{ObjectId, StorageId};

/// The phase of the seek → carry → store cycle an agent is in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    /// Idle; the next plan looks for an object.
    #[default]
    Standby,
    /// Walking to an object it intends to pick up.
    SeekingObject,
    /// Holding an object and walking to its storage.
    CarryingObject,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskState::Standby        => "standby",
            TaskState::SeekingObject  => "seeking",
            TaskState::CarryingObject => "carrying",
        })
    }
}

/// One atomic step in an agent's plan.
///
/// Every variant except `ChangeState` costs one tick when executed.
/// `ChangeState` entries are drained around the tick's single action.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Move one cell in the current facing.
    MoveForward,
    /// Turn clockwise by this many degrees (a multiple of 90).
    Rotate(i32),
    /// Do nothing this tick.
    Wait,
    /// Take the object in the forward cell.
    PickUp(ObjectId),
    /// Put the carried object into the storage ahead.
    Store(StorageId),
    /// Switch task state without consuming a tick.
    ChangeState(TaskState),
}

impl Action {
    #[inline]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Action::ChangeState(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveForward    => f.write_str("forward"),
            Action::Rotate(d)      => write!(f, "rotate {d}"),
            Action::Wait           => f.write_str("wait"),
            Action::PickUp(o)      => write!(f, "pickup {o}"),
            Action::Store(s)       => write!(f, "store {s}"),
            Action::ChangeState(s) => write!(f, "state -> {s}"),
        }
    }
}
