//! The content of a single voxel.

use std::fmt;

use wh_core::{AgentId, ObjectId, StorageId};

/// What occupies one cell of a map.
///
/// `OutOfBounds` is a sentinel: it is never stored in a [`VoxelMap`], only
/// returned when a query falls outside the map.
///
/// [`VoxelMap`]: crate::VoxelMap
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    #[default]
    Free,
    OutOfBounds,
    Storage(StorageId),
    Object(ObjectId),
    Agent(AgentId),
}

impl Occupant {
    #[inline]
    pub fn is_free(self) -> bool {
        self == Occupant::Free
    }

    #[inline]
    pub fn is_out_of_bounds(self) -> bool {
        self == Occupant::OutOfBounds
    }

    #[inline]
    pub fn object(self) -> Option<ObjectId> {
        match self {
            Occupant::Object(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Free        => f.write_str("free space"),
            Occupant::OutOfBounds => f.write_str("out of bounds"),
            Occupant::Storage(id) => write!(f, "storage {id}"),
            Occupant::Object(id)  => write!(f, "object {id}"),
            Occupant::Agent(id)   => write!(f, "agent {id}"),
        }
    }
}
