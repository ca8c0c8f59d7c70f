//! Map entities that carry data beyond their id: loose objects and storages.

use wh_core::{Coord, ObjectId, StorageId};

use crate::{GridError, GridResult};

// ── ImageRef ──────────────────────────────────────────────────────────────────

/// Reference to the image a classifier inspects, e.g. `"bottle.png"`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// File name up to the first `.`.
    pub fn stem(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ── Object ────────────────────────────────────────────────────────────────────

/// A loose item.  Owned by the grid while on the floor, by an agent's
/// inventory while carried and by a storage once sorted.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub id:       ObjectId,
    /// Where the object was seeded.
    pub location: Coord,
    pub image:    ImageRef,
}

impl Object {
    pub fn new(id: ObjectId, location: Coord, image: ImageRef) -> Self {
        Self { id, location, image }
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// A fixed storage slot holding up to `capacity` objects.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Storage {
    pub id:       StorageId,
    pub location: Coord,
    pub capacity: usize,
    contents:     Vec<Object>,
}

impl Storage {
    pub fn new(id: StorageId, location: Coord, capacity: usize) -> Self {
        Self { id, location, capacity, contents: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.contents.len() >= self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Add `object`.  Fails without storing if the slot is already full.
    pub fn store(&mut self, object: Object) -> GridResult<()> {
        if self.is_full() {
            return Err(GridError::StorageFull(self.id));
        }
        self.contents.push(object);
        Ok(())
    }
}
