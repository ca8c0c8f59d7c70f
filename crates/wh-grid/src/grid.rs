//! The orchestrator-owned ground-truth grid.

use std::collections::BTreeMap;

use tracing::debug;

use wh_core::{AgentId, Coord, Dims, ObjectId, StorageId};

use crate::{BeliefMap, GridError, GridResult, Object, Occupant, Storage, Surroundings, VoxelMap};

/// Which layers a write reaches.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Scope {
    /// Seeding: ground truth and the snapshot new belief maps are cloned from.
    Seed,
    /// Runtime: ground truth only.
    Live,
}

/// The single canonical world map.
///
/// Holds two layers of the same dimensions:
///
/// - `truth`: always current; every agent senses from it.
/// - `snapshot`: written only while seeding storages and objects.  A new
///   agent's [`BeliefMap`] is cloned from it, so an agent knows the storages
///   and objects that existed when it was built, but never other agents.
///
/// All cell writes pass through one private `write`, which decides per
/// [`Scope`] whether the snapshot is touched.
///
/// The grid also owns the data behind `Storage` and `Object` occupants.
/// Objects leave the registry when picked up, so `floor_objects()` is exact.
#[derive(Clone, Debug)]
pub struct Grid {
    dims:     Dims,
    truth:    VoxelMap,
    snapshot: VoxelMap,
    storages: Vec<Storage>,
    objects:  BTreeMap<ObjectId, Object>,
    capacity: usize,
}

impl Grid {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            truth:    VoxelMap::new(dims),
            snapshot: VoxelMap::new(dims),
            storages: Vec::new(),
            objects:  BTreeMap::new(),
            capacity: 0,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Occupant {
        self.truth.get(at)
    }

    /// Read-only access to the ground-truth layer.
    pub fn truth(&self) -> &VoxelMap {
        &self.truth
    }

    /// Sum of the capacities of every attached storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Storages in attachment order.
    pub fn storages(&self) -> &[Storage] {
        &self.storages
    }

    pub fn storage(&self, id: StorageId) -> Option<&Storage> {
        self.storages.iter().find(|s| s.id == id)
    }

    pub fn storage_mut(&mut self, id: StorageId) -> GridResult<&mut Storage> {
        self.storages
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(GridError::UnknownStorage(id))
    }

    /// Objects still lying on the floor.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    #[inline]
    pub fn floor_objects(&self) -> usize {
        self.objects.len()
    }

    /// Objects held by storages.
    pub fn stored_objects(&self) -> usize {
        self.storages.iter().map(Storage::len).sum()
    }

    /// Ground-floor cells that are free in the ground truth.
    pub fn free_ground_cells(&self) -> Vec<Coord> {
        self.dims.ground_cells().filter(|&c| self.truth.get(c).is_free()).collect()
    }

    /// The four columns adjacent to `at` in the ground truth.
    pub fn surroundings(&self, at: Coord) -> Surroundings {
        self.truth.surroundings(at)
    }

    /// A fresh belief map for an agent being constructed now.
    pub fn belief_snapshot(&self) -> BeliefMap {
        BeliefMap::from_layer(self.snapshot.clone())
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Attach `storage` at its location and add its capacity.
    pub fn attach_storage(&mut self, storage: Storage) -> GridResult<()> {
        let at = storage.location;
        self.check_placeable(at)?;
        self.write(at, Occupant::Storage(storage.id), Scope::Seed)?;
        self.capacity += storage.capacity;
        debug!(storage = %storage.id, %at, capacity = storage.capacity, "storage attached");
        self.storages.push(storage);
        Ok(())
    }

    /// Put a loose object on the floor.
    pub fn seed_object(&mut self, object: Object) -> GridResult<()> {
        let at = object.location;
        self.check_placeable(at)?;
        self.write(at, Occupant::Object(object.id), Scope::Seed)?;
        self.objects.insert(object.id, object);
        Ok(())
    }

    /// Mark `at` as holding `agent`.  Agents are never part of the snapshot.
    pub fn place_agent(&mut self, agent: AgentId, at: Coord) -> GridResult<()> {
        self.check_placeable(at)?;
        self.write(at, Occupant::Agent(agent), Scope::Live)
    }

    // ── Runtime mutation ──────────────────────────────────────────────────

    /// Overwrite one ground-truth cell.
    pub fn set(&mut self, at: Coord, occupant: Occupant) -> GridResult<()> {
        self.write(at, occupant, Scope::Live)
    }

    /// Remove the object at `at` from the floor and hand it to the caller.
    pub fn take_object(&mut self, at: Coord) -> GridResult<Object> {
        let found = self.truth.get(at);
        let object = found
            .object()
            .and_then(|id| self.objects.remove(&id))
            .ok_or(GridError::NotAnObject { at, found })?;
        self.write(at, Occupant::Free, Scope::Live)?;
        Ok(object)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_placeable(&self, at: Coord) -> GridResult<()> {
        if at.z < 0 || at.z as u32 >= self.dims.height {
            return Err(GridError::InvalidHeight { z: at.z, height: self.dims.height });
        }
        match self.truth.get(at) {
            Occupant::Free        => Ok(()),
            Occupant::OutOfBounds => Err(GridError::OutOfBounds(at)),
            by                    => Err(GridError::OccupiedCell { at, by }),
        }
    }

    fn write(&mut self, at: Coord, occupant: Occupant, scope: Scope) -> GridResult<()> {
        self.truth.set(at, occupant)?;
        if scope == Scope::Seed {
            self.snapshot.set(at, occupant)?;
        }
        Ok(())
    }
}
