//! Agent-local belief maps and per-tick reconciliation.

use tracing::debug;

use wh_core::{Coord, Dims};

use crate::{GridError, GridResult, Occupant, Side, Surroundings, VoxelMap};

/// An agent's private, possibly stale copy of the world.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BeliefMap {
    layer: VoxelMap,
}

impl BeliefMap {
    pub fn from_layer(layer: VoxelMap) -> Self {
        Self { layer }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.layer.dims()
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Occupant {
        self.layer.get(at)
    }

    pub fn set(&mut self, at: Coord, occupant: Occupant) -> GridResult<()> {
        self.layer.set(at, occupant)
    }

    /// The same map with every other agent taken off the floor.  Used to tell
    /// a route blocked by traffic from one blocked by the layout.
    pub fn without_agents(&self) -> Self {
        Self { layer: self.layer.without_agents() }
    }

    /// What the agent expects to sense at `at`.
    pub fn surroundings(&self, at: Coord) -> Surroundings {
        self.layer.surroundings(at)
    }

    /// Reconcile the map with freshly `sensed` columns around `position`.
    ///
    /// Each side is compared independently against the prediction; every
    /// differing level is overwritten with the sensed value.  Boundaries are
    /// known from construction, so any disagreement that involves
    /// `OutOfBounds` is fatal.  Returns the number of cells rewritten.
    pub fn perceive(&mut self, position: Coord, sensed: &Surroundings) -> GridResult<usize> {
        let predicted = self.surroundings(position);
        let height = self.dims().height;
        let mut changed = 0;

        for side in Side::ALL {
            let expected = predicted.column(side);
            let actual = sensed.column(side);
            if expected == actual {
                continue;
            }
            if actual.len() != expected.len() {
                return Err(GridError::InvalidHeight { z: actual.len() as i32, height });
            }

            let column = side.neighbour(position);
            for (z, (&was, &now)) in expected.iter().zip(actual).enumerate() {
                if was == now {
                    continue;
                }
                let at = column.at_level(z as i32);
                if was.is_out_of_bounds() || now.is_out_of_bounds() {
                    return Err(GridError::UnexpectedBoundary { at, side });
                }
                self.layer.set(at, now)?;
                changed += 1;
            }
            debug!(%position, %side, "belief corrected");
        }

        Ok(changed)
    }
}
