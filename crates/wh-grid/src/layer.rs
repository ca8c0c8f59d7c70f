//! Flat voxel storage and the four-column sensing window around a cell.

use std::fmt;

use wh_core::{Coord, Dims};

use crate::{GridError, GridResult, Occupant};

// ── VoxelMap ──────────────────────────────────────────────────────────────────

/// A dense `width × depth × height` array of occupants.
///
/// Reads outside the map return [`Occupant::OutOfBounds`]; writes outside
/// the map fail, as do writes of the `OutOfBounds` marker itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VoxelMap {
    dims:  Dims,
    cells: Vec<Occupant>,
}

impl VoxelMap {
    /// An all-free map.
    pub fn new(dims: Dims) -> Self {
        Self { dims, cells: vec![Occupant::Free; dims.volume()] }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Occupant {
        match self.dims.index(at) {
            Some(i) => self.cells[i],
            None    => Occupant::OutOfBounds,
        }
    }

    pub fn set(&mut self, at: Coord, occupant: Occupant) -> GridResult<()> {
        let i = self.dims.index(at).ok_or(GridError::OutOfBounds(at))?;
        if occupant.is_out_of_bounds() {
            return Err(GridError::BoundaryWrite(at));
        }
        self.cells[i] = occupant;
        Ok(())
    }

    /// Every level of the column at `(at.x, at.y)`, bottom first.  A column
    /// outside the map is all `OutOfBounds`.
    pub fn column(&self, at: Coord) -> Vec<Occupant> {
        (0..self.dims.height as i32).map(|z| self.get(at.at_level(z))).collect()
    }

    /// The columns on all four sides of `at`.
    pub fn surroundings(&self, at: Coord) -> Surroundings {
        Surroundings {
            front: self.column(Side::Front.neighbour(at)),
            back:  self.column(Side::Back.neighbour(at)),
            left:  self.column(Side::Left.neighbour(at)),
            right: self.column(Side::Right.neighbour(at)),
        }
    }

    /// A copy with every agent cell freed.
    pub fn without_agents(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&o| if matches!(o, Occupant::Agent(_)) { Occupant::Free } else { o })
            .collect();
        Self { dims: self.dims, cells }
    }

    /// Number of ground-floor cells matching `pred`.
    pub fn count_ground(&self, pred: impl Fn(Occupant) -> bool) -> usize {
        self.cells[..self.dims.floor_area()].iter().filter(|&&o| pred(o)).count()
    }
}

// ── Side ──────────────────────────────────────────────────────────────────────

/// A horizontal neighbour of a cell, in map axes (not relative to facing).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    /// `+y`
    Front,
    /// `−y`
    Back,
    /// `−x`
    Left,
    /// `+x`
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    #[inline]
    pub fn neighbour(self, at: Coord) -> Coord {
        let (dx, dy) = match self {
            Side::Front => (0, 1),
            Side::Back  => (0, -1),
            Side::Left  => (-1, 0),
            Side::Right => (1, 0),
        };
        Coord::new(at.x + dx, at.y + dy, at.z)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Front => "front",
            Side::Back  => "back",
            Side::Left  => "left",
            Side::Right => "right",
        })
    }
}

// ── Surroundings ──────────────────────────────────────────────────────────────

/// The full height stack of the four cells adjacent to a position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Surroundings {
    pub front: Vec<Occupant>,
    pub back:  Vec<Occupant>,
    pub left:  Vec<Occupant>,
    pub right: Vec<Occupant>,
}

impl Surroundings {
    pub fn column(&self, side: Side) -> &[Occupant] {
        match side {
            Side::Front => &self.front,
            Side::Back  => &self.back,
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }
}
