//! Grid geometry: voxel coordinates, map dimensions and cardinal headings.
//!
//! # Axes
//!
//! `x` runs west→east, `y` runs south→north and `z` is the height level
//! (0 = ground floor).  Headings are measured clockwise from north:
//!
//! | Heading | Degrees | Step     |
//! |---------|---------|----------|
//! | North   | 0       | (0, +1)  |
//! | East    | 90      | (+1, 0)  |
//! | South   | 180     | (0, −1)  |
//! | West    | 270     | (−1, 0)  |

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Coord ─────────────────────────────────────────────────────────────────────

/// A voxel coordinate.  Signed so that neighbours of edge cells can be
/// expressed (and then rejected by [`Dims::contains`]).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// A ground-floor coordinate.
    #[inline]
    pub const fn ground(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// The same column at level `z`.
    #[inline]
    pub fn at_level(self, z: i32) -> Self {
        Self { z, ..self }
    }

    /// The horizontally adjacent cell in direction `heading`.
    #[inline]
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self { x: self.x + dx, y: self.y + dy, z: self.z }
    }

    /// Heading of a single horizontal step from `self` to `to`.
    ///
    /// Fails with [`CoreError::NonCardinalStep`] for anything other than a
    /// unit move along one axis on the same level.
    pub fn heading_to(self, to: Coord) -> CoreResult<Heading> {
        if self.z != to.z {
            return Err(CoreError::NonCardinalStep { from: self, to });
        }
        Heading::from_delta(to.x - self.x, to.y - self.y)
            .ok_or(CoreError::NonCardinalStep { from: self, to })
    }

    /// Manhattan distance over the horizontal plane.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ── Dims ──────────────────────────────────────────────────────────────────────

/// Map dimensions.  All three extents are strictly positive.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub width:  u32,
    pub depth:  u32,
    pub height: u32,
}

impl Dims {
    pub fn new(width: u32, depth: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || depth == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, depth, height });
        }
        Ok(Self { width, depth, height })
    }

    /// Total voxel count.
    #[inline]
    pub fn volume(&self) -> usize {
        self.width as usize * self.depth as usize * self.height as usize
    }

    /// Cells on one level.
    #[inline]
    pub fn floor_area(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    /// `true` if the column `(c.x, c.y)` lies inside the map, ignoring `z`.
    #[inline]
    pub fn contains_column(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.depth
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.contains_column(c) && c.z >= 0 && (c.z as u32) < self.height
    }

    /// Flat index of `c` in level-major order, or `None` outside the map.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.z as usize * self.floor_area() + c.x as usize * self.depth as usize + c.y as usize)
    }

    /// Every ground-floor coordinate, x-major.
    pub fn ground_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.width as i32)
            .flat_map(move |x| (0..self.depth as i32).map(move |y| Coord::ground(x, y)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.depth, self.height)
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// One of the four cardinal facings an agent can hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    #[default]
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Neighbour expansion order used by the pathfinder.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    #[inline]
    pub fn degrees(self) -> i32 {
        match self {
            Heading::North => 0,
            Heading::East  => 90,
            Heading::South => 180,
            Heading::West  => 270,
        }
    }

    /// Parse any multiple of 90 (negative values wrap).
    pub fn from_degrees(degrees: i32) -> CoreResult<Self> {
        match degrees.rem_euclid(360) {
            0   => Ok(Heading::North),
            90  => Ok(Heading::East),
            180 => Ok(Heading::South),
            270 => Ok(Heading::West),
            _   => Err(CoreError::InvalidRotation(degrees)),
        }
    }

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East  => (1, 0),
            Heading::South => (0, -1),
            Heading::West  => (-1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1)  => Some(Heading::North),
            (1, 0)  => Some(Heading::East),
            (0, -1) => Some(Heading::South),
            (-1, 0) => Some(Heading::West),
            _       => None,
        }
    }

    /// Apply a signed rotation of `delta` degrees.
    pub fn rotated(self, delta: i32) -> CoreResult<Self> {
        if delta % 90 != 0 {
            return Err(CoreError::InvalidRotation(delta));
        }
        Heading::from_degrees(self.degrees() + delta)
    }

    /// Clockwise rotation from `self` to `target`, normalized to
    /// `{0, 90, 180, 270}`.
    #[inline]
    pub fn rotation_to(self, target: Heading) -> i32 {
        (target.degrees() - self.degrees()).rem_euclid(360)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
