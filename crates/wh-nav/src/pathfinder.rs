//! Breadth-first search over a belief map's ground floor.
//!
//! # Determinism
//!
//! Neighbours are expanded in [`Heading::ALL`] order (north, east, south,
//! west).  With a FIFO frontier this makes the returned path, and the object
//! chosen by [`Goal::NearestObject`], a pure function of the map and start
//! cell: nearest by hop count, ties broken by expansion order.

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use wh_core::{Coord, Heading};
use wh_grid::{BeliefMap, Occupant};

use crate::{NavError, NavResult};

// ── Goal / Route ──────────────────────────────────────────────────────────────

/// What the search is looking for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Goal {
    /// The closest cell holding any object.
    NearestObject,
    /// A specific cell, which may itself be occupied (e.g. a storage).
    Cell(Coord),
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::NearestObject => f.write_str("nearest object"),
            Goal::Cell(c)       => write!(f, "{c}"),
        }
    }
}

/// A ground-floor path from the start cell (inclusive) to the goal cell
/// (inclusive).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Route {
    pub cells:  Vec<Coord>,
    /// What the belief map holds at the goal cell.
    pub target: Occupant,
}

impl Route {
    /// Number of single-cell steps.
    #[inline]
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.  Implementations must be `Send + Sync` so the
/// orchestrator can share one instance with any parallel work.
pub trait Pathfinder: Send + Sync {
    fn find_path(&self, map: &BeliefMap, from: Coord, goal: Goal) -> NavResult<Route>;
}

/// Unweighted breadth-first search.  Traverses free cells only, except that
/// the goal cell itself is entered whatever it holds.
pub struct BfsPathfinder;

impl Pathfinder for BfsPathfinder {
    fn find_path(&self, map: &BeliefMap, from: Coord, goal: Goal) -> NavResult<Route> {
        bfs(map, from, goal)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

fn is_goal(goal: Goal, at: Coord, occupant: Occupant) -> bool {
    match goal {
        Goal::NearestObject => matches!(occupant, Occupant::Object(_)),
        Goal::Cell(target)  => at == target.at_level(0),
    }
}

fn bfs(map: &BeliefMap, from: Coord, goal: Goal) -> NavResult<Route> {
    let dims = map.dims();
    let start = from.at_level(0);
    if !dims.contains(start) {
        return Err(NavError::OutsideMap(start));
    }
    if let Goal::Cell(target) = goal {
        if target.at_level(0) == start {
            return Ok(Route { cells: vec![start], target: map.get(start) });
        }
    }

    let slot = |c: Coord| c.x as usize * dims.depth as usize + c.y as usize;
    // parent[slot(v)] = cell that discovered v.
    let mut parent: Vec<Option<Coord>> = vec![None; dims.floor_area()];
    let mut visited = vec![false; dims.floor_area()];
    let mut frontier = VecDeque::new();

    visited[slot(start)] = true;
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {
        let occupant = map.get(cell);
        if cell != start && is_goal(goal, cell, occupant) {
            let cells = reconstruct(&parent, slot, start, cell);
            trace!(%start, %goal, hops = cells.len() - 1, "path found");
            return Ok(Route { cells, target: occupant });
        }

        for heading in Heading::ALL {
            let next = cell.step(heading);
            if !dims.contains(next) || visited[slot(next)] {
                continue;
            }
            let seen = map.get(next);
            if seen.is_free() || is_goal(goal, next, seen) {
                visited[slot(next)] = true;
                parent[slot(next)] = Some(cell);
                frontier.push_back(next);
            }
        }
    }

    Err(NavError::PathNotFound { from: start, goal })
}

fn reconstruct(
    parent: &[Option<Coord>],
    slot:   impl Fn(Coord) -> usize,
    start:  Coord,
    end:    Coord,
) -> Vec<Coord> {
    let mut cells = vec![end];
    let mut cur = end;
    while cur != start {
        match parent[slot(cur)] {
            Some(prev) => {
                cells.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}
