//! Per-agent mutable state.

use std::collections::VecDeque;

use tracing::{debug, warn};

use wh_core::{Action, AgentId, Coord, Heading, TaskState, Tick};
use wh_grid::{BeliefMap, Object};

use crate::Decision;

/// A mobile worker.
///
/// The agent's random stream is not stored here: the orchestrator keeps one
/// `AgentRng` per agent in a parallel vector so planning can borrow the agent
/// immutably and its RNG mutably at the same time.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:          AgentId,
    /// Always on the ground floor.
    pub position:    Coord,
    pub facing:      Heading,
    pub state:       TaskState,
    pub queue:       VecDeque<Action>,
    pub inventory:   Option<Object>,
    pub belief:      BeliefMap,
    /// Set while the queue holds backoff waits.  The plan built once they
    /// run out replaces the interrupted one.
    pub backing_off: bool,
    pub moves:       u64,
    pub stores:      u64,
    /// `(tick, stores so far)` after every successful store.
    pub history:     Vec<(Tick, u64)>,
}

impl Agent {
    pub fn new(id: AgentId, position: Coord, facing: Heading, belief: BeliefMap) -> Self {
        Self {
            id,
            position,
            facing,
            state:       TaskState::Standby,
            queue:       VecDeque::new(),
            inventory:   None,
            belief,
            backing_off: false,
            moves:       0,
            stores:      0,
            history:     Vec::new(),
        }
    }

    /// The ground cell directly ahead.
    #[inline]
    pub fn ahead(&self) -> Coord {
        self.position.step(self.facing)
    }

    /// The first queued action that costs a tick, skipping state changes.
    pub fn next_action(&self) -> Option<Action> {
        self.queue.iter().copied().find(|a| !a.is_state_change())
    }

    /// Apply a planning decision.  The only place a plan replaces the queue.
    pub fn apply(&mut self, decision: Decision) {
        match decision {
            Decision::Continue => {}
            Decision::Replan(plan) => {
                debug!(agent = %self.id, state = %self.state, steps = plan.len(), "replanned");
                self.backing_off = false;
                self.queue = plan.into();
            }
            Decision::Idle(plan) => {
                warn!(agent = %self.id, state = %self.state, "nothing to do, idling");
                self.backing_off = false;
                self.queue = plan.into();
            }
            Decision::Backoff(waits) => {
                self.backing_off = true;
                self.queue = std::iter::repeat(Action::Wait).take(waits as usize).collect();
            }
        }
    }

    /// Pop leading `ChangeState` entries and adopt each state in turn.
    pub fn drain_state_changes(&mut self) {
        while let Some(Action::ChangeState(next)) = self.queue.front().copied() {
            self.queue.pop_front();
            if next != self.state {
                debug!(agent = %self.id, from = %self.state, to = %next, "state change");
            }
            self.state = next;
        }
    }

    /// Moves per successful store, or `None` before the first store.
    pub fn moves_per_store(&self) -> Option<f64> {
        (self.stores > 0).then(|| self.moves as f64 / self.stores as f64)
    }
}
