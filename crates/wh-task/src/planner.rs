//! The per-tick planning half of the task state machine.
//!
//! [`decide`] inspects an agent's queue and returns a [`Decision`]; it never
//! mutates the agent.  The caller hands the decision to [`Agent::apply`].
//!
//! | Queue head        | Check                                | On failure                              |
//! |-------------------|--------------------------------------|-----------------------------------------|
//! | empty, standby    | n/a                                  | seek plan                               |
//! | empty, carrying   | n/a                                  | carry plan                              |
//! | empty, backed off | n/a                                  | rebuilt plan for the current state      |
//! | `MoveForward`     | cell ahead free in the belief map    | back off if an agent, else fatal        |
//! | `PickUp(o)`       | `o` ahead and inventory empty        | fresh seek plan                         |
//! | `Store(s)`        | `s` ahead at its level and not full  | rebuilt carry plan                      |
//!
//! Leading `ChangeState` entries are ignored when finding the queue head;
//! the executor drains them.
//!
//! Backing off drops the queue for `0..=MAX_BACKOFF` waits.  The rebuild runs
//! once they are spent, against whatever the agent perceives on that tick.
//! A rebuild that fails only because other agents stand in the way backs off
//! again; one the layout itself blocks is fatal.

use tracing::{debug, warn};

use wh_core::{Action, AgentRng, TaskState};
use wh_grid::{Grid, GridError, Notifier, Occupant, WorldEvent};
use wh_nav::{Goal, NavError, Pathfinder, to_actions};

use crate::{
    Agent, Category, ClassifierCache, Classifier, TaskError, TaskResult, allocate,
};

/// Largest number of ticks an agent waits before replanning around another
/// agent.
pub const MAX_BACKOFF: u32 = 4;

/// Outcome of one planning pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Decision {
    /// The queue head is still valid.
    Continue,
    /// Replace the queue with a new plan.
    Replan(Vec<Action>),
    /// Nothing reachable to do; replace the queue with an idle plan.
    Idle(Vec<Action>),
    /// Another agent is in the way: drop the queue, wait this many ticks,
    /// then rebuild.
    Backoff(u32),
}

/// Read-only world access plus the shared services a plan needs.
pub struct PlanContext<'a> {
    pub grid:       &'a Grid,
    pub pathfinder: &'a dyn Pathfinder,
    pub classifier: &'a dyn Classifier,
    pub cache:      &'a mut ClassifierCache,
    pub categories: &'a [Category],
    pub notifier:   &'a mut dyn Notifier,
}

/// Whether a carry plan is the first for this object or replaces a plan
/// that failed validation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Origin {
    Fresh,
    Rebuild,
}

/// Decide what `agent` should do with its queue this tick.
pub fn decide(agent: &Agent, ctx: &mut PlanContext<'_>, rng: &mut AgentRng) -> TaskResult<Decision> {
    let Some(head) = agent.next_action() else {
        if agent.backing_off {
            return rebuild(agent, ctx, rng);
        }
        return match agent.state {
            TaskState::CarryingObject => carry_plan(agent, ctx, rng, Origin::Fresh),
            TaskState::Standby | TaskState::SeekingObject => seek_plan(agent, ctx, true),
        };
    };

    match head {
        Action::MoveForward => check_move(agent, ctx, rng),
        Action::PickUp(object) => {
            if agent.inventory.is_some() {
                return Err(TaskError::InventoryFull(agent.id));
            }
            if agent.belief.get(agent.ahead()) == Occupant::Object(object) {
                Ok(Decision::Continue)
            } else {
                debug!(agent = %agent.id, %object, "pickup target gone");
                seek_plan(agent, ctx, false)
            }
        }
        Action::Store(storage) => {
            if agent.inventory.is_none() {
                return Err(TaskError::InventoryEmpty(agent.id));
            }
            let valid = ctx.grid.storage(storage).is_some_and(|s| {
                let ahead = agent.ahead().at_level(s.location.z);
                !s.is_full() && agent.belief.get(ahead) == Occupant::Storage(storage)
            });
            if valid {
                Ok(Decision::Continue)
            } else {
                debug!(agent = %agent.id, %storage, "store target invalid");
                carry_plan(agent, ctx, rng, Origin::Rebuild)
            }
        }
        Action::Rotate(_) | Action::Wait | Action::ChangeState(_) => Ok(Decision::Continue),
    }
}

fn check_move(agent: &Agent, ctx: &mut PlanContext<'_>, rng: &mut AgentRng) -> TaskResult<Decision> {
    let ahead = agent.ahead();
    match agent.belief.get(ahead) {
        Occupant::Free => Ok(Decision::Continue),
        Occupant::Agent(other) => {
            let waits: u32 = rng.gen_range(0..=MAX_BACKOFF);
            warn!(agent = %agent.id, blocker = %other, %ahead, waits, "path blocked, backing off");
            if waits == 0 {
                return rebuild(agent, ctx, rng);
            }
            Ok(Decision::Backoff(waits))
        }
        by => Err(TaskError::MoveBlocked { agent: agent.id, at: ahead, by }),
    }
}

/// Replace an interrupted plan from the agent's current belief.
fn rebuild(agent: &Agent, ctx: &mut PlanContext<'_>, rng: &mut AgentRng) -> TaskResult<Decision> {
    match agent.state {
        TaskState::CarryingObject => carry_plan(agent, ctx, rng, Origin::Rebuild),
        TaskState::Standby | TaskState::SeekingObject => seek_plan(agent, ctx, false),
    }
}

/// Path to the nearest object, pick it up, switch to carrying.
///
/// `announce` prefixes the plan with `ChangeState(SeekingObject)`; plans that
/// replace an in-progress seek leave it out.
fn seek_plan(agent: &Agent, ctx: &mut PlanContext<'_>, announce: bool) -> TaskResult<Decision> {
    let route = match ctx.pathfinder.find_path(&agent.belief, agent.position, Goal::NearestObject) {
        Ok(route) => route,
        Err(NavError::PathNotFound { .. }) => {
            return Ok(Decision::Idle(vec![
                Action::ChangeState(TaskState::Standby),
                Action::Wait,
            ]));
        }
        Err(e) => return Err(e.into()),
    };
    let Occupant::Object(object) = route.target else {
        return Err(TaskError::PickUpMissed {
            agent: agent.id,
            at:    route.goal().unwrap_or(agent.position),
            found: route.target,
        });
    };

    let mut plan = Vec::with_capacity(route.cells.len() * 2 + 3);
    if announce {
        plan.push(Action::ChangeState(TaskState::SeekingObject));
    }
    plan.extend(to_actions(&route.cells, agent.facing)?);
    plan.push(Action::PickUp(object));
    plan.push(Action::ChangeState(TaskState::CarryingObject));
    debug!(agent = %agent.id, %object, hops = route.hops(), "seek plan");
    Ok(Decision::Replan(plan))
}

/// Classify the carried object, allocate a storage, path to it and store.
fn carry_plan(
    agent: &Agent,
    ctx: &mut PlanContext<'_>,
    rng: &mut AgentRng,
    origin: Origin,
) -> TaskResult<Decision> {
    let object = agent.inventory.as_ref().ok_or(TaskError::InventoryEmpty(agent.id))?;

    let (category, fresh) = ctx.cache.classify(ctx.classifier, object)?;
    if fresh {
        ctx.notifier.notify(&WorldEvent::Vision {
            agent:    agent.id,
            category: category.to_string(),
        });
    }

    let storage = match allocate(ctx.grid.storages(), ctx.categories, &category) {
        Ok(id) => id,
        Err(TaskError::NoSpace(category)) => {
            warn!(agent = %agent.id, %category, "no storage space, waiting");
            return Ok(Decision::Idle(vec![Action::Wait]));
        }
        Err(e) => return Err(e),
    };
    let target = ctx
        .grid
        .storage(storage)
        .map(|s| s.location)
        .ok_or(GridError::UnknownStorage(storage))?;

    let goal = Goal::Cell(target);
    let route = match ctx.pathfinder.find_path(&agent.belief, agent.position, goal) {
        Ok(route) => route,
        Err(NavError::PathNotFound { .. }) if origin == Origin::Fresh => {
            return Ok(Decision::Idle(vec![Action::Wait]));
        }
        Err(source @ NavError::PathNotFound { .. }) => {
            let clear = agent.belief.without_agents();
            if ctx.pathfinder.find_path(&clear, agent.position, goal).is_ok() {
                let waits: u32 = rng.gen_range(1..=MAX_BACKOFF);
                warn!(agent = %agent.id, %storage, waits, "storage cut off by traffic, backing off");
                return Ok(Decision::Backoff(waits));
            }
            return Err(TaskError::RebuildFailed { agent: agent.id, source });
        }
        Err(e) => return Err(e.into()),
    };

    let mut plan = to_actions(&route.cells, agent.facing)?;
    plan.push(Action::Store(storage));
    plan.push(Action::ChangeState(TaskState::Standby));
    debug!(agent = %agent.id, object = %object.id, %category, %storage, hops = route.hops(), "carry plan");
    Ok(Decision::Replan(plan))
}
