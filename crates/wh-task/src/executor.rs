//! The execution half of the task state machine: one primitive per tick.

use tracing::trace;

use wh_core::{Action, Tick};
use wh_grid::{Grid, GridError, Notifier, Occupant, WorldEvent};

use crate::{Agent, TaskError, TaskResult};

/// Execute the next tick-consuming action in `agent`'s queue.
///
/// `ChangeState` entries at the front are applied before the action and any
/// that follow it are applied after, so a plan such as
/// `[ChangeState, PickUp, ChangeState]` completes in a single tick.
///
/// Returns the executed action, or `None` when the queue held nothing but
/// state changes.
pub fn execute(
    agent:    &mut Agent,
    grid:     &mut Grid,
    tick:     Tick,
    notifier: &mut dyn Notifier,
) -> TaskResult<Option<Action>> {
    agent.drain_state_changes();
    let Some(action) = agent.queue.pop_front() else {
        return Ok(None);
    };
    trace!(agent = %agent.id, %action, %tick, "execute");

    match action {
        Action::MoveForward => {
            let from = agent.position;
            let to = agent.ahead();
            let found = grid.get(to);
            if !found.is_free() {
                return Err(TaskError::MoveBlocked { agent: agent.id, at: to, by: found });
            }
            grid.set(from, Occupant::Free)?;
            agent.belief.set(from, Occupant::Free)?;
            grid.set(to, Occupant::Agent(agent.id))?;
            agent.belief.set(to, Occupant::Agent(agent.id))?;
            agent.position = to;
            agent.moves += 1;
            notifier.notify(&WorldEvent::Forward { agent: agent.id });
        }
        Action::Rotate(degrees) => {
            agent.facing = agent.facing.rotated(degrees)?;
            notifier.notify(&WorldEvent::Rotate { agent: agent.id, degrees });
        }
        Action::Wait => {}
        Action::PickUp(object) => {
            if agent.inventory.is_some() {
                return Err(TaskError::InventoryFull(agent.id));
            }
            let at = agent.ahead();
            let found = grid.get(at);
            if found != Occupant::Object(object) {
                return Err(TaskError::PickUpMissed { agent: agent.id, at, found });
            }
            let taken = grid.take_object(at)?;
            agent.belief.set(at, Occupant::Free)?;
            notifier.notify(&WorldEvent::Pickup {
                agent:  agent.id,
                object: taken.id,
                label:  taken.image.stem().to_owned(),
            });
            agent.inventory = Some(taken);
        }
        Action::Store(storage) => {
            let slot = grid.storage_mut(storage)?;
            if slot.is_full() {
                return Err(GridError::StorageFull(storage).into());
            }
            let object = agent.inventory.take().ok_or(TaskError::InventoryEmpty(agent.id))?;
            let object_id = object.id;
            slot.store(object)?;
            agent.stores += 1;
            agent.history.push((tick, agent.stores));
            notifier.notify(&WorldEvent::Store { agent: agent.id, object: object_id, storage });
        }
        Action::ChangeState(state) => agent.state = state,
    }

    agent.drain_state_changes();
    Ok(Some(action))
}
