//! Converting a cell path into rotate / move-forward primitives.

use wh_core::{Action, Coord, Heading};

use crate::NavResult;

/// Translate `path` into actions for an agent currently facing `facing`.
///
/// For every consecutive pair of cells the agent turns (if needed) to face
/// the next cell and then steps onto it, except for the final pair: the
/// agent turns toward the last cell but stays put, since that cell normally
/// holds the object or storage the following action targets.
///
/// Rotations are clockwise and normalized to `{90, 180, 270}`.  A pair that
/// is not a single cardinal step is an encoding error.
pub fn to_actions(path: &[Coord], facing: Heading) -> NavResult<Vec<Action>> {
    let mut heading = facing;
    let mut actions = Vec::with_capacity(path.len() * 2);
    let last_step = path.len().saturating_sub(2);

    for (i, pair) in path.windows(2).enumerate() {
        let direction = pair[0].heading_to(pair[1])?;
        let rotation = heading.rotation_to(direction);
        if rotation != 0 {
            actions.push(Action::Rotate(rotation));
            heading = direction;
        }
        if i != last_step {
            actions.push(Action::MoveForward);
        }
    }

    Ok(actions)
}
