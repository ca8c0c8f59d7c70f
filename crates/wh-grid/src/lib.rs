//! `wh-grid`: the shared world map and each agent's private copy of it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`occupant`]  | `Occupant`: what a single voxel holds                     |
//! | [`entity`]    | `Object`, `ImageRef`, `Storage`                            |
//! | [`layer`]     | `VoxelMap` storage and `Surroundings` sensing columns      |
//! | [`grid`]      | `Grid`: ground truth, seeding snapshot, entity registry   |
//! | [`belief`]    | `BeliefMap`: per-agent partial copy and reconciliation    |
//! | [`notify`]    | `WorldEvent`, `Notifier` sinks                             |
//! | [`error`]     | `GridError`, `GridResult<T>`                               |
//!
//! # Ground truth vs. belief
//!
//! The orchestrator owns exactly one [`Grid`].  Agents never hold references
//! into it: each receives a [`BeliefMap`] cloned from the grid's seeding
//! snapshot when it is constructed, and then corrects that copy once per tick
//! from the four columns adjacent to its position.  Cells the agent has never
//! stood next to can stay stale for the whole run.

pub mod belief;
pub mod entity;
pub mod error;
pub mod grid;
pub mod layer;
pub mod notify;
pub mod occupant;


pub use belief::BeliefMap;
pub use entity::{ImageRef, Object, Storage};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use layer::{Side, Surroundings, VoxelMap};
pub use notify::{NoopNotifier, Notifier, RecordingNotifier, TracingNotifier, WorldEvent};
pub use occupant::Occupant;
