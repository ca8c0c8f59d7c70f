//! `wh-core`: foundational types for the warehouse simulation.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and only two external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `ObjectId`, `StorageId`                      |
//! | [`geo`]      | `Coord`, `Dims`, `Heading`                              |
//! | [`time`]     | `Tick`, `SimClock`, `SimConfig`                         |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (seeding)              |
//! | [`action`]   | `Action` primitives and the `TaskState` enum            |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod action;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::{Action, TaskState};
pub use error::{CoreError, CoreResult};
pub use geo::{Coord, Dims, Heading};
pub use ids::{AgentId, ObjectId, StorageId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
