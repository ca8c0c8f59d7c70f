//! `wh-sim`: the orchestrator that owns the grid and runs the tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ⓪ Prefetch   classify the carried objects of agents about to build a
//!                carry plan (parallel with the `parallel` feature).
//!   for agent in registration order:
//!     ① Perceive sense the four adjacent columns of the ground truth and
//!                reconcile the agent's belief map.
//!     ② Decide   validate the queue head or build a new plan.
//!     ③ Execute  apply one primitive action to the grid.
//!   ④ Record     step_completed event, floor-object series, clock advance.
//! ```
//!
//! Agent N sees every move made by agents 0..N earlier in the same tick and
//! none made by agents after it.  A fatal error from any agent aborts the
//! tick and is returned to the caller.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs the classification prefetch on Rayon's thread pool.   |
//! | `serde`    | `Serialize`/`Deserialize` on config and statistics types.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_nav::BfsPathfinder;
//! use wh_sim::{NoopObserver, WarehouseBuilder, WarehouseConfig};
//! use wh_task::StemClassifier;
//!
//! let mut warehouse =
//!     WarehouseBuilder::new(WarehouseConfig::default(), StemClassifier, BfsPathfinder).build()?;
//! warehouse.run(&mut NoopObserver)?;
//! println!("{:?}", warehouse.census());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::WarehouseBuilder;
pub use config::{StorageSpec, WarehouseConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WarehouseObserver};
pub use sim::Warehouse;
pub use stats::{AgentStats, Census, TickSummary};
