//! `wh-nav`: turning "go there" into primitive actions.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`pathfinder`]  | `Pathfinder` trait, `BfsPathfinder`, `Goal`, `Route`  |
//! | [`translator`]  | `to_actions`: cell path → rotate / forward sequence  |
//! | [`error`]       | `NavError`, `NavResult<T>`                            |
//!
//! Both operate on an agent's [`BeliefMap`](wh_grid::BeliefMap), never the
//! ground truth: an agent plans with what it believes, and the planner
//! re-validates each step against fresh perception before it executes.

pub mod error;
pub mod pathfinder;
pub mod translator;


pub use error::{NavError, NavResult};
pub use pathfinder::{BfsPathfinder, Goal, Pathfinder, Route};
pub use translator::to_actions;
