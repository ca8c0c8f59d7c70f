//! `wh-task`: what an agent decides to do and how that changes the world.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`agent`]       | `Agent`: position, facing, task state, queue, inventory     |
//! | [`classifier`]  | `Classifier` trait, `StemClassifier`, `ClassifierCache`      |
//! | [`allocator`]   | category partitioning and first-fit storage selection        |
//! | [`planner`]     | `decide` → `Decision`; plan builders; `PlanContext`          |
//! | [`executor`]    | `execute`: apply one primitive action per tick              |
//! | [`error`]       | `TaskError`, `TaskResult<T>`                                 |
//!
//! # Plan / execute split
//!
//! Each tick the orchestrator calls [`decide`] and then [`execute`] for one
//! agent.  `decide` only reads the agent and the grid and returns a
//! [`Decision`]; [`Agent::apply`] is the single place the queue is replaced.
//! `execute` pops exactly one tick-consuming action and mutates the grid.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `ClassifierCache::prefetch` runs on Rayon's thread pool. |

pub mod agent;
pub mod allocator;
pub mod classifier;
pub mod error;
pub mod executor;
pub mod planner;


pub use agent::Agent;
pub use allocator::{Partition, allocate, category_partition};
pub use classifier::{Category, ClassifierCache, Classifier, ClassifyError, StemClassifier};
pub use error::{TaskError, TaskResult};
pub use executor::execute;
pub use planner::{Decision, MAX_BACKOFF, PlanContext, decide};
