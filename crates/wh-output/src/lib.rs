//! `wh-output`: run-statistics writers for the warehouse simulation.
//!
//! | Feature   | Backend | Files created                                                  |
//! |-----------|---------|----------------------------------------------------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv`, `agent_snapshots.csv`, `agent_stats.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                                    |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`StatsObserver`], which implements `wh_sim::WarehouseObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, StatsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = StatsObserver::new(writer);
//! warehouse.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsObserver;
pub use row::{AgentSnapshotRow, AgentStatsRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
