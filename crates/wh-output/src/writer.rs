//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, AgentStatsRow, OutputResult, TickSummaryRow};

/// Implemented by the CSV and SQLite writers.
///
/// Errors never reach the simulation: [`StatsObserver`][crate::StatsObserver]
/// keeps the first one for [`take_error`][crate::StatsObserver::take_error].
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Written once, when the run ends.
    fn write_agent_stats(&mut self, rows: &[AgentStatsRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
