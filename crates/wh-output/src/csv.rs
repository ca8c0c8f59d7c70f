//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `tick_summaries.csv`
//! - `agent_snapshots.csv`
//! - `agent_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, AgentStatsRow, OutputResult, TickSummaryRow};

/// Writes run statistics to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    snapshots: Writer<File>,
    stats:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "floor", "carried", "stored"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent", "tick", "x", "y", "facing", "state", "moves", "stores"])?;

        let mut stats = Writer::from_path(dir.join("agent_stats.csv"))?;
        stats.write_record(["agent", "moves", "stores", "moves_per_store"])?;

        Ok(Self { summaries, snapshots, stats, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.facing.to_string(),
                row.state.to_string(),
                row.moves.to_string(),
                row.stores.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.floor.to_string(),
            row.carried.to_string(),
            row.stored.to_string(),
        ])?;
        Ok(())
    }

    fn write_agent_stats(&mut self, rows: &[AgentStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.stats.write_record(&[
                row.agent_id.to_string(),
                row.moves.to_string(),
                row.stores.to_string(),
                // Empty until the agent has stored something.
                row.moves_per_store.map(|m| format!("{m:.3}")).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
