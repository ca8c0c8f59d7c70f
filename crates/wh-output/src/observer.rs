//! `StatsObserver<W>`: bridges `WarehouseObserver` to an `OutputWriter`.

use wh_core::Tick;
use wh_sim::{AgentStats, TickSummary, WarehouseObserver};
use wh_task::Agent;

use crate::row::{AgentSnapshotRow, AgentStatsRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`WarehouseObserver`] that records tick summaries, agent snapshots and
/// final agent statistics through any [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is kept and can be
/// collected with [`take_error`][Self::take_error] after the run.
pub struct StatsObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StatsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> WarehouseObserver for StatsObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:    summary.tick.0,
            floor:   summary.census.floor as u64,
            carried: summary.census.carried as u64,
            stored:  summary.census.stored as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id: a.id.0,
                tick:     tick.0,
                x:        a.position.x,
                y:        a.position.y,
                facing:   a.facing.degrees(),
                state:    a.state,
                moves:    a.moves,
                stores:   a.stores,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, stats: &[AgentStats]) {
        let rows: Vec<AgentStatsRow> = stats
            .iter()
            .map(|s| AgentStatsRow {
                agent_id:        s.agent.0,
                moves:           s.moves,
                stores:          s.stores,
                moves_per_store: s.moves_per_store,
            })
            .collect();
        let result = self.writer.write_agent_stats(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
