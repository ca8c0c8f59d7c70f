//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the output directory with three tables:
//! `tick_summaries`, `agent_snapshots` and `agent_stats`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, AgentStatsRow, OutputResult, TickSummaryRow};

/// Writes run statistics to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick    INTEGER PRIMARY KEY,
                 floor   INTEGER NOT NULL,
                 carried INTEGER NOT NULL,
                 stored  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 facing   INTEGER NOT NULL,
                 state    TEXT    NOT NULL,
                 moves    INTEGER NOT NULL,
                 stores   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_stats (
                 agent_id        INTEGER PRIMARY KEY,
                 moves           INTEGER NOT NULL,
                 stores          INTEGER NOT NULL,
                 moves_per_store REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, tick, x, y, facing, state, moves, stores) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick,
                    row.x,
                    row.y,
                    row.facing,
                    row.state.to_string(),
                    row.moves,
                    row.stores,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, floor, carried, stored) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.floor, row.carried, row.stored],
        )?;
        Ok(())
    }

    fn write_agent_stats(&mut self, rows: &[AgentStatsRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO agent_stats \
                 (agent_id, moves, stores, moves_per_store) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.moves,
                    row.stores,
                    row.moves_per_store,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
