//! Observer trait for progress reporting and data collection.

use wh_core::Tick;
use wh_task::Agent;

use crate::{AgentStats, TickSummary};

/// Callbacks invoked by [`Warehouse::run`][crate::Warehouse::run] and its
/// siblings at key points in the tick loop.
///
/// All methods default to no-ops.
pub trait WarehouseObserver {
    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every agent has acted.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to all agents.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[Agent]) {}

    /// Called once after the last tick of a run.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &[AgentStats]) {}
}

/// A [`WarehouseObserver`] that does nothing.
pub struct NoopObserver;

impl WarehouseObserver for NoopObserver {}
