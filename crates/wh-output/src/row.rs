//! Plain data rows written by output backends.

use wh_core::TaskState;

/// One agent's pose and counters at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        i32,
    pub y:        i32,
    /// Heading in degrees clockwise from north.
    pub facing:   i32,
    pub state:    TaskState,
    pub moves:    u64,
    pub stores:   u64,
}

/// Where the objects were at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:    u64,
    pub floor:   u64,
    pub carried: u64,
    pub stored:  u64,
}

/// Final per-agent efficiency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentStatsRow {
    pub agent_id:        u32,
    pub moves:           u64,
    pub stores:          u64,
    pub moves_per_store: Option<f64>,
}
