//! Run statistics derived from the grid and agents.

use wh_core::{AgentId, Tick};

/// Where every seeded object currently is.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Census {
    pub floor:   usize,
    pub carried: usize,
    pub stored:  usize,
}

impl Census {
    /// Always equals the seeded object count.
    pub fn total(&self) -> usize {
        self.floor + self.carried + self.stored
    }

    pub fn is_sorted(&self) -> bool {
        self.floor == 0 && self.carried == 0
    }
}

/// What happened in one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:   Tick,
    pub census: Census,
    /// Agents that executed a tick-consuming action.
    pub acted:  usize,
}

/// Per-agent efficiency.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStats {
    pub agent:           AgentId,
    pub moves:           u64,
    pub stores:          u64,
    /// Lower is better.  `None` until the first store.
    pub moves_per_store: Option<f64>,
}
