//! Seeding and run configuration.

use wh_core::{Coord, Dims, SimConfig};

/// One storage to attach, in attachment order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageSpec {
    pub location: Coord,
    pub capacity: usize,
}

impl StorageSpec {
    pub fn new(location: Coord, capacity: usize) -> Self {
        Self { location, capacity }
    }
}

/// Everything needed to seed a warehouse and run it.
///
/// `object_count` and `agent_count` are totals: objects or agents placed
/// explicitly through the builder count toward them and the remainder is
/// placed at random free ground cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarehouseConfig {
    pub dimensions:   Dims,
    pub storages:     Vec<StorageSpec>,
    /// Category labels in partition order.  Random objects cycle through
    /// them, using `"<label>.png"` as the image.
    pub categories:   Vec<String>,
    pub object_count: usize,
    pub agent_count:  usize,
    pub sim:          SimConfig,
}

impl Default for WarehouseConfig {
    /// A 10×10 single-level floor with six two-slot storages, nine objects in
    /// three categories and three agents.
    ///
    /// The storages stand apart in two interior rows so each can be reached
    /// from all four sides.
    fn default() -> Self {
        Self {
            dimensions:   Dims { width: 10, depth: 10, height: 1 },
            storages:     [2, 5, 8]
                .into_iter()
                .flat_map(|x| [3, 6].map(|y| StorageSpec::new(Coord::ground(x, y), 2)))
                .collect(),
            categories:   vec!["bottle".into(), "box".into(), "can".into()],
            object_count: 9,
            agent_count:  3,
            sim:          SimConfig::default(),
        }
    }
}
