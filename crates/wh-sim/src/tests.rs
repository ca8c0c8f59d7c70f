//! Integration tests for wh-sim.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wh_core::{Action, AgentId, Coord, Dims, Heading, ObjectId, SimConfig, StorageId, TaskState, Tick};
use wh_grid::{ImageRef, Occupant, RecordingNotifier};
use wh_nav::BfsPathfinder;
use wh_task::{Agent, Category, ClassifyError, StemClassifier};

use crate::{
    AgentStats, NoopObserver, SimError, StorageSpec, TickSummary, Warehouse, WarehouseBuilder,
    WarehouseConfig, WarehouseObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(w: u32, d: u32, storages: Vec<StorageSpec>, categories: &[&str]) -> WarehouseConfig {
    WarehouseConfig {
        dimensions:   Dims { width: w, depth: d, height: 1 },
        storages,
        categories:   categories.iter().map(|c| c.to_string()).collect(),
        object_count: 0,
        agent_count:  0,
        sim:          SimConfig { total_ticks: 100, seed: 42, output_interval_ticks: 0 },
    }
}

fn slot(x: i32, y: i32, capacity: usize) -> StorageSpec {
    StorageSpec::new(Coord::ground(x, y), capacity)
}

/// 4×4 floor, one storage at (3,3), one object directly ahead of one agent
/// at the origin facing north.
fn scenario_a(events: RecordingNotifier) -> Warehouse<StemClassifier, BfsPathfinder> {
    WarehouseBuilder::new(config(4, 4, vec![slot(3, 3, 1)], &["bottle"]), StemClassifier, BfsPathfinder)
        .notifier(events)
        .object_at(Coord::ground(0, 1), "bottle.png")
        .agent_at(Coord::ground(0, 0), Heading::North)
        .build()
        .unwrap()
}

/// Two agents the same distance from one object; a second object exists
/// only when `spare` is set.
fn scenario_b(spare: bool) -> Warehouse<StemClassifier, BfsPathfinder> {
    let mut b = WarehouseBuilder::new(config(5, 5, vec![slot(4, 0, 2)], &["bottle"]), StemClassifier, BfsPathfinder)
        .object_at(Coord::ground(2, 2), "bottle.png");
    if spare {
        b = b.object_at(Coord::ground(0, 4), "bottle.png");
    }
    b.agent_at(Coord::ground(2, 0), Heading::North)
        .agent_at(Coord::ground(2, 4), Heading::South)
        .build()
        .unwrap()
}

/// 12×12 floor, six free-standing storages, nine random objects in three
/// categories and three random agents.
fn busy(seed: u64) -> WarehouseConfig {
    let storages = [3, 6, 9].into_iter().flat_map(|x| [5, 8].map(|y| slot(x, y, 2))).collect();
    let mut c = config(12, 12, storages, &["bottle", "box", "can"]);
    c.object_count = 9;
    c.agent_count = 3;
    c.sim.seed = seed;
    c
}

fn queue(agent: &Agent) -> Vec<Action> {
    agent.queue.iter().copied().collect()
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use wh_core::CoreError;
    use wh_grid::GridError;

    #[test]
    fn explicit_placements_get_ids_in_order() {
        let wh = WarehouseBuilder::new(config(4, 4, vec![slot(3, 3, 2)], &["bottle"]), StemClassifier, BfsPathfinder)
            .object_at(Coord::ground(1, 1), "bottle.png")
            .object_at(Coord::ground(2, 2), "bottle.png")
            .agent_at(Coord::ground(0, 0), Heading::East)
            .build()
            .unwrap();
        assert_eq!(wh.grid.get(Coord::ground(1, 1)), Occupant::Object(ObjectId(0)));
        assert_eq!(wh.grid.get(Coord::ground(2, 2)), Occupant::Object(ObjectId(1)));
        assert_eq!(wh.grid.get(Coord::ground(3, 3)), Occupant::Storage(StorageId(0)));
        assert_eq!(wh.grid.get(Coord::ground(0, 0)), Occupant::Agent(AgentId(0)));
        assert_eq!(wh.agents[0].facing, Heading::East);
        assert_eq!(wh.seeded_objects, 2);
        assert_eq!(wh.rngs.len(), 1);
    }

    #[test]
    fn belief_knows_storages_and_objects_but_not_agents() {
        let wh = WarehouseBuilder::new(config(4, 4, vec![slot(3, 3, 1)], &["bottle"]), StemClassifier, BfsPathfinder)
            .object_at(Coord::ground(1, 1), "bottle.png")
            .agent_at(Coord::ground(0, 0), Heading::North)
            .agent_at(Coord::ground(2, 0), Heading::North)
            .build()
            .unwrap();
        for agent in &wh.agents {
            assert_eq!(agent.belief.get(Coord::ground(3, 3)), Occupant::Storage(StorageId(0)));
            assert_eq!(agent.belief.get(Coord::ground(1, 1)), Occupant::Object(ObjectId(0)));
            assert_eq!(agent.belief.get(Coord::ground(0, 0)), Occupant::Free);
            assert_eq!(agent.belief.get(Coord::ground(2, 0)), Occupant::Free);
        }
    }

    #[test]
    fn random_placement_uses_distinct_free_cells() {
        let mut c = config(4, 4, (0..4).map(|x| slot(x, 3, 2)).collect(), &["bottle", "can"]);
        c.object_count = 6;
        c.agent_count = 3;
        let wh = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().unwrap();
        let truth = wh.grid.truth();
        assert_eq!(truth.count_ground(|o| matches!(o, Occupant::Object(_))), 6);
        assert_eq!(truth.count_ground(|o| matches!(o, Occupant::Agent(_))), 3);
        assert_eq!(truth.count_ground(|o| matches!(o, Occupant::Storage(_))), 4);
        for agent in &wh.agents {
            assert_eq!(wh.grid.get(agent.position), Occupant::Agent(agent.id));
        }
    }

    #[test]
    fn random_objects_cycle_through_categories() {
        let mut c = config(5, 5, vec![slot(0, 4, 6)], &["bottle", "can"]);
        c.object_count = 4;
        let wh = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().unwrap();
        let stems: Vec<&str> = wh.grid.objects().map(|o| o.image.stem()).collect();
        assert_eq!(stems, vec!["bottle", "can", "bottle", "can"]);
    }

    #[test]
    fn more_objects_than_capacity_is_rejected() {
        let mut c = config(4, 4, vec![slot(3, 3, 2)], &["bottle"]);
        c.object_count = 3;
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::InsufficientCapacity { requested: 3, capacity: 2 }));
    }

    #[test]
    fn storage_above_the_roof_is_rejected() {
        let c = config(4, 4, vec![StorageSpec::new(Coord::new(1, 1, 1), 1)], &["bottle"]);
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::Grid(GridError::InvalidHeight { z: 1, height: 1 })));
    }

    #[test]
    fn stacked_storages_are_rejected() {
        let c = config(4, 4, vec![slot(1, 1, 1), slot(1, 1, 1)], &["bottle"]);
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::Grid(GridError::OccupiedCell { .. })));
    }

    #[test]
    fn explicit_object_on_storage_is_rejected() {
        let err = WarehouseBuilder::new(config(4, 4, vec![slot(1, 1, 1)], &["bottle"]), StemClassifier, BfsPathfinder)
            .object_at(Coord::ground(1, 1), "bottle.png")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Grid(GridError::OccupiedCell { by: Occupant::Storage(_), .. })));
    }

    #[test]
    fn raised_object_is_rejected() {
        let mut c = config(4, 4, vec![slot(3, 3, 1)], &["bottle"]);
        c.dimensions.height = 2;
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder)
            .object_at(Coord::new(1, 1, 1), "bottle.png")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(msg) if msg.contains("ground floor")));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let c = config(0, 4, vec![], &["bottle"]);
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::Core(CoreError::InvalidDimensions { .. })));
    }

    #[test]
    fn full_floor_has_no_cell_for_agents() {
        let mut c = config(2, 1, vec![slot(0, 0, 5)], &["bottle"]);
        c.object_count = 1;
        c.agent_count = 1;
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::NoFreeCell { what: "agent" }));
    }

    #[test]
    fn categories_are_required() {
        let c = config(3, 3, vec![], &[]);
        let err = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn seeding_emits_attachment_events() {
        let events = RecordingNotifier::new();
        scenario_a(events.clone());
        let names: Vec<&str> = events.events().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["warehouse_attached", "storage_attached", "object_attached", "agent_attached"],
        );
        assert_eq!(events.events()[2].to_line(), "object_attached,O0,bottle,0,1,0");
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_agent_sorts_single_object() {
        let events = RecordingNotifier::new();
        let mut wh = scenario_a(events.clone());

        let sorted_at = wh.run_until_sorted(50, &mut NoopObserver).unwrap();
        // Pickup, five moves and one turn, then the store.
        assert_eq!(sorted_at, Some(Tick(8)));

        let agent = &wh.agents[0];
        assert_eq!(wh.grid.floor_objects(), 0);
        assert_eq!(wh.grid.storage(StorageId(0)).unwrap().len(), 1);
        assert_eq!(agent.stores, 1);
        assert_eq!(agent.moves, 5);
        assert_eq!(agent.position, Coord::ground(2, 3));
        assert_eq!(agent.facing, Heading::East);
        assert_eq!(agent.state, TaskState::Standby);
        assert!(agent.inventory.is_none());
        assert_eq!(agent.history, vec![(Tick(7), 1)]);

        assert_eq!(events.count("pickup"), 1);
        assert_eq!(events.count("forward"), 5);
        assert_eq!(events.count("rotate"), 1);
        assert_eq!(events.count("vision"), 1);
        assert_eq!(events.count("store"), 1);
        assert_eq!(events.count("step_completed"), 8);
    }

    #[test]
    fn raised_storage_is_filled_from_the_cell_below() {
        let mut c = config(4, 4, vec![StorageSpec::new(Coord::new(3, 3, 1), 1)], &["bottle"]);
        c.dimensions.height = 2;
        let mut wh = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder)
            .object_at(Coord::ground(0, 1), "bottle.png")
            .agent_at(Coord::ground(0, 0), Heading::North)
            .build()
            .unwrap();

        assert_eq!(wh.run_until_sorted(50, &mut NoopObserver).unwrap(), Some(Tick(8)));
        let agent = &wh.agents[0];
        assert_eq!(wh.grid.storage(StorageId(0)).unwrap().len(), 1);
        assert_eq!(agent.position, Coord::ground(2, 3));
        assert_eq!(agent.facing, Heading::East);
        assert_eq!(agent.stores, 1);
        assert_eq!(wh.grid.get(Coord::new(3, 3, 1)), Occupant::Storage(StorageId(0)));
    }

    #[test]
    fn carry_plan_after_pickup() {
        let mut wh = scenario_a(RecordingNotifier::new());
        wh.step().unwrap();
        assert_eq!(wh.agents[0].state, TaskState::CarryingObject);
        assert!(wh.agents[0].queue.is_empty());

        wh.step().unwrap();
        use wh_core::Action::{ChangeState, MoveForward as F, Rotate, Store};
        assert_eq!(
            queue(&wh.agents[0]),
            vec![F, F, Rotate(90), F, F, Store(StorageId(0)), ChangeState(TaskState::Standby)],
        );
    }

    #[test]
    fn earlier_agent_wins_contested_object() {
        let mut wh = scenario_b(true);
        wh.run_ticks(2, &mut NoopObserver).unwrap();

        let (first, second) = (&wh.agents[0], &wh.agents[1]);
        assert_eq!(first.inventory.as_ref().map(|o| o.id), Some(ObjectId(0)));
        assert_eq!(first.state, TaskState::CarryingObject);
        assert!(second.inventory.is_none());
        assert_eq!(second.state, TaskState::SeekingObject);

        // Re-seeked to the spare object; the 180° turn ran this tick.
        use wh_core::Action::{ChangeState, MoveForward as F, PickUp, Rotate};
        assert_eq!(
            queue(second),
            vec![F, Rotate(270), F, PickUp(ObjectId(1)), ChangeState(TaskState::CarryingObject)],
        );
    }

    #[test]
    fn losing_agent_idles_when_nothing_is_left() {
        let mut wh = scenario_b(false);
        wh.run_ticks(2, &mut NoopObserver).unwrap();
        let second = &wh.agents[1];
        assert_eq!(second.state, TaskState::Standby);
        assert!(second.queue.is_empty());
        assert_eq!(second.position, Coord::ground(2, 3));

        let sorted_at = wh.run_until_sorted(100, &mut NoopObserver).unwrap();
        assert!(sorted_at.is_some());
        assert_eq!(wh.agents[0].stores, 1);
        assert_eq!(wh.agents[1].stores, 0);
    }
}

// ── Whole runs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn objects_are_conserved_every_tick() {
        for seed in [7, 19, 42] {
            let mut wh = WarehouseBuilder::new(busy(seed), StemClassifier, BfsPathfinder).build().unwrap();
            for _ in 0..300 {
                let summary = wh.step().unwrap();
                assert_eq!(summary.census.total(), 9, "seed {seed} at {}", summary.tick);
                for storage in wh.grid.storages() {
                    assert!(storage.len() <= storage.capacity);
                }
                let positions: std::collections::HashSet<Coord> = wh.agents.iter().map(|a| a.position).collect();
                assert_eq!(positions.len(), wh.agents.len());
            }
        }
    }

    #[test]
    fn default_layout_survives_traffic() {
        for seed in 0..5 {
            let mut c = WarehouseConfig::default();
            c.sim.seed = seed;
            let mut wh = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().unwrap();
            wh.run_ticks(300, &mut NoopObserver).unwrap();
            assert_eq!(wh.census().total(), 9);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let events = RecordingNotifier::new();
            let mut wh = WarehouseBuilder::new(busy(seed), StemClassifier, BfsPathfinder)
                .notifier(events.clone())
                .build()
                .unwrap();
            let outcome = wh.run_ticks(150, &mut NoopObserver).map_err(|e| e.to_string());
            let positions: Vec<(Coord, Heading)> = wh.agents.iter().map(|a| (a.position, a.facing)).collect();
            (outcome, positions, wh.floor_series.clone(), events.events())
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn floor_series_tracks_every_tick() {
        let mut wh = scenario_a(RecordingNotifier::new());
        wh.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(wh.floor_series, vec![(Tick(0), 0), (Tick(1), 0), (Tick(2), 0)]);
        assert_eq!(wh.census().carried, 1);
    }

    #[test]
    fn bounded_run_stops_at_end_tick() {
        let mut c = busy(3);
        c.sim.total_ticks = 20;
        let mut wh = WarehouseBuilder::new(c, StemClassifier, BfsPathfinder).build().unwrap();
        wh.run(&mut NoopObserver).unwrap();
        assert_eq!(wh.clock.current_tick, Tick(20));
        assert_eq!(wh.floor_series.len(), 20);
    }

    #[test]
    fn each_object_is_classified_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let classifier = move |image: &ImageRef| -> Result<Category, ClassifyError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Category(image.stem().to_owned()))
        };
        let mut wh = WarehouseBuilder::new(config(4, 4, vec![slot(3, 3, 1)], &["bottle"]), classifier, BfsPathfinder)
            .object_at(Coord::ground(0, 1), "bottle.png")
            .agent_at(Coord::ground(0, 0), Heading::North)
            .build()
            .unwrap();
        wh.run_until_sorted(50, &mut NoopObserver).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_classifier_aborts_the_tick() {
        let classifier = |_: &ImageRef| -> Result<Category, ClassifyError> {
            Err(ClassifyError::Unavailable("offline".into()))
        };
        let mut wh = WarehouseBuilder::new(config(4, 4, vec![slot(3, 3, 1)], &["bottle"]), classifier, BfsPathfinder)
            .object_at(Coord::ground(0, 1), "bottle.png")
            .agent_at(Coord::ground(0, 0), Heading::North)
            .build()
            .unwrap();
        wh.step().unwrap();
        assert!(matches!(wh.step(), Err(SimError::Task(_))));
    }

    #[test]
    fn agent_stats_report_efficiency() {
        let mut wh = scenario_a(RecordingNotifier::new());
        wh.run_until_sorted(50, &mut NoopObserver).unwrap();
        assert_eq!(
            wh.agent_stats(),
            vec![AgentStats { agent: AgentId(0), moves: 5, stores: 1, moves_per_store: Some(5.0) }],
        );
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        starts:    usize,
        ends:      Vec<TickSummary>,
        snapshots: Vec<Tick>,
        finished:  Option<(Tick, usize)>,
    }

    impl WarehouseObserver for Counting {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.ends.push(*summary);
        }
        fn on_snapshot(&mut self, tick: Tick, agents: &[Agent]) {
            assert_eq!(agents.len(), 1);
            self.snapshots.push(tick);
        }
        fn on_sim_end(&mut self, final_tick: Tick, stats: &[AgentStats]) {
            self.finished = Some((final_tick, stats.len()));
        }
    }

    #[test]
    fn hooks_fire_per_tick_and_interval() {
        let mut wh = scenario_a(RecordingNotifier::new());
        wh.config.output_interval_ticks = 2;
        wh.config.total_ticks = 6;
        let mut obs = Counting::default();
        wh.run(&mut obs).unwrap();

        assert_eq!(obs.starts, 6);
        assert_eq!(obs.ends.len(), 6);
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(2), Tick(4)]);
        assert_eq!(obs.finished, Some((Tick(6), 1)));
        assert_eq!(obs.ends[0].acted, 1);
        assert_eq!(obs.ends[0].census.carried, 1);
    }
}
