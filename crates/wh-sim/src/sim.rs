//! The `Warehouse` struct and its tick loop.

use tracing::{debug, info};

use wh_core::{AgentId, AgentRng, SimClock, SimConfig, TaskState, Tick};
use wh_grid::{Grid, Notifier, Object, WorldEvent};
use wh_nav::Pathfinder;
use wh_task::{Agent, Category, ClassifierCache, Classifier, PlanContext, decide, execute};

use crate::{AgentStats, Census, SimResult, TickSummary, WarehouseObserver};

/// The simulation runner.
///
/// Owns the single ground-truth [`Grid`] and the agent registry, and drives
/// the perceive → decide → execute loop described in the crate docs.
///
/// Create via [`WarehouseBuilder`][crate::WarehouseBuilder].
pub struct Warehouse<C: Classifier, P: Pathfinder> {
    /// Global configuration (total ticks, seed, snapshot interval).
    pub config: SimConfig,

    pub clock: SimClock,

    /// The canonical world map.  Agents never hold references into it.
    pub grid: Grid,

    /// Agents in registration order, which is also their per-tick order.
    pub agents: Vec<Agent>,

    /// Per-agent deterministic RNGs, parallel to `agents` for split borrows.
    pub rngs: Vec<AgentRng>,

    /// Category labels in partition order.
    pub categories: Vec<Category>,

    pub classifier: C,

    pub pathfinder: P,

    /// Classification results, one per object.
    pub cache: ClassifierCache,

    /// Sink for world events.  Never affects the simulation.
    pub notifier: Box<dyn Notifier>,

    /// Object count fixed at the end of seeding.
    pub seeded_objects: usize,

    /// Floor-object count after each completed tick.
    pub floor_series: Vec<(Tick, usize)>,
}

impl<C: Classifier, P: Pathfinder> Warehouse<C, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: WarehouseObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(from = %self.clock.current_tick, to = %self.config.end_tick(), "run started");
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_step(observer)?;
        }
        self.finish(observer);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position, ignoring `end_tick`.
    pub fn run_ticks<O: WarehouseObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_step(observer)?;
        }
        Ok(())
    }

    /// Run until every object is in a storage or `max_ticks` ticks have
    /// passed.  Returns the clock tick at which the floor and every
    /// inventory were first seen empty, or `None` if the limit came first.
    pub fn run_until_sorted<O: WarehouseObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<Option<Tick>> {
        for _ in 0..max_ticks {
            if self.is_sorted() {
                break;
            }
            self.observed_step(observer)?;
        }
        self.finish(observer);
        Ok(self.is_sorted().then_some(self.clock.current_tick))
    }

    /// Advance one tick with no observer.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        let summary = self.process_tick(now)?;
        self.clock.advance();
        Ok(summary)
    }

    pub fn census(&self) -> Census {
        Census {
            floor:   self.grid.floor_objects(),
            carried: self.agents.iter().filter(|a| a.inventory.is_some()).count(),
            stored:  self.grid.stored_objects(),
        }
    }

    /// No objects on the floor and none being carried.
    pub fn is_sorted(&self) -> bool {
        self.census().is_sorted()
    }

    pub fn agent_stats(&self) -> Vec<AgentStats> {
        self.agents
            .iter()
            .map(|a| AgentStats {
                agent:           a.id,
                moves:           a.moves,
                stores:          a.stores,
                moves_per_store: a.moves_per_store(),
            })
            .collect()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn observed_step<O: WarehouseObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.agents);
        }
        self.clock.advance();
        Ok(summary)
    }

    fn finish<O: WarehouseObserver>(&mut self, observer: &mut O) {
        let census = self.census();
        info!(
            tick    = %self.clock.current_tick,
            floor   = census.floor,
            carried = census.carried,
            stored  = census.stored,
            "run finished"
        );
        observer.on_sim_end(self.clock.current_tick, &self.agent_stats());
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        self.prefetch_classifications()?;

        let mut acted = 0;
        for i in 0..self.agents.len() {
            let agent = &mut self.agents[i];

            // ① Perceive
            let sensed = self.grid.surroundings(agent.position);
            agent.belief.perceive(agent.position, &sensed)?;

            // ② Decide
            let decision = {
                let mut ctx = PlanContext {
                    grid:       &self.grid,
                    pathfinder: &self.pathfinder,
                    classifier: &self.classifier,
                    cache:      &mut self.cache,
                    categories: &self.categories,
                    notifier:   self.notifier.as_mut(),
                };
                decide(agent, &mut ctx, &mut self.rngs[i])?
            };
            agent.apply(decision);

            // ③ Execute
            if execute(agent, &mut self.grid, now, self.notifier.as_mut())?.is_some() {
                acted += 1;
            }
        }

        // ④ Record
        self.notifier.notify(&WorldEvent::StepCompleted { tick: now });
        let census = self.census();
        debug_assert_eq!(census.total(), self.seeded_objects, "object count drifted");
        self.floor_series.push((now, census.floor));
        debug!(tick = %now, floor = census.floor, carried = census.carried, stored = census.stored, "tick complete");

        Ok(TickSummary { tick: now, census, acted })
    }

    /// Classify, as one batch, the inventory of every agent whose next
    /// planning pass builds a carry plan, so that pass hits the cache.
    fn prefetch_classifications(&mut self) -> SimResult<()> {
        let pending: Vec<(AgentId, &Object)> = self
            .agents
            .iter()
            .filter(|a| a.state == TaskState::CarryingObject && a.next_action().is_none())
            .filter_map(|a| a.inventory.as_ref().map(|o| (a.id, o)))
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let objects: Vec<&Object> = pending.iter().map(|(_, o)| *o).collect();
        let fresh = self.cache.prefetch(&self.classifier, &objects)?;
        for (object, category) in fresh {
            if let Some((agent, _)) = pending.iter().find(|(_, o)| o.id == object) {
                self.notifier.notify(&WorldEvent::Vision {
                    agent:    *agent,
                    category: category.to_string(),
                });
            }
        }
        Ok(())
    }
}
