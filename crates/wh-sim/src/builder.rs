//! Fluent builder that seeds a warehouse and returns a ready [`Warehouse`].

use tracing::info;

use wh_core::{AgentId, AgentRng, Coord, Dims, Heading, ObjectId, SimClock, SimRng, StorageId};
use wh_grid::{Grid, ImageRef, NoopNotifier, Notifier, Object, Storage, WorldEvent};
use wh_nav::Pathfinder;
use wh_task::{Agent, Category, ClassifierCache, Classifier};

use crate::{SimError, SimResult, Warehouse, WarehouseConfig};

/// Fluent builder for [`Warehouse<C, P>`].
///
/// # Required inputs
///
/// - [`WarehouseConfig`]: dimensions, storages, categories, counts, seed
/// - `C: Classifier`: e.g. [`wh_task::StemClassifier`]
/// - `P: Pathfinder`: e.g. [`wh_nav::BfsPathfinder`]
///
/// # Optional inputs
///
/// | Method                   | Default                               |
/// |--------------------------|---------------------------------------|
/// | `.notifier(n)`           | `NoopNotifier`                        |
/// | `.object_at(at, image)`  | none; all objects placed at random    |
/// | `.agent_at(at, facing)`  | none; all agents placed at random     |
///
/// # Seeding order
///
/// Storages, then objects (explicit first), then agents (explicit first).
/// Ids are assigned from zero in that order.  Every agent's belief map is
/// cloned after all storages and objects exist.
pub struct WarehouseBuilder<C: Classifier, P: Pathfinder> {
    config:     WarehouseConfig,
    classifier: C,
    pathfinder: P,
    notifier:   Option<Box<dyn Notifier>>,
    objects:    Vec<(Coord, ImageRef)>,
    agents:     Vec<(Coord, Heading)>,
}

impl<C: Classifier, P: Pathfinder> WarehouseBuilder<C, P> {
    pub fn new(config: WarehouseConfig, classifier: C, pathfinder: P) -> Self {
        Self {
            config,
            classifier,
            pathfinder,
            notifier: None,
            objects:  Vec::new(),
            agents:   Vec::new(),
        }
    }

    /// Send world events to `notifier`.
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Seed an object at a fixed cell.
    pub fn object_at(mut self, at: Coord, image: impl Into<String>) -> Self {
        self.objects.push((at, ImageRef::new(image)));
        self
    }

    /// Seed an agent at a fixed ground cell.
    pub fn agent_at(mut self, at: Coord, facing: Heading) -> Self {
        self.agents.push((at, facing));
        self
    }

    /// Validate the configuration, seed the grid and return the warehouse.
    pub fn build(self) -> SimResult<Warehouse<C, P>> {
        let config = self.config;
        let mut notifier = self.notifier.unwrap_or_else(|| Box::new(NoopNotifier));
        let mut rng = SimRng::new(config.sim.seed);

        // ── Validate ──────────────────────────────────────────────────────
        let d = config.dimensions;
        let dims = Dims::new(d.width, d.depth, d.height)?;
        if config.categories.is_empty() {
            return Err(SimError::Config("at least one category is required".into()));
        }
        let categories: Vec<Category> =
            config.categories.iter().map(|c| Category::from(c.as_str())).collect();

        let mut grid = Grid::new(dims);
        notifier.notify(&WorldEvent::WarehouseAttached { dims });

        // ── Storages ──────────────────────────────────────────────────────
        for (i, spec) in config.storages.iter().enumerate() {
            let id = StorageId::try_from(i)?;
            grid.attach_storage(Storage::new(id, spec.location, spec.capacity))?;
            notifier.notify(&WorldEvent::StorageAttached { storage: id, at: spec.location });
        }

        let object_total = config.object_count.max(self.objects.len());
        if object_total > grid.capacity() {
            return Err(SimError::InsufficientCapacity {
                requested: object_total,
                capacity:  grid.capacity(),
            });
        }

        // ── Objects ───────────────────────────────────────────────────────
        let random_objects = (self.objects.len()..object_total).map(|i| {
            let label = &config.categories[i % config.categories.len()];
            (None, ImageRef::new(format!("{label}.png")))
        });
        let objects = self
            .objects
            .into_iter()
            .map(|(at, image)| (Some(at), image))
            .chain(random_objects);

        for (i, (at, image)) in objects.enumerate() {
            let id = ObjectId::try_from(i)?;
            let at = match at {
                Some(at) => at,
                None => random_free_cell(&grid, &mut rng, "object")?,
            };
            if at.z != 0 {
                return Err(SimError::Config(format!("object {id} must lie on the ground floor, not at {at}")));
            }
            let label = image.stem().to_owned();
            grid.seed_object(Object::new(id, at, image))?;
            notifier.notify(&WorldEvent::ObjectAttached { object: id, label, at });
        }

        // ── Agents ────────────────────────────────────────────────────────
        let agent_total = config.agent_count.max(self.agents.len());
        let mut agents = Vec::with_capacity(agent_total);
        let mut rngs = Vec::with_capacity(agent_total);
        for i in 0..agent_total {
            let id = AgentId::try_from(i)?;
            let (at, facing) = match self.agents.get(i) {
                Some(&(at, facing)) => (at, facing),
                None => {
                    let at = random_free_cell(&grid, &mut rng, "agent")?;
                    let facing = Heading::ALL[rng.gen_range(0..Heading::ALL.len())];
                    (at, facing)
                }
            };
            if at.z != 0 {
                return Err(SimError::Config(format!("agent {id} must start on the ground floor, not at {at}")));
            }
            grid.place_agent(id, at)?;
            agents.push(Agent::new(id, at, facing, grid.belief_snapshot()));
            rngs.push(AgentRng::new(config.sim.seed, id));
            notifier.notify(&WorldEvent::AgentAttached { agent: id, at });
        }

        info!(
            %dims,
            storages = grid.storages().len(),
            capacity = grid.capacity(),
            objects  = object_total,
            agents   = agent_total,
            "warehouse seeded"
        );

        Ok(Warehouse {
            clock:          SimClock::new(),
            config:         config.sim,
            grid,
            agents,
            rngs,
            categories,
            classifier:     self.classifier,
            pathfinder:     self.pathfinder,
            cache:          ClassifierCache::new(),
            notifier,
            seeded_objects: object_total,
            floor_series:   Vec::new(),
        })
    }
}

/// A uniformly chosen free ground cell.
fn random_free_cell(grid: &Grid, rng: &mut SimRng, what: &'static str) -> SimResult<Coord> {
    rng.choose(&grid.free_ground_cells())
        .copied()
        .ok_or(SimError::NoFreeCell { what })
}
