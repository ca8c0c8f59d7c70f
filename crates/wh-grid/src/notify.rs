//! World-change notifications for an external visualization client.
//!
//! Delivery is fire-and-forget: a [`Notifier`] cannot fail or push back, and
//! dropping every event leaves the simulation unchanged.

use std::sync::{Arc, Mutex};

use tracing::debug;

use wh_core::{AgentId, Coord, Dims, ObjectId, StorageId, Tick};

/// A single change to the world, with its fields in wire order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum WorldEvent {
    WarehouseAttached { dims: Dims },
    StorageAttached   { storage: StorageId, at: Coord },
    ObjectAttached    { object: ObjectId, label: String, at: Coord },
    AgentAttached     { agent: AgentId, at: Coord },
    Forward           { agent: AgentId },
    Rotate            { agent: AgentId, degrees: i32 },
    Pickup            { agent: AgentId, object: ObjectId, label: String },
    Store             { agent: AgentId, object: ObjectId, storage: StorageId },
    Vision            { agent: AgentId, category: String },
    StepCompleted     { tick: Tick },
}

impl WorldEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorldEvent::WarehouseAttached { .. } => "warehouse_attached",
            WorldEvent::StorageAttached { .. }   => "storage_attached",
            WorldEvent::ObjectAttached { .. }    => "object_attached",
            WorldEvent::AgentAttached { .. }     => "agent_attached",
            WorldEvent::Forward { .. }           => "forward",
            WorldEvent::Rotate { .. }            => "rotate",
            WorldEvent::Pickup { .. }            => "pickup",
            WorldEvent::Store { .. }             => "store",
            WorldEvent::Vision { .. }            => "vision",
            WorldEvent::StepCompleted { .. }     => "step_completed",
        }
    }

    pub fn fields(&self) -> Vec<String> {
        fn xyz(at: &Coord) -> [String; 3] {
            [at.x.to_string(), at.y.to_string(), at.z.to_string()]
        }

        let mut out = Vec::new();
        match self {
            WorldEvent::WarehouseAttached { dims } => out.extend([
                dims.width.to_string(),
                dims.depth.to_string(),
                dims.height.to_string(),
            ]),
            WorldEvent::StorageAttached { storage, at } => {
                out.push(storage.to_string());
                out.extend(xyz(at));
            }
            WorldEvent::ObjectAttached { object, label, at } => {
                out.push(object.to_string());
                out.push(label.clone());
                out.extend(xyz(at));
            }
            WorldEvent::AgentAttached { agent, at } => {
                out.push(agent.to_string());
                out.extend(xyz(at));
            }
            WorldEvent::Forward { agent } => out.push(agent.to_string()),
            WorldEvent::Rotate { agent, degrees } => {
                out.extend([agent.to_string(), degrees.to_string()]);
            }
            WorldEvent::Pickup { agent, object, label } => {
                out.extend([agent.to_string(), object.to_string(), label.clone()]);
            }
            WorldEvent::Store { agent, object, storage } => {
                out.extend([agent.to_string(), object.to_string(), storage.to_string()]);
            }
            WorldEvent::Vision { agent, category } => {
                out.extend([agent.to_string(), category.clone()]);
            }
            WorldEvent::StepCompleted { tick } => out.push(tick.0.to_string()),
        }
        out
    }

    /// `name,field,field,…`
    pub fn to_line(&self) -> String {
        let mut line = self.name().to_owned();
        for field in self.fields() {
            line.push(',');
            line.push_str(&field);
        }
        line
    }
}

// ── Notifier ──────────────────────────────────────────────────────────────────

/// Output sink for [`WorldEvent`]s.
pub trait Notifier {
    fn notify(&mut self, event: &WorldEvent);
}

/// Discards every event.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _event: &WorldEvent) {}
}

/// Forwards events to `tracing` at debug level under the `wh::events` target.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, event: &WorldEvent) {
        debug!(target: "wh::events", event = event.name(), fields = %event.fields().join(","));
    }
}

/// Keeps every event in a shared buffer.  Clones share the buffer, so a test
/// can hand one clone to the simulation and inspect the other.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<WorldEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<WorldEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of recorded events called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, event: &WorldEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
