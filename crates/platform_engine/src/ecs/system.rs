//! System trait
//!
//! A system opts in to the entities carrying the components it needs and
//! is driven by the scheduler every frame, strictly single-threaded and
//! in a fixed order.

use crate::config::SimConfig;
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::events::{Message, MessageBus};
use crate::input::InputIntents;
use crate::render::DrawSurface;

/// Position of a system in the scheduler's fixed order; doubles as the
/// subscriber identity on the message bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(pub usize);

/// Everything a system may touch during one `update` call besides the
/// entity store: the frame step, the frame's input intents, the message
/// bus and the tuning constants.
///
/// Passing this explicitly (instead of globals) keeps simulations
/// independent and deterministic under test.
pub struct UpdateContext<'a> {
    /// Elapsed time for this frame, in seconds
    pub dt: f32,
    /// Boolean input intents for this frame
    pub input: InputIntents,
    /// The simulation's message bus
    pub bus: &'a mut MessageBus,
    /// Tuning constants
    pub config: &'a SimConfig,
}

/// A per-frame simulation stage
pub trait System {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Offer an entity to this system. Systems silently ignore entities
    /// lacking their required components.
    fn add_entity(&mut self, entity: &Entity);

    /// Stop tracking an entity; unknown ids are a no-op
    fn remove_entity(&mut self, id: EntityId);

    /// Register message-bus interests; called when the system joins the
    /// active pipeline
    fn subscribe(&mut self, _bus: &mut MessageBus, _id: SystemId) {}

    /// Drop message-bus registrations; called when the pipeline is torn
    /// down
    fn unsubscribe(&mut self, _bus: &mut MessageBus) {}

    /// Advance one frame
    fn update(&mut self, store: &mut EntityStore, ctx: &mut UpdateContext<'_>);

    /// Submit draw commands for the current frame
    fn draw(&self, _store: &EntityStore, _surface: &mut dyn DrawSurface) {}

    /// Receive a message this system subscribed to. Delivered during the
    /// end-of-frame drain, never while systems are updating.
    fn on_message(&mut self, _store: &mut EntityStore, _message: &Message) {}
}

/// Remove `id` from a tracked-entity list; shared by most systems
pub(crate) fn untrack(tracked: &mut Vec<EntityId>, id: EntityId) {
    tracked.retain(|tracked_id| *tracked_id != id);
}
