//! System manager
//!
//! Owns the simulation pipeline as an ordered list of boxed systems and
//! drives Update/Draw over it. The order is fixed: intents first, then
//! integration, then both collision resolvers, then the presentation and
//! lifecycle stages. Collision depends on integrated positions and the
//! lifecycle stages depend on collision verdicts, so the order is part of
//! the simulation's semantics, not an implementation detail.

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{System, SystemId, UpdateContext};
use crate::events::{Message, MessageBus};
use crate::level::LevelData;
use crate::render::DrawSurface;

use super::{
    AnimationSystem, AppearSystem, DeathSystem, EnemyAiSystem, EntityCollisionSystem,
    MovementSystem, ObstacleCollisionSystem, PlayerInputSystem, RespawnSystem,
};

/// Fixed, ordered pipeline of simulation systems for one loaded level
pub struct SystemManager {
    systems: Vec<Box<dyn System>>,
}

impl SystemManager {
    /// Build the pipeline for a level's obstacle set and register every
    /// system's message interests on the bus
    pub fn new(level: &LevelData, bus: &mut MessageBus) -> Self {
        let systems: Vec<Box<dyn System>> = vec![
            Box::new(PlayerInputSystem::new()),
            Box::new(EnemyAiSystem::new()),
            Box::new(MovementSystem::new()),
            Box::new(ObstacleCollisionSystem::new(level)),
            Box::new(EntityCollisionSystem::new()),
            Box::new(AnimationSystem::new()),
            Box::new(AppearSystem::new()),
            Box::new(DeathSystem::new()),
            Box::new(RespawnSystem::new()),
        ];

        let mut manager = Self { systems };
        for (index, system) in manager.systems.iter_mut().enumerate() {
            system.subscribe(bus, SystemId(index));
            log::debug!("system '{}' joined the pipeline as {index}", system.name());
        }
        manager
    }

    /// Offer an entity to every system's opt-in filter
    pub fn add_entity(&mut self, entity: &Entity) {
        for system in &mut self.systems {
            system.add_entity(entity);
        }
    }

    /// Remove an entity from every system
    pub fn remove_entity(&mut self, id: EntityId) {
        for system in &mut self.systems {
            system.remove_entity(id);
        }
    }

    /// Advance every system one frame, in pipeline order
    pub fn update(&mut self, store: &mut EntityStore, ctx: &mut UpdateContext<'_>) {
        for system in &mut self.systems {
            system.update(store, ctx);
        }
    }

    /// Submit draw commands from every system, in pipeline order
    pub fn draw(&self, store: &EntityStore, surface: &mut dyn DrawSurface) {
        for system in &self.systems {
            system.draw(store, surface);
        }
    }

    /// Deliver a drained message to the systems subscribed for its kind
    pub fn dispatch(&mut self, store: &mut EntityStore, bus: &MessageBus, message: &Message) {
        for SystemId(index) in bus.subscribers_of(message.kind()) {
            if let Some(system) = self.systems.get_mut(index) {
                system.on_message(store, message);
            }
        }
    }

    /// Drop every system's bus registrations; called before the pipeline
    /// is rebuilt for another level
    pub fn teardown(&mut self, bus: &mut MessageBus) {
        for system in &mut self.systems {
            system.unsubscribe(bus);
        }
    }
}

impl std::fmt::Debug for SystemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.systems.iter().map(|system| system.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_fixed() {
        let mut bus = MessageBus::new();
        let manager = SystemManager::new(&LevelData::default(), &mut bus);

        let names: Vec<&str> = manager.systems.iter().map(|system| system.name()).collect();
        assert_eq!(
            names,
            vec![
                "player_input",
                "enemy_ai",
                "movement",
                "obstacle_collision",
                "entity_collision",
                "animation",
                "appear",
                "death",
                "respawn",
            ]
        );
    }

    #[test]
    fn teardown_clears_subscriptions() {
        let mut bus = MessageBus::new();
        let mut manager = SystemManager::new(&LevelData::default(), &mut bus);
        assert!(bus.subscription_count() > 0);

        manager.teardown(&mut bus);
        assert_eq!(bus.subscription_count(), 0);
    }
}
