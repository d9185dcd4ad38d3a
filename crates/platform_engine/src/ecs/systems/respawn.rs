//! Respawn system
//!
//! Ticks the respawn timer of pooled (inactive) entities and brings them
//! back at their spawn position once it elapses, re-entering through the
//! appear phase like a freshly created entity.

use crate::ecs::components::SuperState;
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};
use crate::events::Message;

/// System reviving pooled entities after their respawn delay
#[derive(Debug, Default)]
pub struct RespawnSystem {
    tracked: Vec<EntityId>,
}

impl RespawnSystem {
    /// Create an empty system; entities opt in through [`System::add_entity`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for RespawnSystem {
    fn name(&self) -> &'static str {
        "respawn"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.respawn.is_none() || entity.state.is_none() || entity.movement.is_none() {
            return;
        }
        self.tracked.push(entity.id());
    }

    fn remove_entity(&mut self, id: EntityId) {
        untrack(&mut self.tracked, id);
    }

    fn update(&mut self, store: &mut EntityStore, ctx: &mut UpdateContext<'_>) {
        for &id in &self.tracked {
            let Some(entity) = store.get_mut(id) else {
                continue;
            };
            let (Some(respawn), Some(state), Some(movement)) = (
                entity.respawn.as_mut(),
                entity.state.as_mut(),
                entity.movement.as_mut(),
            ) else {
                continue;
            };
            if !respawn.is_respawning() {
                continue;
            }

            respawn.tick(ctx.dt);
            if respawn.is_respawning() {
                continue;
            }

            entity.is_active = true;
            movement.warp_to(respawn.position);
            state.set_state(state.default_state());
            state.set_super_state(SuperState::IsAppearing);
            state.jumps_performed = 0;
            state.horizontal_direction = state.default_horizontal_direction();
            if let Some(collision_box) = entity.collision_box.as_mut() {
                collision_box.update_position(
                    respawn.position.x,
                    respawn.position.y,
                    state.horizontal_direction,
                );
            }

            log::debug!("entity {id:?} reappears at {:?}", respawn.position);
            ctx.bus.publish(Message::EntityReAppears(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::{MovementComponent, RespawnComponent, State, StateComponent};
    use crate::events::MessageBus;
    use crate::foundation::math::Vec2;
    use crate::input::InputIntents;

    #[test]
    fn pooled_entity_reappears_after_its_delay() {
        let mut store = EntityStore::new();
        let mut system = RespawnSystem::new();

        let spawn = Vec2::new(32.0, 64.0);
        let mut respawn = RespawnComponent::new(spawn, 1.0);
        respawn.start();
        let mut entity = Entity::new()
            .with_component(StateComponent::new(State::Idle, SuperState::IsFalling).into())
            .with_component(MovementComponent::new(Vec2::new(500.0, 500.0)).into())
            .with_component(respawn.into());
        entity.is_active = false;
        let id = store.insert(entity);
        system.add_entity(store.get(id).unwrap());

        let mut bus = MessageBus::new();
        let config = SimConfig::default();
        let mut ctx = UpdateContext {
            dt: 0.6,
            input: InputIntents::none(),
            bus: &mut bus,
            config: &config,
        };

        system.update(&mut store, &mut ctx);
        assert!(!store.get(id).unwrap().is_active);

        system.update(&mut store, &mut ctx);
        let entity = store.get(id).unwrap();
        assert!(entity.is_active);
        assert_eq!(entity.movement.as_ref().unwrap().position, spawn);
        assert_eq!(
            entity.state.as_ref().unwrap().super_state(),
            SuperState::IsAppearing
        );
        assert_eq!(bus.take_queue().pop_front(), Some(Message::EntityReAppears(id)));
    }
}
