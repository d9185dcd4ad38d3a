//! Death system
//!
//! Listens for `EntityDied` and drives what happens after the death clip
//! has played out: the player's death reloads the level, a respawnable
//! entity is pooled inactive until its timer fires, and everything else
//! is destroyed outright.

use crate::ecs::components::{EntityType, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{System, SystemId, UpdateContext};
use crate::events::{Message, MessageBus, MessageKind, SubscriptionToken};

/// System settling the fate of entities whose death was announced
#[derive(Debug, Default)]
pub struct DeathSystem {
    dying: Vec<EntityId>,
    subscription: Option<SubscriptionToken>,
}

impl DeathSystem {
    /// Create an empty system; deaths arrive over the bus
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for DeathSystem {
    fn name(&self) -> &'static str {
        "death"
    }

    fn add_entity(&mut self, _entity: &Entity) {}

    fn remove_entity(&mut self, id: EntityId) {
        self.dying.retain(|dying_id| *dying_id != id);
    }

    fn subscribe(&mut self, bus: &mut MessageBus, id: SystemId) {
        self.subscription = Some(bus.subscribe(id, MessageKind::EntityDied));
    }

    fn unsubscribe(&mut self, bus: &mut MessageBus) {
        if let Some(token) = self.subscription.take() {
            bus.unsubscribe(token);
        }
    }

    fn update(&mut self, store: &mut EntityStore, ctx: &mut UpdateContext<'_>) {
        let mut index = 0;
        while index < self.dying.len() {
            let id = self.dying[index];
            let Some(entity) = store.get_mut(id) else {
                self.dying.swap_remove(index);
                continue;
            };

            // The corpse lingers until its death clip has played out.
            let clip_finished = entity
                .animation
                .as_ref()
                .and_then(|animation| animation.current_clip())
                .is_none_or(|clip| clip.is_finished());
            if !clip_finished {
                index += 1;
                continue;
            }
            self.dying.swap_remove(index);

            let kind = entity.entity_type.as_ref().map(|entity_type| entity_type.kind());
            if kind == Some(EntityType::Player) {
                ctx.bus.publish(Message::DestroyEntity(id));
                ctx.bus.publish(Message::ReloadLevel);
            } else if let Some(respawn) = entity.respawn.as_mut() {
                // Pool the entity instead of destroying it.
                entity.is_active = false;
                respawn.start();
            } else {
                ctx.bus.publish(Message::DestroyEntity(id));
            }
        }
    }

    fn on_message(&mut self, store: &mut EntityStore, message: &Message) {
        let Message::EntityDied(id) = message else {
            return;
        };
        if self.dying.contains(id) {
            return;
        }
        // Collision systems normally flip the state themselves, but a
        // death announced by anything else still has to land in IsDead so
        // the death clip plays.
        if let Some(state) = store.get_mut(*id).and_then(|entity| entity.state.as_mut()) {
            if state.super_state() != SuperState::IsDead {
                state.set_super_state(SuperState::IsDead);
            }
        }
        self.dying.push(*id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::{
        AnimationClip, AnimationComponent, AnimationId, EntityTypeComponent, RespawnComponent,
        State, StateComponent,
    };
    use crate::foundation::math::Vec2;
    use crate::input::InputIntents;

    fn dead_entity(kind: EntityType, respawnable: bool) -> Entity {
        let mut state = StateComponent::new(State::Idle, SuperState::IsOnGround);
        state.set_super_state(SuperState::IsDead);
        let mut entity = Entity::new()
            .with_component(state.into())
            .with_component(EntityTypeComponent::new(kind).into())
            .with_component(
                AnimationComponent::new()
                    .with_clip(AnimationId::Death, AnimationClip::new("death", 1, 1, 10.0))
                    .into(),
            );
        if respawnable {
            entity.add_component(RespawnComponent::new(Vec2::zeros(), 1.0).into());
        }
        entity
    }

    fn run_frame(system: &mut DeathSystem, store: &mut EntityStore, bus: &mut MessageBus) {
        let config = SimConfig::default();
        let mut ctx = UpdateContext {
            dt: 1.0 / 60.0,
            input: InputIntents::none(),
            bus,
            config: &config,
        };
        system.update(store, &mut ctx);
    }

    #[test]
    fn player_death_reloads_the_level() {
        let mut store = EntityStore::new();
        let mut system = DeathSystem::new();
        let mut bus = MessageBus::new();
        let id = store.insert(dead_entity(EntityType::Player, false));

        system.on_message(&mut store, &Message::EntityDied(id));
        run_frame(&mut system, &mut store, &mut bus);

        let queued: Vec<Message> = bus.take_queue().into_iter().collect();
        assert_eq!(
            queued,
            vec![Message::DestroyEntity(id), Message::ReloadLevel]
        );
    }

    #[test]
    fn respawnable_entity_is_pooled_not_destroyed() {
        let mut store = EntityStore::new();
        let mut system = DeathSystem::new();
        let mut bus = MessageBus::new();
        let id = store.insert(dead_entity(EntityType::RegularEnemy, true));

        system.on_message(&mut store, &Message::EntityDied(id));
        run_frame(&mut system, &mut store, &mut bus);

        assert!(bus.take_queue().is_empty());
        let entity = store.get(id).unwrap();
        assert!(!entity.is_active);
        assert!(entity.respawn.as_ref().unwrap().is_respawning());
    }

    #[test]
    fn duplicate_death_reports_are_ignored() {
        let mut store = EntityStore::new();
        let mut system = DeathSystem::new();
        let mut bus = MessageBus::new();
        let id = store.insert(dead_entity(EntityType::Coin, false));

        system.on_message(&mut store, &Message::EntityDied(id));
        system.on_message(&mut store, &Message::EntityDied(id));
        run_frame(&mut system, &mut store, &mut bus);

        let queued: Vec<Message> = bus.take_queue().into_iter().collect();
        assert_eq!(queued, vec![Message::DestroyEntity(id)]);
    }
}
