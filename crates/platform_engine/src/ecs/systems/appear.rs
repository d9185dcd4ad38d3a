//! Appear system
//!
//! Entities materialize in `IsAppearing` with physics and collision
//! suspended; once the appear clip reaches its final frame the entity
//! drops into its default physics phase and the simulation takes over.

use crate::ecs::components::{AnimationClip, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};

/// System finishing entity materialization
#[derive(Debug, Default)]
pub struct AppearSystem {
    tracked: Vec<EntityId>,
}

impl AppearSystem {
    /// Create an empty system; entities opt in through [`System::add_entity`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for AppearSystem {
    fn name(&self) -> &'static str {
        "appear"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.animation.is_none() {
            return;
        }
        self.tracked.push(entity.id());
    }

    fn remove_entity(&mut self, id: EntityId) {
        untrack(&mut self.tracked, id);
    }

    fn update(&mut self, store: &mut EntityStore, _ctx: &mut UpdateContext<'_>) {
        for &id in &self.tracked {
            let Some(entity) = store.get_mut(id) else {
                continue;
            };
            if !entity.is_active {
                continue;
            }
            let (Some(state), Some(animation)) = (entity.state.as_mut(), entity.animation.as_ref())
            else {
                continue;
            };
            if state.super_state() != SuperState::IsAppearing {
                continue;
            }

            let finished = animation
                .current_clip()
                .is_none_or(AnimationClip::is_finished);
            if finished {
                state.set_super_state(state.default_super_state());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::{
        AnimationClip, AnimationComponent, AnimationId, State, StateComponent,
    };
    use crate::events::MessageBus;
    use crate::input::InputIntents;

    #[test]
    fn drops_into_default_phase_when_clip_finishes() {
        let mut store = EntityStore::new();
        let mut system = AppearSystem::new();

        let entity = Entity::new()
            .with_component(StateComponent::new(State::Idle, SuperState::IsFalling).into())
            .with_component(
                AnimationComponent::new()
                    .with_clip(AnimationId::Appear, AnimationClip::new("appear", 1, 2, 10.0))
                    .into(),
            );
        let id = store.insert(entity);
        system.add_entity(store.get(id).unwrap());

        let mut bus = MessageBus::new();
        let config = SimConfig::default();
        let mut ctx = UpdateContext {
            dt: 0.0,
            input: InputIntents::none(),
            bus: &mut bus,
            config: &config,
        };

        // Clip still on frame 0 of 2: nothing happens.
        system.update(&mut store, &mut ctx);
        assert_eq!(
            store.get(id).unwrap().state.as_ref().unwrap().super_state(),
            SuperState::IsAppearing
        );

        store
            .get_mut(id)
            .unwrap()
            .animation
            .as_mut()
            .unwrap()
            .current_clip_mut()
            .unwrap()
            .advance(0.1);
        system.update(&mut store, &mut ctx);
        assert_eq!(
            store.get(id).unwrap().state.as_ref().unwrap().super_state(),
            SuperState::IsFalling
        );
    }
}
