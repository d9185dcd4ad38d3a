//! Animation system
//!
//! Keeps each entity's playing clip in sync with the animation id derived
//! by its state component, advances playback, and draws the current frame
//! through the render boundary.

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};
use crate::render::DrawSurface;

/// System driving clip selection, playback and drawing
#[derive(Debug, Default)]
pub struct AnimationSystem {
    tracked: Vec<EntityId>,
}

impl AnimationSystem {
    /// Create an empty system; entities opt in through [`System::add_entity`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for AnimationSystem {
    fn name(&self) -> &'static str {
        "animation"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.animation.is_none() || entity.movement.is_none() {
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
            if !entity.is_active {
                continue;
            }
            let (Some(state), Some(animation)) = (entity.state.as_ref(), entity.animation.as_mut())
            else {
                continue;
            };

            animation.set_current(state.animation_id());
            if let Some(clip) = animation.current_clip_mut() {
                clip.advance(ctx.dt);
            }
        }
    }

    fn draw(&self, store: &EntityStore, surface: &mut dyn DrawSurface) {
        for &id in &self.tracked {
            let Some(entity) = store.get(id) else {
                continue;
            };
            if !entity.is_active {
                continue;
            }
            let (Some(state), Some(animation), Some(movement)) = (
                entity.state.as_ref(),
                entity.animation.as_ref(),
                entity.movement.as_ref(),
            ) else {
                continue;
            };
            let Some(clip) = animation.current_clip() else {
                continue;
            };

            let (row, column) = clip.cell();
            surface.draw_frame(
                &clip.sheet,
                row,
                column,
                movement.position,
                state.horizontal_direction < 0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::{
        AnimationClip, AnimationComponent, AnimationId, MovementComponent, State, StateComponent,
        SuperState,
    };
    use crate::events::MessageBus;
    use crate::foundation::math::Vec2;
    use crate::input::InputIntents;

    fn entity() -> Entity {
        let mut state = StateComponent::new(State::Idle, SuperState::IsFalling);
        state.set_super_state(SuperState::IsOnGround);
        Entity::new()
            .with_component(state.into())
            .with_component(MovementComponent::new(Vec2::new(0.0, 0.0)).into())
            .with_component(
                AnimationComponent::new()
                    .with_clip(AnimationId::Idle, AnimationClip::new("idle", 1, 4, 10.0))
                    .with_clip(
                        AnimationId::Walking,
                        AnimationClip::new("walking", 1, 6, 10.0),
                    )
                    .into(),
            )
    }

    #[test]
    fn clip_follows_state_and_advances() {
        let mut store = EntityStore::new();
        let mut system = AnimationSystem::new();
        let id = store.insert(entity());
        system.add_entity(store.get(id).unwrap());

        let mut bus = MessageBus::new();
        let config = SimConfig::default();
        let intents = InputIntents::none();

        store
            .get_mut(id)
            .unwrap()
            .state
            .as_mut()
            .unwrap()
            .set_state(State::WalkRight);

        let mut ctx = UpdateContext {
            dt: 0.25,
            input: intents,
            bus: &mut bus,
            config: &config,
        };
        system.update(&mut store, &mut ctx);

        let animation = store.get(id).unwrap().animation.as_ref().unwrap();
        assert_eq!(animation.current_id(), AnimationId::Walking);
        // 0.25 s at 10 fps lands on frame 2.
        assert_eq!(animation.current_clip().unwrap().frame(), 2);
    }
}
