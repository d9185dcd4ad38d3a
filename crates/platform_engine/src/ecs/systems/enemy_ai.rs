//! Enemy AI system
//!
//! Range-patrol logic: walk until a patrol bound is reached, then request
//! the opposite walk state. Only grounded enemies change intent.

use crate::ecs::components::{State, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};

/// System driving entities that carry a [`PatrolComponent`]
///
/// [`PatrolComponent`]: crate::ecs::components::PatrolComponent
#[derive(Debug, Default)]
pub struct EnemyAiSystem {
    tracked: Vec<EntityId>,
}

impl EnemyAiSystem {
    /// Create the system with no tracked entities
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for EnemyAiSystem {
    fn name(&self) -> &'static str {
        "enemy_ai"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.patrol.is_none() || entity.movement.is_none() {
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
            let (Some(patrol), Some(state), Some(movement)) = (
                entity.patrol.as_mut(),
                entity.state.as_mut(),
                entity.movement.as_ref(),
            ) else {
                continue;
            };

            patrol.update(movement.position.x);

            if state.super_state() != SuperState::IsOnGround {
                continue;
            }

            match state.state() {
                State::Idle => state.set_state(state.default_state()),
                State::WalkLeft if patrol.wants_right() => state.set_state(State::WalkRight),
                State::WalkRight if patrol.wants_left() => state.set_state(State::WalkLeft),
                _ => {}
            }
        }
    }
}
