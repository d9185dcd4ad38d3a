//! Player input system
//!
//! Translates the frame's boolean intents into state-machine transition
//! requests, honoring movement locks and the two-jump budget.

use crate::ecs::components::{PlayerInputComponent, State, StateComponent, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};

/// System driving entities that carry a [`PlayerInputComponent`]
#[derive(Debug, Default)]
pub struct PlayerInputSystem {
    tracked: Vec<EntityId>,
}

impl PlayerInputSystem {
    /// Create the system with no tracked entities
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_intents(input: &PlayerInputComponent, state: &mut StateComponent) {
        if matches!(
            state.super_state(),
            SuperState::IsDead | SuperState::IsAppearing
        ) {
            return;
        }

        let one_direction = !(input.left && input.right);
        let both_released = !input.left && !input.right;

        if input.left && one_direction {
            if state.can_move_left() {
                state.set_state(State::WalkLeft);
            }
        } else if input.right && one_direction {
            if state.can_move_right() {
                state.set_state(State::WalkRight);
            }
        } else if both_released {
            state.set_state(State::Idle);
        }

        match state.super_state() {
            SuperState::IsOnGround => {
                state.jumps_performed = 0;
                if input.jump && one_direction {
                    state.jumps_performed = 1;
                    state.set_state(State::Jump);
                }
            }
            SuperState::IsFalling => {
                // A wall slide exhausts the jump budget.
                if state.state() == State::Slide {
                    state.jumps_performed = 2;
                }
                if input.jump && one_direction {
                    if state.jumps_performed == 0 {
                        state.set_state(State::Jump);
                        state.jumps_performed = 1;
                    } else if state.jumps_performed == 1 {
                        state.set_state(State::DoubleJump);
                        state.jumps_performed = 2;
                    }
                }
            }
            _ => {}
        }
    }
}

impl System for PlayerInputSystem {
    fn name(&self) -> &'static str {
        "player_input"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.player_input.is_none() {
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
            let (Some(input), Some(state)) =
                (entity.player_input.as_mut(), entity.state.as_mut())
            else {
                continue;
            };

            input.sample(ctx.input);
            Self::apply_intents(input, state);
        }
    }
}
