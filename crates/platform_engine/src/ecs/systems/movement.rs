//! Movement system
//!
//! Integrates acceleration into velocity into position once per frame.
//! The vertical axis is driven by the physics phase (gravity, jump
//! impulses), the horizontal axis by the interactive state (walk speed
//! injection), which keeps jump arcs and walk speed independently
//! tunable. Level borders are not checked here; border obstacles are part
//! of the level geometry and handled by obstacle collision.

use crate::config::SimConfig;
use crate::ecs::components::{MovementComponent, State, StateComponent, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};
use crate::foundation::math::Vec2;

/// System integrating motion for entities with movement and state
#[derive(Debug, Default)]
pub struct MovementSystem {
    tracked: Vec<EntityId>,
}

impl MovementSystem {
    /// Create the system with no tracked entities
    pub fn new() -> Self {
        Self::default()
    }

    fn vertical(state: &mut StateComponent, movement: &mut MovementComponent, config: &SimConfig) {
        match state.super_state() {
            SuperState::IsOnGround => {
                movement.acceleration = Vec2::zeros();
                movement.velocity = Vec2::zeros();
                if state.state() == State::Jump {
                    movement.velocity.y = -config.jump_speed;
                    state.set_super_state(SuperState::IsJumping);
                }
            }
            SuperState::IsFalling => {
                movement.acceleration = Vec2::new(0.0, config.gravity);
                if state.state() == State::DoubleJump {
                    movement.velocity.y -= config.jump_speed;
                    state.set_super_state(SuperState::IsDoubleJumping);
                }
            }
            SuperState::IsDead => {
                movement.velocity = Vec2::zeros();
                movement.acceleration = Vec2::zeros();
            }
            _ => {
                movement.acceleration = Vec2::new(0.0, config.gravity);
                // Past the apex the jump turns into a fall.
                if movement.velocity.y > 0.0 {
                    state.set_super_state(SuperState::IsFalling);
                }
            }
        }
    }

    fn horizontal(state: &mut StateComponent, movement: &mut MovementComponent, config: &SimConfig) {
        match state.state() {
            State::WalkLeft => {
                state.horizontal_direction = -1;
                movement.velocity.x -= config.walk_speed;
            }
            State::WalkRight => {
                state.horizontal_direction = 1;
                movement.velocity.x += config.walk_speed;
            }
            _ => {}
        }
    }

    fn integrate(
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        config: &SimConfig,
        dt: f32,
    ) {
        Self::vertical(state, movement, config);
        Self::horizontal(state, movement, config);

        movement.velocity += movement.acceleration * dt;

        // Walk impulses repeat every airborne frame; without the clamp
        // horizontal speed would grow without bound.
        if state.super_state() != SuperState::IsOnGround {
            movement.velocity.x = movement
                .velocity
                .x
                .clamp(-config.walk_speed, config.walk_speed);
        }

        movement.step(dt);
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.movement.is_none() {
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
            let (Some(state), Some(movement)) = (entity.state.as_mut(), entity.movement.as_mut())
            else {
                continue;
            };

            Self::integrate(state, movement, ctx.config, ctx.dt);

            // The box is a function of position and facing; refresh it
            // before the collision systems read it.
            if let Some(collision_box) = entity.collision_box.as_mut() {
                collision_box.update_position(
                    movement.position.x,
                    movement.position.y,
                    state.horizontal_direction,
                );
            }
        }
    }
}
