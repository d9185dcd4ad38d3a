//! Obstacle collision system
//!
//! Resolves each moving entity against the static obstacle rectangles of
//! the loaded level. Obstacles are checked by linear scan per layer;
//! resolution is push-out only (no swept collision), dispatched on the
//! entity's physics phase:
//!
//! - falling: land on top if the entity was above last frame, otherwise a
//!   side hit that starts a wall slide;
//! - on ground: horizontal clamping only;
//! - jumping: one-way "float" layers are ignored entirely; a head bump if
//!   the entity was below last frame, otherwise a side hit.
//!
//! When neither cross-frame test holds but the boxes still overlap, the
//! smaller dimension of the overlap rectangle decides which axis gets
//! corrected, so a grazed platform corner never yanks the entity
//! sideways.

use std::collections::BTreeMap;

use crate::ecs::components::{
    CollisionBoxComponent, MovementComponent, State, StateComponent, SuperState,
};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};
use crate::foundation::math::{Rect, Vec2};
use crate::level::{LevelData, FLOAT_LAYER};

// Gap left between a snapped entity and the obstacle so the boxes do not
// re-intersect next frame.
const SNAP_PAD: f32 = 0.1;

// Slack on the cross-frame edge tests, absorbing integration jitter.
const EDGE_SLACK: f32 = 1.0;

/// System clipping entity motion against level geometry
#[derive(Debug, Default)]
pub struct ObstacleCollisionSystem {
    tracked: Vec<EntityId>,
    obstacles: BTreeMap<String, Vec<Rect>>,
}

impl ObstacleCollisionSystem {
    /// Create the system for one level's obstacle layers
    pub fn new(level: &LevelData) -> Self {
        Self {
            tracked: Vec::new(),
            obstacles: level.obstacles.clone(),
        }
    }

    fn resolve_entity(
        &self,
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        collision_box: &mut CollisionBoxComponent,
    ) {
        let mut position = movement.position;
        state.set_can_move_right(true);
        state.set_can_move_left(true);

        for (layer, rects) in &self.obstacles {
            for rect in rects {
                let entity_box = collision_box.rect();
                if !entity_box.intersects(rect) {
                    continue;
                }

                match state.super_state() {
                    SuperState::IsFalling => Self::resolve_fall(
                        state,
                        movement,
                        collision_box,
                        &mut position,
                        entity_box,
                        rect,
                        layer,
                    ),
                    SuperState::IsOnGround => Self::resolve_ground(
                        state,
                        movement,
                        collision_box,
                        &mut position,
                        entity_box,
                        rect,
                    ),
                    SuperState::IsJumping | SuperState::IsDoubleJumping => {
                        // One-way platforms are passable from below.
                        if layer == FLOAT_LAYER {
                            continue;
                        }
                        Self::resolve_jump(
                            state,
                            movement,
                            collision_box,
                            &mut position,
                            entity_box,
                            rect,
                        );
                    }
                    _ => {}
                }

                // Subsequent obstacle tests must see corrected geometry.
                collision_box.update_position(position.x, position.y, state.horizontal_direction);
            }
        }

        movement.position = position;
        collision_box.update_position(position.x, position.y, state.horizontal_direction);

        // Stepping off the platform edge.
        if collision_box.is_in_air(position.x, state.horizontal_direction)
            && state.super_state() == SuperState::IsOnGround
        {
            state.set_super_state(SuperState::IsFalling);
        }

        // Slid past the bottom of the wall.
        if collision_box.is_past_slide_ceiling(position.y) && state.state() == State::Slide {
            state.set_state(State::Idle);
        }
    }

    fn resolve_fall(
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        collision_box: &mut CollisionBoxComponent,
        position: &mut Vec2,
        entity_box: Rect,
        rect: &Rect,
        layer: &str,
    ) {
        // Landing clears the airborne state first.
        state.set_state(State::Idle);

        let was_above = movement.last_position.y + collision_box.base_height
            - collision_box.bottom_offset
            <= rect.top() + EDGE_SLACK;

        if was_above || (layer != FLOAT_LAYER && Self::vertical_axis_crossed(entity_box, rect)) {
            state.set_super_state(SuperState::IsOnGround);
            position.y =
                rect.top() - collision_box.base_height + collision_box.bottom_offset - SNAP_PAD;
            collision_box.set_ground_segment(rect.left(), rect.right());
        } else if layer != FLOAT_LAYER {
            Self::resolve_airborne_side_hit(state, movement, collision_box, position, entity_box, rect);
        }
    }

    fn resolve_jump(
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        collision_box: &mut CollisionBoxComponent,
        position: &mut Vec2,
        entity_box: Rect,
        rect: &Rect,
    ) {
        let was_below =
            movement.last_position.y + collision_box.top_offset >= rect.bottom() - EDGE_SLACK;

        if was_below || Self::vertical_axis_crossed(entity_box, rect) {
            // Head bump: snap below the obstacle and start falling.
            position.y = rect.bottom() - collision_box.top_offset + SNAP_PAD;
            state.set_super_state(SuperState::IsFalling);
            movement.velocity = Vec2::zeros();
        } else {
            Self::resolve_airborne_side_hit(state, movement, collision_box, position, entity_box, rect);
        }
    }

    fn resolve_ground(
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        collision_box: &CollisionBoxComponent,
        position: &mut Vec2,
        entity_box: Rect,
        rect: &Rect,
    ) {
        if state.state() == State::Slide {
            state.set_state(State::Idle);
        }

        if movement.velocity.x > 0.0 && entity_box.left() <= rect.left() {
            position.x =
                rect.left() - collision_box.base_width + collision_box.right_offset - SNAP_PAD;
            state.set_can_move_right(false);
        }
        if movement.velocity.x < 0.0 && entity_box.right() >= rect.right() {
            position.x = rect.right() - collision_box.right_offset + SNAP_PAD;
            state.set_can_move_left(false);
        }
    }

    // Side hit while airborne: clamp against the approached side, lock
    // the direction (which starts the wall slide), remember the wall's
    // bottom edge for the slide-exit check, and kill all velocity.
    fn resolve_airborne_side_hit(
        state: &mut StateComponent,
        movement: &mut MovementComponent,
        collision_box: &mut CollisionBoxComponent,
        position: &mut Vec2,
        entity_box: Rect,
        rect: &Rect,
    ) {
        if movement.velocity.x > 0.0 && entity_box.left() <= rect.left() {
            position.x = rect.left() - collision_box.base_width + collision_box.right_offset;
            state.set_can_move_right(false);
            collision_box.set_slide_ceiling(rect.bottom());
            state.set_super_state(SuperState::IsFalling);
            movement.velocity = Vec2::zeros();
        }
        if movement.velocity.x < 0.0 && entity_box.right() >= rect.right() {
            position.x = rect.right() - collision_box.right_offset;
            state.set_can_move_left(false);
            collision_box.set_slide_ceiling(rect.bottom());
            state.set_super_state(SuperState::IsFalling);
            movement.velocity = Vec2::zeros();
        }
    }

    // Diagonal-penetration tie-break: the smaller overlap dimension marks
    // the axis that was actually crossed. Strictly smaller height means a
    // vertical correction; ties fall through to the horizontal clamp.
    fn vertical_axis_crossed(entity_box: Rect, rect: &Rect) -> bool {
        entity_box
            .intersection(rect)
            .is_some_and(|overlap| overlap.h < overlap.w)
    }
}

impl System for ObstacleCollisionSystem {
    fn name(&self) -> &'static str {
        "obstacle_collision"
    }

    fn add_entity(&mut self, entity: &Entity) {
        if entity.state.is_none() || entity.movement.is_none() || entity.collision_box.is_none() {
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
            let (Some(state), Some(movement), Some(collision_box)) = (
                entity.state.as_mut(),
                entity.movement.as_mut(),
                entity.collision_box.as_mut(),
            ) else {
                continue;
            };
            if matches!(
                state.super_state(),
                SuperState::IsAppearing | SuperState::IsDead
            ) {
                continue;
            }

            self.resolve_entity(state, movement, collision_box);
        }
    }
}
