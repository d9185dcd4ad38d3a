//! Entity-vs-entity collision system
//!
//! One distinguished subject (the player) is tested against every other
//! tracked entity each frame; resolution is dispatched on the other
//! entity's classification tag. Deaths are announced on the bus rather
//! than applied here, so pickup counting, respawning and level reloads
//! stay the concern of the systems that subscribed for them.

use crate::ecs::components::{EntityType, SuperState};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::store::EntityStore;
use crate::ecs::system::{untrack, System, UpdateContext};
use crate::events::Message;
use crate::foundation::math::Vec2;

// Same slack as the obstacle resolver's cross-frame edge tests.
const EDGE_SLACK: f32 = 1.0;

/// System resolving player contacts with pickups, enemies and portals
#[derive(Debug, Default)]
pub struct EntityCollisionSystem {
    subject: Option<EntityId>,
    others: Vec<EntityId>,
}

impl EntityCollisionSystem {
    /// Create an empty system; entities opt in through [`System::add_entity`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for EntityCollisionSystem {
    fn name(&self) -> &'static str {
        "entity_collision"
    }

    fn add_entity(&mut self, entity: &Entity) {
        let Some(entity_type) = entity.entity_type.as_ref() else {
            return;
        };
        if entity.collision_box.is_none() || entity.movement.is_none() || entity.state.is_none() {
            return;
        }
        if entity_type.kind() == EntityType::Player {
            self.subject = Some(entity.id());
        } else {
            self.others.push(entity.id());
        }
    }

    fn remove_entity(&mut self, id: EntityId) {
        if self.subject == Some(id) {
            self.subject = None;
        }
        untrack(&mut self.others, id);
    }

    fn update(&mut self, store: &mut EntityStore, ctx: &mut UpdateContext<'_>) {
        let Some(subject_id) = self.subject else {
            return;
        };

        for &other_id in &self.others {
            let Some((subject, other)) = store.get_pair_mut(subject_id, other_id) else {
                continue;
            };
            if !subject.is_active || !other.is_active {
                continue;
            }

            let (
                Some(player_state),
                Some(player_movement),
                Some(player_box),
                Some(other_state),
                Some(other_movement),
                Some(other_box),
                Some(other_type),
            ) = (
                subject.state.as_mut(),
                subject.movement.as_mut(),
                subject.collision_box.as_mut(),
                other.state.as_mut(),
                other.movement.as_mut(),
                other.collision_box.as_mut(),
                other.entity_type.as_ref(),
            )
            else {
                continue;
            };

            if matches!(
                player_state.super_state(),
                SuperState::IsDead | SuperState::IsAppearing
            ) || matches!(
                other_state.super_state(),
                SuperState::IsDead | SuperState::IsAppearing
            ) {
                continue;
            }
            if !player_box.rect().intersects(&other_box.rect()) {
                continue;
            }

            match other_type.kind() {
                EntityType::Coin => {
                    other_state.set_super_state(SuperState::IsDead);
                    ctx.bus.publish(Message::EntityDied(other_id));
                }
                EntityType::RegularEnemy => {
                    let was_above = player_movement.last_position.y + player_box.base_height
                        - player_box.bottom_offset
                        <= other_box.rect().top() + EDGE_SLACK;

                    if player_state.super_state() == SuperState::IsFalling && was_above {
                        // Stomp: the enemy dies and the player bounces off,
                        // pushed away from the enemy's center.
                        other_state.set_super_state(SuperState::IsDead);
                        other_movement.velocity = Vec2::zeros();
                        ctx.bus.publish(Message::EntityDied(other_id));

                        let away = if player_movement.position.x < other_movement.position.x {
                            -1.0
                        } else {
                            1.0
                        };
                        player_movement.velocity = Vec2::new(
                            away * ctx.config.stomp_knockback_speed,
                            -ctx.config.stomp_bounce_speed,
                        );
                        player_state.set_super_state(SuperState::IsJumping);
                        player_state.jumps_performed = 1;
                    } else {
                        player_movement.velocity = Vec2::new(0.0, -ctx.config.death_kick_speed);
                        player_state.set_super_state(SuperState::IsDead);
                        ctx.bus.publish(Message::EntityDied(subject_id));
                    }
                }
                EntityType::PortalToNextLevel => {
                    ctx.bus.publish(Message::NextLevel);
                }
                EntityType::Player => {}
            }

            // Later overlap tests this frame must see the corrected boxes.
            player_box.update_position(
                player_movement.position.x,
                player_movement.position.y,
                player_state.horizontal_direction,
            );
            other_box.update_position(
                other_movement.position.x,
                other_movement.position.y,
                other_state.horizontal_direction,
            );
        }
    }
}
