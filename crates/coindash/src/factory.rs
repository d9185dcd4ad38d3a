//! Entity assembly
//!
//! Turns spawn descriptors into fully assembled entities: sprite-sheet
//! clips, collision boxes (inset to match the drawn pixels) and the state
//! machine defaults for each entity kind.

use platform_engine::prelude::*;

const SPRITE_SIZE: f32 = 32.0;

/// Builds the game's entities from level spawn descriptors
#[derive(Debug, Default)]
pub struct CoindashFactory;

fn clip(sheet: &str, frames: u32, fps: f32) -> AnimationClip {
    AnimationClip::new(sheet, 1, frames, fps)
}

fn player(position: Vec2, config: &SimConfig) -> Entity {
    let fps = config.animation_fps;
    let animation = AnimationComponent::new()
        .with_clip(AnimationId::Idle, clip("player/idle", 11, fps))
        .with_clip(AnimationId::Walking, clip("player/run", 12, fps))
        .with_clip(AnimationId::Jump, clip("player/jump", 1, fps))
        .with_clip(AnimationId::DoubleJump, clip("player/double_jump", 6, fps))
        .with_clip(AnimationId::Fall, clip("player/fall", 1, fps))
        .with_clip(AnimationId::Slide, clip("player/wall_slide", 5, fps))
        .with_clip(AnimationId::Death, clip("player/hit", 7, fps))
        .with_clip(AnimationId::Appear, clip("effects/appear", 7, fps));

    Entity::new()
        .with_component(EntityTypeComponent::new(EntityType::Player).into())
        .with_component(MovementComponent::new(position).into())
        .with_component(
            CollisionBoxComponent::new(position, SPRITE_SIZE, SPRITE_SIZE, 4.0, 0.0, 8.0, 8.0)
                .into(),
        )
        .with_component(StateComponent::new(State::Idle, SuperState::IsFalling).into())
        .with_component(PlayerInputComponent::new().into())
        .with_component(animation.into())
}

fn coin(position: Vec2, spawn: &SpawnDescriptor, config: &SimConfig) -> Entity {
    let fps = config.animation_fps;
    let animation = AnimationComponent::new()
        .with_clip(AnimationId::Idle, clip("items/coin", 10, fps))
        .with_clip(AnimationId::Death, clip("items/collected", 6, fps))
        .with_clip(AnimationId::Appear, clip("effects/appear", 7, fps));

    let mut entity = Entity::new()
        .with_component(EntityTypeComponent::new(EntityType::Coin).into())
        .with_component(MovementComponent::new(position).into())
        .with_component(
            CollisionBoxComponent::new(position, SPRITE_SIZE, SPRITE_SIZE, 8.0, 8.0, 8.0, 8.0)
                .into(),
        )
        .with_component(StateComponent::new(State::Idle, SuperState::IsOnGround).into())
        .with_component(animation.into());
    if let Some(delay) = spawn.respawn_delay {
        entity.add_component(RespawnComponent::new(position, delay).into());
    }
    entity
}

fn enemy(position: Vec2, spawn: &SpawnDescriptor, config: &SimConfig) -> Entity {
    let fps = config.animation_fps;
    let animation = AnimationComponent::new()
        .with_clip(AnimationId::Idle, clip("enemy/idle", 10, fps))
        .with_clip(AnimationId::Walking, clip("enemy/run", 12, fps))
        .with_clip(AnimationId::Fall, clip("enemy/idle", 10, fps))
        .with_clip(AnimationId::Death, clip("enemy/hit", 5, fps))
        .with_clip(AnimationId::Appear, clip("effects/appear", 7, fps));

    let patrol = spawn.patrol.unwrap_or(PatrolRange {
        left: 0.0,
        right: 0.0,
    });
    // Enemies are always pooled; the descriptor may override the delay.
    let delay = spawn.respawn_delay.unwrap_or(config.respawn_delay);
    Entity::new()
        .with_component(EntityTypeComponent::new(EntityType::RegularEnemy).into())
        .with_component(MovementComponent::new(position).into())
        .with_component(
            CollisionBoxComponent::new(position, SPRITE_SIZE, SPRITE_SIZE, 8.0, 0.0, 6.0, 6.0)
                .into(),
        )
        .with_component(
            StateComponent::new(State::WalkLeft, SuperState::IsOnGround)
                .with_direction(-1)
                .into(),
        )
        .with_component(PatrolComponent::new(position.x, patrol.left, patrol.right).into())
        .with_component(RespawnComponent::new(position, delay).into())
        .with_component(animation.into())
}

fn portal(position: Vec2, config: &SimConfig) -> Entity {
    let animation = AnimationComponent::new()
        .with_clip(AnimationId::Idle, clip("items/portal", 8, config.animation_fps))
        .with_clip(AnimationId::Appear, clip("effects/appear", 7, config.animation_fps));

    Entity::new()
        .with_component(EntityTypeComponent::new(EntityType::PortalToNextLevel).into())
        .with_component(MovementComponent::new(position).into())
        .with_component(
            CollisionBoxComponent::new(position, SPRITE_SIZE, SPRITE_SIZE, 2.0, 0.0, 10.0, 10.0)
                .into(),
        )
        .with_component(StateComponent::new(State::Idle, SuperState::IsOnGround).into())
        .with_component(animation.into())
}

impl EntityFactory for CoindashFactory {
    fn create(&self, spawn: &SpawnDescriptor, config: &SimConfig) -> Option<Entity> {
        let entity = match spawn.kind {
            EntityType::Player => player(spawn.position, config),
            EntityType::Coin => coin(spawn.position, spawn, config),
            EntityType::RegularEnemy => enemy(spawn.position, spawn, config),
            EntityType::PortalToNextLevel => portal(spawn.position, config),
        };
        Some(entity)
    }
}
