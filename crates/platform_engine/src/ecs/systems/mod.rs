//! Simulation systems
//!
//! Each system is one stage of the per-frame pipeline; [`SystemManager`]
//! owns them in their fixed execution order.

mod animation;
mod appear;
mod death;
mod enemy_ai;
mod entity_collision;
mod manager;
mod movement;
mod obstacle_collision;
mod player_input;
mod respawn;

pub use animation::AnimationSystem;
pub use appear::AppearSystem;
pub use death::DeathSystem;
pub use enemy_ai::EnemyAiSystem;
pub use entity_collision::EntityCollisionSystem;
pub use manager::SystemManager;
pub use movement::MovementSystem;
pub use obstacle_collision::ObstacleCollisionSystem;
pub use player_input::PlayerInputSystem;
pub use respawn::RespawnSystem;
