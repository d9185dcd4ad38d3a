//! Component set
//!
//! Plain data records attached to entities. Components carry no behavior
//! beyond small local invariants; systems own all cross-component logic.

pub mod animation;
pub mod collision_box;
pub mod entity_type;
pub mod input;
pub mod movement;
pub mod respawn;
pub mod state;

pub use animation::{AnimationClip, AnimationComponent};
pub use collision_box::CollisionBoxComponent;
pub use entity_type::{EntityType, EntityTypeComponent};
pub use input::{PatrolComponent, PlayerInputComponent};
pub use movement::MovementComponent;
pub use respawn::RespawnComponent;
pub use state::{AnimationId, State, StateComponent, SuperState};
