//! # Platform Engine
//!
//! A deterministic 2D platformer simulation core.
//!
//! ## Features
//!
//! - **ECS Architecture**: Closed component set over stable entity handles
//! - **Fixed Pipeline**: Systems run single-threaded in a fixed order
//! - **Finite-State Movement**: Parallel interactive/physics state machines
//! - **AABB Collision**: Layered obstacle resolution with one-way platforms
//! - **Message Bus**: Typed publish/subscribe with an end-of-frame drain
//!
//! Rendering, audio, window management and tile-map parsing live outside
//! the core; the crate exposes trait boundaries ([`level::LevelProvider`],
//! [`level::EntityFactory`], [`render::DrawSurface`]) for hosts to fill.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platform_engine::prelude::*;
//!
//! struct Levels(LevelData);
//!
//! impl LevelProvider for Levels {
//!     fn level(&self, id: LevelId) -> Option<&LevelData> {
//!         (id.0 == 0).then_some(&self.0)
//!     }
//!     fn level_count(&self) -> usize {
//!         1
//!     }
//! }
//!
//! struct Factory;
//!
//! impl EntityFactory for Factory {
//!     fn create(&self, spawn: &SpawnDescriptor, _config: &SimConfig) -> Option<Entity> {
//!         Some(Entity::new().with_component(MovementComponent::new(spawn.position).into()))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new(
//!         SimConfig::default(),
//!         Box::new(Levels(LevelData::default())),
//!         Box::new(Factory),
//!     )?;
//!     world.update(1.0 / 60.0, InputIntents::none())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod input;
pub mod level;
pub mod render;

mod world;

pub use world::{World, WorldError};

/// Common imports for simulation hosts
pub mod prelude {
    pub use crate::{
        config::{Config, SimConfig},
        ecs::components::{
            AnimationClip, AnimationComponent, AnimationId, CollisionBoxComponent, EntityType,
            EntityTypeComponent, MovementComponent, PatrolComponent, PlayerInputComponent,
            RespawnComponent, State, StateComponent, SuperState,
        },
        ecs::{Entity, EntityId, EntityStore, System, SystemId, UpdateContext},
        events::{Message, MessageBus, MessageKind},
        foundation::math::{Rect, Vec2},
        input::InputIntents,
        level::{
            EntityFactory, LevelData, LevelId, LevelProvider, PatrolRange, SpawnDescriptor,
            StaticLevels, FLOAT_LAYER,
        },
        render::{DrawSurface, NullSurface},
        World, WorldError,
    };
}
