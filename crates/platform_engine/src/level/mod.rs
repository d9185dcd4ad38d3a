//! Level boundary
//!
//! Tile-map parsing lives outside the core. A level provider hands the
//! simulation, per level id, a mapping from obstacle-layer name to static
//! rectangles plus a list of entity-spawn descriptors; an entity factory
//! turns descriptors into assembled entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::ecs::components::EntityType;
use crate::ecs::Entity;
use crate::foundation::math::{Rect, Vec2};

/// Name of the one-way obstacle layer: passable from below, solid from
/// above
pub const FLOAT_LAYER: &str = "float";

/// Identifier of a level, indexing the provider's level sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LevelId(pub usize);

/// Patrol bounds of a spawned enemy, relative to its spawn point
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolRange {
    /// Units the enemy may walk left of its spawn point
    pub left: f32,
    /// Units the enemy may walk right of its spawn point
    pub right: f32,
}

/// One entity to create when a level loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    /// What kind of entity to build
    pub kind: EntityType,
    /// World position of the spawn
    pub position: Vec2,
    /// Patrol bounds, for patrolling kinds
    #[serde(default)]
    pub patrol: Option<PatrolRange>,
    /// Respawn delay override in seconds; `None` means the entity is not
    /// pooled for respawn
    #[serde(default)]
    pub respawn_delay: Option<f32>,
}

/// Static data of one level: obstacle layers and spawns.
///
/// Layers are kept in a `BTreeMap` so collision resolution visits them in
/// a deterministic order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelData {
    /// Obstacle rectangles per layer name
    pub obstacles: BTreeMap<String, Vec<Rect>>,
    /// Entities to create on load
    pub spawns: Vec<SpawnDescriptor>,
}

/// Source of level data, keyed by [`LevelId`].
///
/// Ids index a fixed sequence `0..level_count()`; level transitions wrap
/// around it.
pub trait LevelProvider {
    /// The data of one level, or `None` for an unknown id
    fn level(&self, id: LevelId) -> Option<&LevelData>;

    /// Number of levels in the sequence
    fn level_count(&self) -> usize;
}

/// Builds entities from spawn descriptors.
///
/// Returning `None` declines the spawn; the world logs and skips it.
pub trait EntityFactory {
    /// Assemble the entity for one descriptor
    fn create(&self, spawn: &SpawnDescriptor, config: &SimConfig) -> Option<Entity>;
}

/// A provider over an in-memory list of levels
#[derive(Debug, Default)]
pub struct StaticLevels {
    levels: Vec<LevelData>,
}

impl StaticLevels {
    /// Wrap a fixed list of levels
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }
}

impl LevelProvider for StaticLevels {
    fn level(&self, id: LevelId) -> Option<&LevelData> {
        self.levels.get(id.0)
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}
