//! Entity store
//!
//! Owns every live entity behind stable slotmap handles. Systems keep
//! non-owning `EntityId` lists into this store and re-fetch components
//! each frame rather than caching references.

use slotmap::SlotMap;

use crate::ecs::entity::{Entity, EntityId};

/// Arena of all entities in the running simulation
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: SlotMap<EntityId, Entity>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, assigning its stable handle
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.entities.insert_with_key(|id| {
            let mut entity = entity;
            entity.assign_id(id);
            entity
        })
    }

    /// Remove and return an entity; `None` if the handle is stale
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    /// Shared access to an entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Exclusive access to an entity
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Exclusive access to two distinct entities at once, as needed when
    /// resolving an entity-vs-entity collision
    pub fn get_pair_mut(
        &mut self,
        a: EntityId,
        b: EntityId,
    ) -> Option<(&mut Entity, &mut Entity)> {
        let [a, b] = self.entities.get_disjoint_mut([a, b])?;
        Some((a, b))
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Drop every entity, e.g. on level teardown
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
