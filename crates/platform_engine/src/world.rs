//! World
//!
//! The world ties the pieces together: it owns the entity store, the
//! message bus and the system pipeline, loads levels through the provider
//! and factory boundaries, and advances the simulation one frame at a
//! time.
//!
//! A frame is: run every system in order, then drain the message queue.
//! Handlers may publish further messages while the drain runs; those are
//! drained too, in the same frame. Entity destruction and level
//! transitions requested during the drain are deferred and applied once
//! the queue is empty, so no handler ever observes a half-torn-down
//! entity set.

use thiserror::Error;

use crate::config::SimConfig;
use crate::ecs::systems::SystemManager;
use crate::ecs::{Entity, EntityId, EntityStore, UpdateContext};
use crate::events::{Message, MessageBus};
use crate::input::InputIntents;
use crate::level::{EntityFactory, LevelId, LevelProvider};
use crate::render::DrawSurface;

/// Errors reported by the world
#[derive(Debug, Error)]
pub enum WorldError {
    /// The level provider has no level under this id
    #[error("unknown level id {0}")]
    UnknownLevel(usize),

    /// The provider holds no levels at all
    #[error("level provider is empty")]
    NoLevels,
}

// Level transition requested during a frame, applied once the message
// queue is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Reload,
    Next,
    Previous,
}

/// A running simulation: store, bus, pipeline and the loaded level
pub struct World {
    config: SimConfig,
    levels: Box<dyn LevelProvider>,
    factory: Box<dyn EntityFactory>,

    store: EntityStore,
    bus: MessageBus,
    systems: SystemManager,
    current_level: LevelId,
}

impl World {
    /// Create a world and load its first level
    pub fn new(
        config: SimConfig,
        levels: Box<dyn LevelProvider>,
        factory: Box<dyn EntityFactory>,
    ) -> Result<Self, WorldError> {
        if levels.level_count() == 0 {
            return Err(WorldError::NoLevels);
        }

        let mut bus = MessageBus::new();
        let first = levels
            .level(LevelId(0))
            .ok_or(WorldError::UnknownLevel(0))?;
        let systems = SystemManager::new(first, &mut bus);

        let mut world = Self {
            config,
            levels,
            factory,
            store: EntityStore::new(),
            bus,
            systems,
            current_level: LevelId(0),
        };
        world.populate();
        Ok(world)
    }

    /// The loaded level
    pub const fn current_level(&self) -> LevelId {
        self.current_level
    }

    /// The entity store, for inspection
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable access to the entity store.
    ///
    /// Structural changes (insert/remove) must go through
    /// [`Self::add_entity`] / [`Self::remove_entity`] so systems stay in
    /// sync; this is for mutating components of existing entities.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// The simulation's tuning constants
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Tear everything down and rebuild the pipeline for `level`
    pub fn load_level(&mut self, level: LevelId) -> Result<(), WorldError> {
        let data = self
            .levels
            .level(level)
            .ok_or(WorldError::UnknownLevel(level.0))?;

        log::info!("loading level {}", level.0);
        self.systems.teardown(&mut self.bus);
        self.bus.clear_queue();
        self.store.clear();

        self.systems = SystemManager::new(data, &mut self.bus);
        self.current_level = level;
        self.populate();
        Ok(())
    }

    /// Insert an entity into the store and offer it to every system
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.store.insert(entity);
        if let Some(entity) = self.store.get(id) {
            self.systems.add_entity(entity);
        }
        id
    }

    /// Remove an entity from every system and the store
    pub fn remove_entity(&mut self, id: EntityId) {
        self.systems.remove_entity(id);
        self.store.remove(id);
    }

    /// Advance the simulation one frame
    pub fn update(&mut self, dt: f32, input: InputIntents) -> Result<(), WorldError> {
        let mut ctx = UpdateContext {
            dt,
            input,
            bus: &mut self.bus,
            config: &self.config,
        };
        self.systems.update(&mut self.store, &mut ctx);

        let (destroyed, transition) = self.drain_messages();
        for id in destroyed {
            self.remove_entity(id);
        }
        if let Some(transition) = transition {
            let target = self.transition_target(transition);
            self.load_level(target)?;
        }
        Ok(())
    }

    /// Submit one frame of draw commands
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.systems.draw(&self.store, surface);
    }

    // Deliver queued messages until the queue stays empty. Destruction
    // and level transitions are collected, not applied, during the drain.
    fn drain_messages(&mut self) -> (Vec<EntityId>, Option<Transition>) {
        let mut destroyed = Vec::new();
        let mut transition = None;

        loop {
            let batch = self.bus.take_queue();
            if batch.is_empty() {
                break;
            }
            for message in batch {
                match message {
                    Message::DestroyEntity(id) => {
                        if !destroyed.contains(&id) {
                            destroyed.push(id);
                        }
                    }
                    Message::AddEntity(id) => {
                        if let Some(entity) = self.store.get(id) {
                            self.systems.add_entity(entity);
                        }
                    }
                    Message::ReloadLevel => transition = Some(Transition::Reload),
                    Message::NextLevel => transition = Some(Transition::Next),
                    Message::PreviousLevel => transition = Some(Transition::Previous),
                    Message::EntityDied(_) | Message::EntityReAppears(_) => {}
                }
                self.systems.dispatch(&mut self.store, &self.bus, &message);
            }
        }

        (destroyed, transition)
    }

    fn transition_target(&self, transition: Transition) -> LevelId {
        let count = self.levels.level_count();
        let current = self.current_level.0;
        match transition {
            Transition::Reload => self.current_level,
            Transition::Next => LevelId((current + 1) % count),
            Transition::Previous => LevelId((current + count - 1) % count),
        }
    }

    // Create the loaded level's entities through the factory boundary.
    fn populate(&mut self) {
        let Some(data) = self.levels.level(self.current_level) else {
            return;
        };
        let spawns = data.spawns.clone();
        for spawn in &spawns {
            match self.factory.create(spawn, &self.config) {
                Some(entity) => {
                    self.add_entity(entity);
                }
                None => log::warn!("factory declined spawn {spawn:?}"),
            }
        }
        log::info!(
            "level {} populated with {} entities",
            self.current_level.0,
            self.store.len()
        );
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("current_level", &self.current_level)
            .field("entities", &self.store.len())
            .field("systems", &self.systems)
            .finish_non_exhaustive()
    }
}
