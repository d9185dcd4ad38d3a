//! Entity implementation
//!
//! An entity is an identity plus at most one component of each kind. The
//! component set is closed and stored as a struct of optional fields, so
//! lookups are direct field reads with no runtime type machinery.

use slotmap::new_key_type;

use crate::ecs::components::{
    AnimationComponent, CollisionBoxComponent, EntityTypeComponent, MovementComponent,
    PatrolComponent, PlayerInputComponent, RespawnComponent, StateComponent,
};

new_key_type! {
    /// Stable handle for an entity in the store
    pub struct EntityId;
}

/// The closed set of component kinds an entity can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// [`MovementComponent`]
    Movement,
    /// [`CollisionBoxComponent`]
    CollisionBox,
    /// [`StateComponent`]
    State,
    /// [`AnimationComponent`]
    Animation,
    /// [`EntityTypeComponent`]
    EntityType,
    /// [`PlayerInputComponent`]
    PlayerInput,
    /// [`PatrolComponent`]
    Patrol,
    /// [`RespawnComponent`]
    Respawn,
}

/// A component instance, tagged by kind
#[derive(Debug, Clone)]
pub enum Component {
    /// Motion state
    Movement(MovementComponent),
    /// Collision rectangle
    CollisionBox(CollisionBoxComponent),
    /// State machine
    State(StateComponent),
    /// Animation clips
    Animation(AnimationComponent),
    /// Classification tag
    EntityType(EntityTypeComponent),
    /// Player intents
    PlayerInput(PlayerInputComponent),
    /// Patrol intents
    Patrol(PatrolComponent),
    /// Respawn timer
    Respawn(RespawnComponent),
}

impl Component {
    /// The kind slot this component occupies
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Movement(_) => ComponentKind::Movement,
            Self::CollisionBox(_) => ComponentKind::CollisionBox,
            Self::State(_) => ComponentKind::State,
            Self::Animation(_) => ComponentKind::Animation,
            Self::EntityType(_) => ComponentKind::EntityType,
            Self::PlayerInput(_) => ComponentKind::PlayerInput,
            Self::Patrol(_) => ComponentKind::Patrol,
            Self::Respawn(_) => ComponentKind::Respawn,
        }
    }
}

macro_rules! component_from {
    ($($inner:ty => $variant:ident),* $(,)?) => {
        $(impl From<$inner> for Component {
            fn from(component: $inner) -> Self {
                Self::$variant(component)
            }
        })*
    };
}

component_from! {
    MovementComponent => Movement,
    CollisionBoxComponent => CollisionBox,
    StateComponent => State,
    AnimationComponent => Animation,
    EntityTypeComponent => EntityType,
    PlayerInputComponent => PlayerInput,
    PatrolComponent => Patrol,
    RespawnComponent => Respawn,
}

/// An entity: identity, activity flag and one optional slot per component
/// kind.
///
/// Inactive entities stay in every system's tracked set but are skipped
/// by per-frame processing; this is how dead-but-respawnable entities are
/// pooled.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,

    /// Whether systems should process this entity this frame
    pub is_active: bool,

    /// Motion state
    pub movement: Option<MovementComponent>,
    /// Collision rectangle
    pub collision_box: Option<CollisionBoxComponent>,
    /// State machine
    pub state: Option<StateComponent>,
    /// Animation clips
    pub animation: Option<AnimationComponent>,
    /// Classification tag
    pub entity_type: Option<EntityTypeComponent>,
    /// Player intents
    pub player_input: Option<PlayerInputComponent>,
    /// Patrol intents
    pub patrol: Option<PatrolComponent>,
    /// Respawn timer
    pub respawn: Option<RespawnComponent>,
}

impl Entity {
    /// Create an active entity with no components.
    ///
    /// The identity is assigned when the entity enters a store.
    pub fn new() -> Self {
        Self {
            id: EntityId::default(),
            is_active: true,
            movement: None,
            collision_box: None,
            state: None,
            animation: None,
            entity_type: None,
            player_input: None,
            patrol: None,
            respawn: None,
        }
    }

    /// The entity's store handle; the null handle until stored
    pub const fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    /// Whether a component of the given kind is present
    pub const fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Movement => self.movement.is_some(),
            ComponentKind::CollisionBox => self.collision_box.is_some(),
            ComponentKind::State => self.state.is_some(),
            ComponentKind::Animation => self.animation.is_some(),
            ComponentKind::EntityType => self.entity_type.is_some(),
            ComponentKind::PlayerInput => self.player_input.is_some(),
            ComponentKind::Patrol => self.patrol.is_some(),
            ComponentKind::Respawn => self.respawn.is_some(),
        }
    }

    /// Insert a component. Inserting into an occupied slot is a no-op;
    /// the existing component is kept.
    pub fn add_component(&mut self, component: Component) {
        if self.has(component.kind()) {
            log::debug!(
                "ignoring duplicate {:?} component on entity {:?}",
                component.kind(),
                self.id
            );
            return;
        }
        match component {
            Component::Movement(c) => self.movement = Some(c),
            Component::CollisionBox(c) => self.collision_box = Some(c),
            Component::State(c) => self.state = Some(c),
            Component::Animation(c) => self.animation = Some(c),
            Component::EntityType(c) => self.entity_type = Some(c),
            Component::PlayerInput(c) => self.player_input = Some(c),
            Component::Patrol(c) => self.patrol = Some(c),
            Component::Respawn(c) => self.respawn = Some(c),
        }
    }

    /// Builder-style [`Self::add_component`]
    pub fn with_component(mut self, component: Component) -> Self {
        self.add_component(component);
        self
    }

    /// Remove the component of the given kind; removing an empty slot is
    /// a no-op
    pub fn remove_component(&mut self, kind: ComponentKind) {
        if !self.has(kind) {
            log::debug!("tried to remove missing {kind:?} component on entity {:?}", self.id);
            return;
        }
        match kind {
            ComponentKind::Movement => self.movement = None,
            ComponentKind::CollisionBox => self.collision_box = None,
            ComponentKind::State => self.state = None,
            ComponentKind::Animation => self.animation = None,
            ComponentKind::EntityType => self.entity_type = None,
            ComponentKind::PlayerInput => self.player_input = None,
            ComponentKind::Patrol => self.patrol = None,
            ComponentKind::Respawn => self.respawn = None,
        }
    }

    /// Snapshot of the kinds currently present, for iteration and
    /// teardown
    pub fn component_kinds(&self) -> Vec<ComponentKind> {
        const ALL: [ComponentKind; 8] = [
            ComponentKind::Movement,
            ComponentKind::CollisionBox,
            ComponentKind::State,
            ComponentKind::Animation,
            ComponentKind::EntityType,
            ComponentKind::PlayerInput,
            ComponentKind::Patrol,
            ComponentKind::Respawn,
        ];
        ALL.into_iter().filter(|kind| self.has(*kind)).collect()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{State, SuperState};
    use crate::foundation::math::Vec2;

    #[test]
    fn duplicate_insert_keeps_the_first_component() {
        let mut entity = Entity::new();
        entity.add_component(Component::Movement(MovementComponent::new(Vec2::new(
            1.0, 2.0,
        ))));
        entity.add_component(Component::Movement(MovementComponent::new(Vec2::new(
            9.0, 9.0,
        ))));

        let movement = entity.movement.as_ref().unwrap();
        assert_eq!(movement.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let mut entity = Entity::new();
        entity.remove_component(ComponentKind::State);
        assert!(!entity.has(ComponentKind::State));
    }

    #[test]
    fn component_kinds_snapshot() {
        let entity = Entity::new()
            .with_component(Component::State(StateComponent::new(
                State::Idle,
                SuperState::IsFalling,
            )))
            .with_component(Component::Movement(MovementComponent::new(Vec2::zeros())));

        let kinds = entity.component_kinds();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&ComponentKind::State));
        assert!(kinds.contains(&ComponentKind::Movement));
    }
}
