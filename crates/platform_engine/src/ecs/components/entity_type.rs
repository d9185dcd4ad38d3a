//! Entity classification component

use serde::{Deserialize, Serialize};

/// Classification tag read by the entity-collision system to dispatch
/// resolution logic; purely declarative, set once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// The player-controlled character
    Player,
    /// Collectible pickup
    Coin,
    /// Walking enemy, lethal from the side, stompable from above
    RegularEnemy,
    /// Touching it advances to the next level
    PortalToNextLevel,
}

/// Component wrapping the classification tag
#[derive(Debug, Clone, Copy)]
pub struct EntityTypeComponent {
    kind: EntityType,
}

impl EntityTypeComponent {
    /// Create a classification component
    pub const fn new(kind: EntityType) -> Self {
        Self { kind }
    }

    /// The entity's classification
    pub const fn kind(&self) -> EntityType {
        self.kind
    }
}
