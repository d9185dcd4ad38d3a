//! Entity-Component-System implementation
//!
//! A closed component set over a slotmap arena, with systems scheduled in
//! a fixed, documented order.

pub mod components;
pub mod entity;
pub mod store;
pub mod system;
pub mod systems;

#[cfg(test)]
mod tests;

pub use entity::{Component, ComponentKind, Entity, EntityId};
pub use store::EntityStore;
pub use system::{System, SystemId, UpdateContext};
