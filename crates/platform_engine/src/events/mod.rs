//! Message bus
//!
//! Systems signal each other (entity died, advance level, ...) through a
//! typed publish/subscribe channel instead of holding direct references.
//! Publishing enqueues; the world drains the queue once per frame after
//! every system has run, so no handler ever observes the entity set while
//! another system is iterating it.
//!
//! Subscriptions are keyed by an opaque token returned at subscribe time,
//! which makes unsubscribing unambiguous even when one system listens to
//! several message kinds.

use std::collections::VecDeque;

use crate::ecs::{EntityId, SystemId};

/// A message travelling over the bus.
///
/// The set is closed: each variant carries only the payload its
/// subscribers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// An entity's super-state became dead this frame
    EntityDied(EntityId),
    /// Remove the entity from every system and the store at end of frame
    DestroyEntity(EntityId),
    /// Attach an already-stored entity to every system
    AddEntity(EntityId),
    /// A pooled entity finished respawning and is active again
    EntityReAppears(EntityId),
    /// Tear the level down and load it again
    ReloadLevel,
    /// Advance to the next level (wrapping past the last)
    NextLevel,
    /// Go back to the previous level
    PreviousLevel,
}

/// Discriminant of [`Message`], used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// See [`Message::EntityDied`]
    EntityDied,
    /// See [`Message::DestroyEntity`]
    DestroyEntity,
    /// See [`Message::AddEntity`]
    AddEntity,
    /// See [`Message::EntityReAppears`]
    EntityReAppears,
    /// See [`Message::ReloadLevel`]
    ReloadLevel,
    /// See [`Message::NextLevel`]
    NextLevel,
    /// See [`Message::PreviousLevel`]
    PreviousLevel,
}

impl Message {
    /// The kind this message is dispatched under
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::EntityDied(_) => MessageKind::EntityDied,
            Self::DestroyEntity(_) => MessageKind::DestroyEntity,
            Self::AddEntity(_) => MessageKind::AddEntity,
            Self::EntityReAppears(_) => MessageKind::EntityReAppears,
            Self::ReloadLevel => MessageKind::ReloadLevel,
            Self::NextLevel => MessageKind::NextLevel,
            Self::PreviousLevel => MessageKind::PreviousLevel,
        }
    }
}

/// Opaque handle identifying one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionToken(u64);

#[derive(Debug)]
struct Subscription {
    token: SubscriptionToken,
    system: SystemId,
    kind: MessageKind,
}

/// Typed publish/subscribe registry with a per-frame queue
#[derive(Debug, Default)]
pub struct MessageBus {
    subscriptions: Vec<Subscription>,
    queue: VecDeque<Message>,
    next_token: u64,
}

impl MessageBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system's interest in one message kind
    pub fn subscribe(&mut self, system: SystemId, kind: MessageKind) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.subscriptions.push(Subscription {
            token,
            system,
            kind,
        });
        token
    }

    /// Drop a subscription; unknown tokens are a no-op
    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscriptions.retain(|sub| sub.token != token);
    }

    /// Queue a message for delivery at the end-of-frame drain
    pub fn publish(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Take every queued message, leaving the queue empty
    pub fn take_queue(&mut self) -> VecDeque<Message> {
        std::mem::take(&mut self.queue)
    }

    /// Systems subscribed to a kind, in scheduler order
    pub fn subscribers_of(&self, kind: MessageKind) -> Vec<SystemId> {
        let mut systems: Vec<SystemId> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.kind == kind)
            .map(|sub| sub.system)
            .collect();
        systems.sort_unstable();
        systems.dedup();
        systems
    }

    /// Drop queued messages without delivering them.
    ///
    /// Called at the level-change boundary so handlers belonging to the
    /// torn-down pipeline never fire.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Number of live subscriptions (for teardown sanity checks)
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_queues_until_taken() {
        let mut bus = MessageBus::new();
        bus.publish(Message::NextLevel);
        bus.publish(Message::ReloadLevel);

        let queue = bus.take_queue();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0], Message::NextLevel);
        assert!(bus.take_queue().is_empty());
    }

    #[test]
    fn subscribe_and_unsubscribe_by_token() {
        let mut bus = MessageBus::new();
        let a = SystemId(0);
        let b = SystemId(1);

        let token = bus.subscribe(a, MessageKind::EntityDied);
        bus.subscribe(b, MessageKind::EntityDied);
        bus.subscribe(a, MessageKind::NextLevel);

        assert_eq!(bus.subscribers_of(MessageKind::EntityDied), vec![a, b]);

        bus.unsubscribe(token);
        assert_eq!(bus.subscribers_of(MessageKind::EntityDied), vec![b]);
        // The same system's other subscription is untouched
        assert_eq!(bus.subscribers_of(MessageKind::NextLevel), vec![a]);
    }

    #[test]
    fn unknown_token_is_a_no_op() {
        let mut bus = MessageBus::new();
        let token = bus.subscribe(SystemId(0), MessageKind::ReloadLevel);
        bus.unsubscribe(token);
        bus.unsubscribe(token);
        assert_eq!(bus.subscription_count(), 0);
    }
}
