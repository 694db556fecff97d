//! Subscription registry keyed by node identity, plus the notification outbox.

use crate::model::{NodeId, TypeRefId};
use dashmap::DashMap;
use indexmap::IndexSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Who gets told about a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscriber {
    /// A resolved type reference whose canonical name may now be stale.
    Reference(TypeRefId),
    /// An external observer (editor session, UI).
    Listener(ListenerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TreeEvent {
    /// `node` was attached somewhere beneath `scope`, the node subscribed to.
    Added { node: NodeId, scope: NodeId },
    /// `node`, which was subscribed to, left the tree.
    Removed { node: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subscriber: Subscriber,
    pub event: TreeEvent,
}

/// Registry shared by resolutions running on several threads: registration
/// goes through a `DashMap`, delivery through a mutex-guarded outbox.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    by_node: DashMap<NodeId, IndexSet<Subscriber>>,
    outbox: Mutex<Vec<Notification>>,
    next_listener: AtomicU64,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_listener(&self) -> ListenerId {
        ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns `true` when the registration is new.
    pub fn subscribe(&self, node: NodeId, subscriber: Subscriber) -> bool {
        self.by_node.entry(node).or_default().insert(subscriber)
    }

    pub fn unsubscribe(&self, node: NodeId, subscriber: &Subscriber) -> bool {
        let removed = self
            .by_node
            .get_mut(&node)
            .map(|mut set| set.shift_remove(subscriber))
            .unwrap_or(false);
        self.by_node.remove_if(&node, |_, set| set.is_empty());
        removed
    }

    pub fn subscribers(&self, node: NodeId) -> Vec<Subscriber> {
        self.by_node
            .get(&node)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_subscribers(&self, node: NodeId) -> bool {
        self.by_node.get(&node).is_some_and(|set| !set.is_empty())
    }

    /// Queue `event` for every current subscriber of `node`.
    pub fn notify(&self, node: NodeId, event: TreeEvent) {
        let subscribers = self.subscribers(node);
        if subscribers.is_empty() {
            return;
        }
        let mut outbox = self.outbox.lock();
        outbox.extend(
            subscribers
                .into_iter()
                .map(|subscriber| Notification { subscriber, event }),
        );
    }

    /// Drop every registration on `node`, returning what was registered.
    pub fn clear(&self, node: NodeId) -> Vec<Subscriber> {
        self.by_node
            .remove(&node)
            .map(|(_, set)| set.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.outbox.lock())
    }

    pub fn pending(&self) -> usize {
        self.outbox.lock().len()
    }

    /// Total number of registrations across all nodes.
    pub fn registration_count(&self) -> usize {
        self.by_node.iter().map(|entry| entry.value().len()).sum()
    }
}
