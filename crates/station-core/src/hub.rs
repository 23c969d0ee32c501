//! Fan-out notification hub for distributing `StationEvent` to subscribers.
//!
//! Each subscriber is issued an opaque monotonically increasing
//! [`SubscriberId`] on connect, so removal never depends on connection
//! identity. Delivery is best-effort: a subscriber whose channel has closed
//! is pruned during the broadcast that discovers it, and `broadcast` never
//! surfaces an error to the publisher.
//!
//! The subscriber set is guarded by a single exclusive lock held only across
//! structural changes and snapshots -- never across delivery -- so one slow
//! or dead subscriber cannot block `connect`/`disconnect` or other sends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use station_types::event::StationEvent;
use tokio::sync::{Mutex, mpsc};

/// Opaque handle identifying one hub subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live subscription: the issued id plus the receiving end of the
/// subscriber's private event channel. Dropping the receiver makes the
/// subscriber stale; it is pruned on the next broadcast that reaches it.
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::UnboundedReceiver<StationEvent>,
}

/// Best-effort fan-out hub, self-healing against dead subscribers.
pub struct NotificationHub {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::UnboundedSender<StationEvent>>>,
    next_id: AtomicU64,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new subscriber. Subsequent broadcasts include it.
    pub async fn connect(&self) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.lock().await.insert(id, sender);
        tracing::debug!(subscriber = %id, "hub subscriber connected");
        Subscription { id, receiver }
    }

    /// Remove a subscriber. Idempotent: removing an absent id is a no-op.
    pub async fn disconnect(&self, id: SubscriberId) {
        if self.subscribers.lock().await.remove(&id).is_some() {
            tracing::debug!(subscriber = %id, "hub subscriber disconnected");
        }
    }

    /// Deliver `event` to every connected subscriber.
    ///
    /// Takes a snapshot of the subscriber set so the lock is not held during
    /// delivery. Subscribers whose channel has closed are removed after the
    /// delivery pass. Never returns an error; failures are observable only
    /// as shrinkage of the subscriber set.
    pub async fn broadcast(&self, event: StationEvent) {
        let snapshot: Vec<(SubscriberId, mpsc::UnboundedSender<StationEvent>)> = {
            let subscribers = self.subscribers.lock().await;
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut stale = Vec::new();
        for (id, sender) in snapshot {
            if sender.send(event.clone()).is_err() {
                stale.push(id);
            }
        }

        for id in stale {
            tracing::debug!(subscriber = %id, "pruning stale hub subscriber");
            self.disconnect(id).await;
        }
    }

    /// Number of currently connected subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_types::agent::Agent;

    fn sample_event() -> StationEvent {
        StationEvent::AgentStatusChanged {
            agent: Agent::new("a1", "Worker1", "http://localhost:9001"),
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let hub = NotificationHub::new();
        let mut sub1 = hub.connect().await;
        let mut sub2 = hub.connect().await;

        hub.broadcast(sample_event()).await;

        assert!(matches!(
            sub1.receiver.recv().await,
            Some(StationEvent::AgentStatusChanged { .. })
        ));
        assert!(matches!(
            sub2.receiver.recv().await,
            Some(StationEvent::AgentStatusChanged { .. })
        ));
    }

    #[tokio::test]
    async fn ids_are_unique_and_monotonic() {
        let hub = NotificationHub::new();
        let a = hub.connect().await;
        let b = hub.connect().await;
        assert_ne!(a.id, b.id);
        assert!(b.id.0 > a.id.0);
    }

    #[tokio::test]
    async fn failed_deliveries_prune_exactly_the_dead_subscribers() {
        let hub = NotificationHub::new();

        let mut live = Vec::new();
        let mut dead = Vec::new();
        for i in 0..5 {
            let sub = hub.connect().await;
            if i < 2 {
                dead.push(sub);
            } else {
                live.push(sub);
            }
        }
        // Closing the receiving end is what a dead connection looks like.
        drop(dead);
        assert_eq!(hub.subscriber_count().await, 5);

        hub.broadcast(sample_event()).await;

        assert_eq!(hub.subscriber_count().await, 3);
        for sub in &mut live {
            assert!(
                matches!(
                    sub.receiver.try_recv(),
                    Ok(StationEvent::AgentStatusChanged { .. })
                ),
                "surviving subscriber must still receive the event"
            );
        }
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let hub = NotificationHub::new();
        let sub = hub.connect().await;
        hub.disconnect(sub.id).await;
        hub.disconnect(sub.id).await;
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn disconnected_subscriber_receives_nothing_further() {
        let hub = NotificationHub::new();
        let mut sub = hub.connect().await;
        hub.disconnect(sub.id).await;

        hub.broadcast(sample_event()).await;

        // Channel sender was dropped on disconnect, so recv ends.
        assert!(sub.receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn events_arrive_in_broadcast_order_per_subscriber() {
        let hub = NotificationHub::new();
        let mut sub = hub.connect().await;

        for name in ["first", "second", "third"] {
            hub.broadcast(StationEvent::AgentStatusChanged {
                agent: Agent::new("a1", name, "http://localhost:9001"),
            })
            .await;
        }

        for expected in ["first", "second", "third"] {
            match sub.receiver.recv().await {
                Some(StationEvent::AgentStatusChanged { agent }) => {
                    assert_eq!(agent.name, expected);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let hub = NotificationHub::new();
        hub.broadcast(sample_event()).await;

        let mut sub = hub.connect().await;
        hub.broadcast(sample_event()).await;

        assert!(sub.receiver.recv().await.is_some());
        assert!(sub.receiver.try_recv().is_err());
    }
}
