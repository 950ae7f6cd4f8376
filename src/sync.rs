use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::Booking;

/// Full-replacement booking snapshots are cheap to drop: a lagged
/// subscriber just waits for the next one, so a small buffer suffices.
const SNAPSHOT_BUFFER: usize = 16;

pub type Snapshot = Arc<Vec<Booking>>;

/// Fan-out channel for the live booking collection.
///
/// Every committed mutation publishes the full current set; subscribers
/// receive each snapshot as a complete replacement. Cancelling a
/// subscription is dropping its receiver, which is deterministic and
/// trivially idempotent.
#[derive(Clone)]
pub struct SnapshotHub {
    tx: broadcast::Sender<Snapshot>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SNAPSHOT_BUFFER);
        Self { tx }
    }

    /// Push a snapshot to all live subscribers. Returns how many received
    /// it; zero subscribers is not an error.
    pub fn publish(&self, bookings: Vec<Booking>) -> usize {
        self.tx.send(Arc::new(bookings)).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SnapshotHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let hub = SnapshotHub::new();
        assert_eq!(hub.publish(vec![]), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_each_snapshot_and_drop_cancels() {
        let hub = SnapshotHub::new();
        let mut rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        assert_eq!(hub.publish(vec![]), 1);
        let snapshot = rx.recv().await.unwrap();
        assert!(snapshot.is_empty());

        drop(rx);
        assert_eq!(hub.subscriber_count(), 0);
        // Publishing after the last unsubscribe still succeeds.
        assert_eq!(hub.publish(vec![]), 0);
    }
}
