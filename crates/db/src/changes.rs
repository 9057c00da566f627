//! Collection change hub.
//!
//! Models the original system's live snapshot listeners: interested parties
//! subscribe once, and every repository mutation publishes a small event
//! naming the collection that changed. Consumers re-read the full collection
//! snapshot on each event, so a lagged subscriber simply resyncs on the next
//! one.

use std::str::FromStr;

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Channel capacity; events are tiny and consumers resync from the database,
/// so overflow only costs a redundant refresh.
const CHANNEL_CAPACITY: usize = 64;

/// The named collections a listener can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Affiliate roster.
    Affiliates,
    /// Supplier roster.
    Suppliers,
    /// Product inventory.
    Products,
    /// Reported sales.
    Sales,
}

impl Collection {
    /// Stable wire name of the collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affiliates => "affiliates",
            Self::Suppliers => "suppliers",
            Self::Products => "products",
            Self::Sales => "sales",
        }
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "affiliates" => Ok(Self::Affiliates),
            "suppliers" => Ok(Self::Suppliers),
            "products" => Ok(Self::Products),
            "sales" => Ok(Self::Sales),
            other => Err(format!("Unknown collection: {other}")),
        }
    }
}

/// What happened to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    /// A document was inserted.
    Created,
    /// A document was updated in place.
    Updated,
    /// A document was removed.
    Deleted,
}

/// One mutation observed on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    /// Collection the mutation touched.
    pub collection: Collection,
    /// Kind of mutation.
    pub op: ChangeOp,
    /// ID of the affected document.
    pub id: Uuid,
}

/// Broadcast hub carrying [`ChangeEvent`]s to all current subscribers.
#[derive(Debug, Clone)]
pub struct ChangeHub {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeHub {
    /// Creates a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publishes a change. Having no subscribers is not an error.
    pub fn publish(&self, collection: Collection, op: ChangeOp, id: Uuid) {
        tracing::trace!(collection = collection.as_str(), ?op, %id, "collection changed");
        let _ = self.tx.send(ChangeEvent { collection, op, id });
    }

    /// Registers a new subscriber. Dropping the receiver unregisters it.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let hub = ChangeHub::new();
        let mut rx = hub.subscribe();

        let id = Uuid::new_v4();
        hub.publish(Collection::Products, ChangeOp::Created, id);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.collection, Collection::Products);
        assert_eq!(event.op, ChangeOp::Created);
        assert_eq!(event.id, id);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let hub = ChangeHub::new();
        hub.publish(Collection::Sales, ChangeOp::Deleted, Uuid::new_v4());
    }

    #[tokio::test]
    async fn test_dropped_receiver_unsubscribes() {
        let hub = ChangeHub::new();
        let rx = hub.subscribe();
        drop(rx);
        // No receivers left; publishing must not panic.
        hub.publish(Collection::Affiliates, ChangeOp::Updated, Uuid::new_v4());
    }

    #[test]
    fn test_collection_round_trip() {
        for collection in [
            Collection::Affiliates,
            Collection::Suppliers,
            Collection::Products,
            Collection::Sales,
        ] {
            assert_eq!(collection.as_str().parse::<Collection>(), Ok(collection));
        }
        assert!("users".parse::<Collection>().is_err());
    }
}
