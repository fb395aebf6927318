//! # Observing the Starred Set
//!
//! [`StarredEntitiesStream`] is the push side of the API. It wraps a
//! `tokio::sync::watch` receiver and adds one guarantee the raw receiver lacks:
//! the first [`next`](StarredEntitiesStream::next) on a new stream always
//! yields the current snapshot immediately, even if nothing has changed since.
//!
//! ## Delivery
//!
//! - Every subscriber has its own cursor; a slow subscriber never holds up another.
//! - Changes published faster than a subscriber reads them coalesce. The
//!   subscriber always wakes up to the *latest* snapshot, never a stale one.
//! - Dropping the stream unsubscribes.
//!
//! ```rust
//! use starred_entities::model::StarredEntitiesSnapshot;
//! use starred_entities::observe::StarredEntitiesStream;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, rx) = watch::channel(StarredEntitiesSnapshot::default());
//!     let mut stream = StarredEntitiesStream::new(rx);
//!
//!     // Initial snapshot arrives without any change.
//!     assert!(stream.next().await.unwrap().is_empty());
//!
//!     tx.send_replace(StarredEntitiesSnapshot::new(["component:default/a".to_string()].into()));
//!     assert_eq!(stream.next().await.unwrap().len(), 1);
//!
//!     drop(tx);
//!     assert!(stream.next().await.is_none());
//! }
//! ```

use crate::model::StarredEntitiesSnapshot;
use tokio::sync::watch;

/// A live sequence of [`StarredEntitiesSnapshot`]s.
#[derive(Debug)]
pub struct StarredEntitiesStream {
    receiver: watch::Receiver<StarredEntitiesSnapshot>,
    initial_delivered: bool,
}

impl StarredEntitiesStream {
    pub fn new(receiver: watch::Receiver<StarredEntitiesSnapshot>) -> Self {
        Self {
            receiver,
            initial_delivered: false,
        }
    }

    /// Waits for the next snapshot.
    ///
    /// The first call returns the current snapshot at once. Later calls wait
    /// for a change. Returns `None` once the producer is gone and every
    /// published change has been seen.
    pub async fn next(&mut self) -> Option<StarredEntitiesSnapshot> {
        if !self.initial_delivered {
            self.initial_delivered = true;
            return Some(self.receiver.borrow_and_update().clone());
        }

        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// The latest snapshot, without consuming a change.
    pub fn current(&self) -> StarredEntitiesSnapshot {
        self.receiver.borrow().clone()
    }

    /// Waits until a snapshot satisfies `predicate` and returns it. Checks the
    /// current snapshot first. Returns `None` if the producer goes away first.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<StarredEntitiesSnapshot>
    where
        F: FnMut(&StarredEntitiesSnapshot) -> bool,
    {
        self.initial_delivered = true;
        self.receiver
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .ok()
            .map(|snapshot| snapshot.clone())
    }
}

impl Clone for StarredEntitiesStream {
    /// A clone is a new subscription: it starts by yielding the current snapshot.
    fn clone(&self) -> Self {
        Self::new(self.receiver.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn snapshot(items: &[&str]) -> StarredEntitiesSnapshot {
        StarredEntitiesSnapshot::new(items.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>())
    }

    #[tokio::test]
    async fn test_initial_snapshot_then_changes() {
        let (tx, rx) = watch::channel(snapshot(&["a:default/x"]));
        let mut stream = StarredEntitiesStream::new(rx);

        assert_eq!(stream.next().await.unwrap(), snapshot(&["a:default/x"]));

        // No change yet: next must wait.
        let pending = tokio::time::timeout(Duration::from_millis(20), stream.next()).await;
        assert!(pending.is_err());

        tx.send_replace(snapshot(&[]));
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rapid_changes_coalesce_to_latest() {
        let (tx, rx) = watch::channel(snapshot(&[]));
        let mut stream = StarredEntitiesStream::new(rx);
        stream.next().await.unwrap();

        tx.send_replace(snapshot(&["a:default/1"]));
        tx.send_replace(snapshot(&["a:default/1", "a:default/2"]));

        assert_eq!(stream.next().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clone_is_independent_subscription() {
        let (tx, rx) = watch::channel(snapshot(&[]));
        let mut first = StarredEntitiesStream::new(rx);
        first.next().await.unwrap();

        tx.send_replace(snapshot(&["a:default/1"]));
        let mut second = first.clone();

        assert_eq!(second.next().await.unwrap().len(), 1);
        assert_eq!(first.next().await.unwrap().len(), 1);
        assert_eq!(first.current(), second.current());
    }

    #[tokio::test]
    async fn test_wait_for_and_close() {
        let (tx, rx) = watch::channel(snapshot(&[]));
        let mut stream = StarredEntitiesStream::new(rx);

        let producer = tokio::spawn(async move {
            tx.send_replace(snapshot(&["a:default/1"]));
            tx.send_replace(snapshot(&["a:default/1", "a:default/2"]));
        });

        let seen = stream.wait_for(|s| s.len() == 2).await.unwrap();
        assert_eq!(seen.len(), 2);

        producer.await.unwrap();
        assert!(stream.next().await.is_none());
    }
}
