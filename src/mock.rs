//! # Mocks & Testing Guide
//!
//! Two levels of test double, matching two kinds of test.
//!
//! | Double | Use Case |
//! |--------|----------|
//! | [`MockStarredEntitiesApi`] | Code that *consumes* the API (UI logic, registries). Behaves like the real thing, in memory, no tasks. |
//! | [`create_mock_client`] | Code that drives a [`StarredEntitiesClient`] and must see exactly which requests it sends. |
//!
//! ## Pattern 0: Consumer Test (Pure Mock)
//!
//! ```rust
//! use starred_entities::api::StarredEntitiesApi;
//! use starred_entities::mock::MockStarredEntitiesApi;
//! use starred_entities::model::EntityRef;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockStarredEntitiesApi::new();
//!     let a: EntityRef = "component:default/a".parse().unwrap();
//!
//!     api.toggle_starred(&a).await.unwrap();
//!     assert!(api.is_starred(&a));
//! }
//! ```
//!
//! ## Pattern 1: Request-Level Test
//!
//! ```rust
//! use starred_entities::api::StarredEntitiesApi;
//! use starred_entities::mock::{create_mock_client, expect_star};
//! use starred_entities::model::EntityRef;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver, _publisher) = create_mock_client(10);
//!     let task = tokio::spawn(async move {
//!         let entity_ref: EntityRef = "group:default/a".parse().unwrap();
//!         client.star(&entity_ref).await
//!     });
//!
//!     let (entity_ref, responder) = expect_star(&mut receiver).await.unwrap();
//!     assert_eq!(entity_ref.as_str(), "group:default/a");
//!     responder.send(Ok(())).unwrap();
//!     assert!(task.await.unwrap().is_ok());
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! [`MockStarredEntitiesApi::fail_next_write`] makes the next changing
//! mutation fail with the given storage error, leaving the set and subscribers
//! untouched, just like the actor does when its storage rejects a write.

use crate::api::StarredEntitiesApi;
use crate::clients::StarredEntitiesClient;
use crate::model::{EntityRef, StarredEntitiesSnapshot};
use crate::observe::StarredEntitiesStream;
use crate::starred_actor::{Response, StarredError, StarredRequest};
use crate::storage::StorageError;
use async_trait::async_trait;
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Mutex, PoisonError};
use tokio::sync::{mpsc, watch};

// =============================================================================
// IN-MEMORY API
// =============================================================================

/// In-memory [`StarredEntitiesApi`] with the same idempotence and emission
/// rules as the actor.
#[derive(Debug)]
pub struct MockStarredEntitiesApi {
    starred: Mutex<BTreeSet<String>>,
    failures: Mutex<VecDeque<StorageError>>,
    publisher: watch::Sender<StarredEntitiesSnapshot>,
}

impl Default for MockStarredEntitiesApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStarredEntitiesApi {
    pub fn new() -> Self {
        Self::with_starred(Vec::<String>::new())
    }

    /// Starts with `starred` already starred. Entries are normalized to
    /// canonical entity references; ones that do not parse are dropped.
    pub fn with_starred<I, S>(starred: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let starred: BTreeSet<String> = starred
            .into_iter()
            .map(Into::<String>::into)
            .filter_map(|raw| EntityRef::parse(&raw).ok())
            .map(String::from)
            .collect();
        let (publisher, _) = watch::channel(StarredEntitiesSnapshot::new(starred.clone()));
        Self {
            starred: Mutex::new(starred),
            failures: Mutex::new(VecDeque::new()),
            publisher,
        }
    }

    /// Queues a failure for the next mutation that would change the set.
    pub fn fail_next_write(&self, error: StorageError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
    }

    /// The current set.
    pub fn starred(&self) -> BTreeSet<String> {
        self.starred.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn apply(&self, entity_ref: &EntityRef, star: Option<bool>) -> Result<(), StarredError> {
        let mut starred = self.starred.lock().unwrap_or_else(PoisonError::into_inner);
        let currently = starred.contains(entity_ref.as_str());
        let target = star.unwrap_or(!currently);
        if currently == target {
            return Ok(());
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(error) = failure {
            return Err(StarredError::Storage(error));
        }

        if target {
            starred.insert(entity_ref.to_string());
        } else {
            starred.remove(entity_ref.as_str());
        }
        self.publisher
            .send_replace(StarredEntitiesSnapshot::new(starred.clone()));
        Ok(())
    }
}

#[async_trait]
impl StarredEntitiesApi for MockStarredEntitiesApi {
    async fn toggle_starred(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        self.apply(entity_ref, None)
    }

    async fn star(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        self.apply(entity_ref, Some(true))
    }

    async fn unstar(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        self.apply(entity_ref, Some(false))
    }

    fn starred_entities(&self) -> StarredEntitiesStream {
        StarredEntitiesStream::new(self.publisher.subscribe())
    }
}

// =============================================================================
// REQUEST-LEVEL HELPERS
// =============================================================================

/// Creates a client wired to channels the test controls.
///
/// Returns the client, the receiver its requests arrive on, and the sender
/// that feeds its snapshot subscriptions.
pub fn create_mock_client(
    buffer_size: usize,
) -> (
    StarredEntitiesClient,
    mpsc::Receiver<StarredRequest>,
    watch::Sender<StarredEntitiesSnapshot>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, snapshots) = watch::channel(StarredEntitiesSnapshot::default());
    (
        StarredEntitiesClient::new(sender, snapshots),
        receiver,
        publisher,
    )
}

/// Helper to verify that the next message is a Star request
pub async fn expect_star(
    receiver: &mut mpsc::Receiver<StarredRequest>,
) -> Option<(EntityRef, Response<()>)> {
    match receiver.recv().await {
        Some(StarredRequest::Star {
            entity_ref,
            respond_to,
        }) => Some((entity_ref, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Unstar request
pub async fn expect_unstar(
    receiver: &mut mpsc::Receiver<StarredRequest>,
) -> Option<(EntityRef, Response<()>)> {
    match receiver.recv().await {
        Some(StarredRequest::Unstar {
            entity_ref,
            respond_to,
        }) => Some((entity_ref, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Toggle request
pub async fn expect_toggle(
    receiver: &mut mpsc::Receiver<StarredRequest>,
) -> Option<(EntityRef, Response<()>)> {
    match receiver.recv().await {
        Some(StarredRequest::Toggle {
            entity_ref,
            respond_to,
        }) => Some((entity_ref, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_ref(raw: &str) -> EntityRef {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn test_mock_api_scenario() {
        let api = MockStarredEntitiesApi::new();
        let a = entity_ref("component:default/a");

        api.star(&a).await.unwrap();
        assert_eq!(api.starred(), BTreeSet::from([a.to_string()]));
        api.toggle_starred(&a).await.unwrap();
        assert!(api.starred().is_empty());
        api.toggle_starred(&a).await.unwrap();
        assert!(api.is_starred(&a));
        api.unstar(&a).await.unwrap();
        assert!(!api.is_starred(&a));
    }

    #[tokio::test]
    async fn test_mock_api_failure_leaves_state() {
        let api = MockStarredEntitiesApi::with_starred(["component:default/a"]);
        let mut stream = api.starred_entities();
        assert_eq!(stream.next().await.unwrap().len(), 1);

        api.fail_next_write(StorageError::Unavailable("offline".into()));
        let result = api.unstar(&entity_ref("component:default/a")).await;
        assert!(matches!(result, Err(StarredError::Storage(_))));
        assert_eq!(api.starred().len(), 1);
        assert_eq!(stream.current().len(), 1);

        // The failure was consumed; the retry goes through.
        api.unstar(&entity_ref("component:default/a")).await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[test]
    fn test_seeded_entries_are_canonical() {
        let api = MockStarredEntitiesApi::with_starred(["Component:A", "not-a-ref"]);

        assert_eq!(api.starred(), BTreeSet::from(["component:default/a".to_string()]));
        assert!(api.is_starred(&entity_ref("component:default/a")));
        assert!(api.starred_entities().current().contains(&entity_ref("component:a")));
    }

    #[tokio::test]
    async fn test_no_op_does_not_consume_failure() {
        let api = MockStarredEntitiesApi::new();
        api.fail_next_write(StorageError::Unavailable("offline".into()));

        api.unstar(&entity_ref("component:default/a")).await.unwrap();
        assert!(api.star(&entity_ref("component:default/a")).await.is_err());
    }

    #[tokio::test]
    async fn test_expect_helpers_reject_other_requests() {
        let (client, mut receiver, _publisher) = create_mock_client(10);
        tokio::spawn(async move {
            let _ = client.unstar(&entity_ref("component:default/a")).await;
        });

        assert!(expect_star(&mut receiver).await.is_none());
    }
}
