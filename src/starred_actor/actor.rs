//! # Starred Entities Actor
//!
//! The server half of the starred-entities API. It exclusively owns the starred
//! set, processes requests one at a time and publishes a fresh snapshot after
//! every committed change.

use super::error::StarredError;
use super::message::StarredRequest;
use crate::clients::StarredEntitiesClient;
use crate::config::{StarredConfig, ToggleStrategy};
use crate::model::{EntityRef, StarredEntitiesSnapshot};
use crate::storage::StarredStorage;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The actor that manages one user's starred set.
///
/// # Concurrency Model
/// Requests are handled sequentially by [`run`](Self::run), so the set needs no
/// lock and a toggle's read-decide-write cannot interleave with another request
/// on the same actor. Slow storage delays the queue behind it, not other actors.
///
/// # Write-through
/// A mutation that would change the set is saved first. Only when the save
/// succeeds is the set replaced and a snapshot published; a failed save leaves
/// both the set and every subscriber untouched. A mutation that would not change
/// the set resolves immediately without touching storage or subscribers.
///
/// Every save writes the whole set, so nothing is saved until the set has been
/// loaded at least once. If the initial load failed, the next mutation retries
/// it and is rejected with the storage error if the retry fails too.
///
/// # Usage Pattern
///
/// ```rust
/// use starred_entities::api::StarredEntitiesApi;
/// use starred_entities::config::StarredConfig;
/// use starred_entities::model::EntityRef;
/// use starred_entities::starred_actor;
/// use starred_entities::storage::MemoryStorage;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     // 1. Create
///     let (actor, client) = starred_actor::new(&StarredConfig::default());
///
///     // 2. Wire & Run
///     tokio::spawn(actor.run(Arc::new(MemoryStorage::new())));
///
///     // 3. Use
///     let entity_ref: EntityRef = "component:default/checkout".parse().unwrap();
///     client.star(&entity_ref).await.unwrap();
///     assert!(client.is_starred(&entity_ref));
/// }
/// ```
pub struct StarredActor {
    receiver: mpsc::Receiver<StarredRequest>,
    publisher: watch::Sender<StarredEntitiesSnapshot>,
    starred: BTreeSet<String>,
    loaded: bool,
    toggle_strategy: ToggleStrategy,
}

impl StarredActor {
    /// Creates a new `StarredActor` and its associated client.
    ///
    /// The actor does nothing until [`run`](Self::run) is awaited or spawned.
    /// Requests sent before that wait in the channel.
    pub fn new(config: &StarredConfig) -> (Self, StarredEntitiesClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let (publisher, snapshots) = watch::channel(StarredEntitiesSnapshot::default());
        let actor = Self {
            receiver,
            publisher,
            starred: BTreeSet::new(),
            loaded: false,
            toggle_strategy: config.toggle_strategy,
        };
        (actor, StarredEntitiesClient::new(sender, snapshots))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// Storage is injected here rather than at construction. The set is loaded
    /// once before the first request is handled, so any answered request
    /// implies the initial load has been attempted. If that load fails the
    /// actor publishes nothing and retries before the first mutation.
    pub async fn run(mut self, storage: Arc<dyn StarredStorage>) {
        info!(toggle_strategy = ?self.toggle_strategy, "Actor started");

        match self.reload(storage.as_ref()).await {
            Ok(()) => info!(size = self.starred.len(), "Loaded"),
            Err(_) => warn!("Initial load failed, retrying on first change"),
        }

        while let Some(msg) = self.receiver.recv().await {
            debug!(operation = msg.operation(), "Request");
            match msg {
                StarredRequest::Star {
                    entity_ref,
                    respond_to,
                } => {
                    let result = self.apply(storage.as_ref(), &entity_ref, true).await;
                    let _ = respond_to.send(result);
                }
                StarredRequest::Unstar {
                    entity_ref,
                    respond_to,
                } => {
                    let result = self.apply(storage.as_ref(), &entity_ref, false).await;
                    let _ = respond_to.send(result);
                }
                StarredRequest::Toggle {
                    entity_ref,
                    respond_to,
                } => {
                    let result = self.toggle(storage.as_ref(), &entity_ref).await;
                    let _ = respond_to.send(result);
                }
                StarredRequest::Refresh { respond_to } => {
                    let result = self.reload(storage.as_ref()).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(size = self.starred.len(), "Shutdown");
    }

    async fn apply(
        &mut self,
        storage: &dyn StarredStorage,
        entity_ref: &EntityRef,
        starred: bool,
    ) -> Result<(), StarredError> {
        self.ensure_loaded(storage).await?;
        if self.starred.contains(entity_ref.as_str()) == starred {
            debug!(%entity_ref, starred, "Unchanged");
            return Ok(());
        }

        let mut candidate = self.starred.clone();
        if starred {
            candidate.insert(entity_ref.to_string());
        } else {
            candidate.remove(entity_ref.as_str());
        }

        if let Err(e) = storage.save(&candidate).await {
            warn!(%entity_ref, starred, error = %e, "Save failed");
            return Err(e.into());
        }

        self.starred = candidate;
        self.publish();
        info!(%entity_ref, starred, size = self.starred.len(), "Updated");
        Ok(())
    }

    async fn toggle(
        &mut self,
        storage: &dyn StarredStorage,
        entity_ref: &EntityRef,
    ) -> Result<(), StarredError> {
        match self.toggle_strategy {
            ToggleStrategy::Fresh => self.reload(storage).await?,
            ToggleStrategy::Cached => self.ensure_loaded(storage).await?,
        }
        let starred = !self.starred.contains(entity_ref.as_str());
        self.apply(storage, entity_ref, starred).await
    }

    async fn reload(&mut self, storage: &dyn StarredStorage) -> Result<(), StarredError> {
        let loaded = storage.load().await.map_err(|e| {
            warn!(error = %e, "Reload failed");
            StarredError::from(e)
        })?;

        self.loaded = true;
        if loaded != self.starred {
            self.starred = loaded;
            self.publish();
            info!(size = self.starred.len(), "Reloaded");
        }
        Ok(())
    }

    async fn ensure_loaded(&mut self, storage: &dyn StarredStorage) -> Result<(), StarredError> {
        if self.loaded {
            return Ok(());
        }
        self.reload(storage).await
    }

    fn publish(&self) {
        self.publisher
            .send_replace(StarredEntitiesSnapshot::new(self.starred.clone()));
    }
}
