//! # Starred Entities Client
//!
//! The client half of the actor: a cheap, cloneable handle that turns
//! [`StarredEntitiesApi`] calls into [`StarredRequest`] messages and hands out
//! snapshot subscriptions.
use crate::api::StarredEntitiesApi;
use crate::model::{EntityRef, StarredEntitiesSnapshot};
use crate::observe::StarredEntitiesStream;
use crate::starred_actor::{Response, StarredError, StarredRequest};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the [`StarredActor`](crate::starred_actor::StarredActor).
///
/// * **Cloneable** - holds a sender and a snapshot receiver, so cloning is inexpensive.
/// * **Async API** - mutations resolve to `Result<(), StarredError>` once the actor answers.
#[derive(Clone, Debug)]
pub struct StarredEntitiesClient {
    sender: mpsc::Sender<StarredRequest>,
    snapshots: watch::Receiver<StarredEntitiesSnapshot>,
}

impl StarredEntitiesClient {
    pub fn new(
        sender: mpsc::Sender<StarredRequest>,
        snapshots: watch::Receiver<StarredEntitiesSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Reloads the starred set from storage, publishing it if it changed.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), StarredError> {
        debug!("Sending request");
        self.request(|respond_to| StarredRequest::Refresh { respond_to })
            .await
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> StarredEntitiesSnapshot {
        self.snapshots.borrow().clone()
    }

    async fn request<F>(&self, build: F) -> Result<(), StarredError>
    where
        F: FnOnce(Response<()>) -> StarredRequest,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StarredError::ActorClosed)?;
        response.await.map_err(|_| StarredError::ActorDropped)?
    }
}

#[async_trait]
impl StarredEntitiesApi for StarredEntitiesClient {
    #[instrument(skip_all, fields(entity_ref = %entity_ref))]
    async fn toggle_starred(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        debug!("Sending request");
        let entity_ref = entity_ref.clone();
        self.request(|respond_to| StarredRequest::Toggle {
            entity_ref,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(entity_ref = %entity_ref))]
    async fn star(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        debug!("Sending request");
        let entity_ref = entity_ref.clone();
        self.request(|respond_to| StarredRequest::Star {
            entity_ref,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(entity_ref = %entity_ref))]
    async fn unstar(&self, entity_ref: &EntityRef) -> Result<(), StarredError> {
        debug!("Sending request");
        let entity_ref = entity_ref.clone();
        self.request(|respond_to| StarredRequest::Unstar {
            entity_ref,
            respond_to,
        })
        .await
    }

    fn starred_entities(&self) -> StarredEntitiesStream {
        StarredEntitiesStream::new(self.snapshots.clone())
    }

    fn is_starred(&self, entity_ref: &EntityRef) -> bool {
        self.snapshots.borrow().contains(entity_ref)
    }
}
