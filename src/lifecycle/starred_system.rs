use super::registry::{ApiRegistry, RegistryError};
use crate::api::StarredEntitiesApi;
use crate::api_ref::STARRED_ENTITIES_API_REF;
use crate::clients::StarredEntitiesClient;
use crate::config::StarredConfig;
use crate::starred_actor;
use crate::storage::{JsonFileStorage, MemoryStorage, StarredStorage};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Runtime orchestrator for the starred-entities actor.
///
/// `StarredSystem` is responsible for:
/// - **Lifecycle Management**: starting the actor and stopping it cleanly
/// - **Dependency Wiring**: handing the storage backend to the actor at `run` time
/// - **API Exposure**: publishing the client under its [`ApiRef`](crate::api_ref::ApiRef)
///
/// # Example
///
/// ```rust
/// use starred_entities::api::StarredEntitiesApi;
/// use starred_entities::config::StarredConfig;
/// use starred_entities::lifecycle::StarredSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = StarredSystem::from_config(&StarredConfig::default());
///
///     let entity_ref = "component:default/checkout".parse().unwrap();
///     system.client.toggle_starred(&entity_ref).await.unwrap();
///     assert!(system.client.is_starred(&entity_ref));
///
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct StarredSystem {
    /// Client for interacting with the actor
    pub client: StarredEntitiesClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl StarredSystem {
    /// Creates the actor and spawns it with the given storage.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &StarredConfig, storage: Arc<dyn StarredStorage>) -> Self {
        let (actor, client) = starred_actor::new(config);
        let handle = tokio::spawn(actor.run(storage));
        Self { client, handle }
    }

    /// Like [`new`](Self::new), choosing the storage from `config`: a JSON file
    /// when `storage_path` is set, memory otherwise.
    pub fn from_config(config: &StarredConfig) -> Self {
        let storage: Arc<dyn StarredStorage> = match &config.storage_path {
            Some(path) => {
                info!(path = %path.display(), "Using file storage");
                Arc::new(JsonFileStorage::new(path))
            }
            None => {
                info!("Using memory storage");
                Arc::new(MemoryStorage::new())
            }
        };
        Self::new(config, storage)
    }

    /// Builds a registry with this system's client registered under
    /// [`STARRED_ENTITIES_API_REF`].
    ///
    /// The registry holds a client clone; drop it before [`shutdown`](Self::shutdown).
    pub fn registry(&self) -> Result<ApiRegistry, RegistryError> {
        let mut registry = ApiRegistry::new();
        let api: Arc<dyn StarredEntitiesApi> = Arc::new(self.client.clone());
        registry.register(STARRED_ENTITIES_API_REF, api)?;
        Ok(registry)
    }

    /// Gracefully shuts down the actor.
    ///
    /// Drops this system's client, which closes the request channel once every
    /// other clone has been dropped too, then waits for the actor task. Any
    /// clone still alive elsewhere keeps the actor running and this call waiting.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Actor task failed");
            return Err(e);
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
