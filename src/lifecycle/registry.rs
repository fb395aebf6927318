//! # API Registry
//!
//! A small, explicit dependency-injection container. Implementations are
//! registered under an [`ApiRef`] and looked up by the same reference; the
//! reference's type parameter makes the lookup type-safe.
//!
//! There is no global instance. The application builds a registry at startup
//! and passes it (or the individual `Arc`s) to whatever needs them.

use crate::api_ref::ApiRef;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("API already registered: {0}")]
    Duplicate(&'static str),

    #[error("Invalid API id: {0:?}")]
    InvalidId(&'static str),

    #[error("No implementation registered for API: {0}")]
    Missing(&'static str),
}

/// Maps API ids to their implementations.
#[derive(Default)]
pub struct ApiRegistry {
    apis: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `api` under `api_ref`. Each id can be registered once.
    pub fn register<T>(&mut self, api_ref: ApiRef<T>, api: Arc<T>) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !api_ref.is_valid() {
            return Err(RegistryError::InvalidId(api_ref.id()));
        }
        if self.apis.contains_key(api_ref.id()) {
            return Err(RegistryError::Duplicate(api_ref.id()));
        }
        debug!(api = api_ref.id(), "Registered");
        self.apis.insert(api_ref.id(), Box::new(api));
        Ok(())
    }

    /// Looks up the implementation registered under `api_ref`.
    pub fn get<T>(&self, api_ref: ApiRef<T>) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.apis
            .get(api_ref.id())
            .and_then(|api| api.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Like [`get`](Self::get), but a missing implementation is an error.
    pub fn require<T>(&self, api_ref: ApiRef<T>) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get(api_ref)
            .ok_or(RegistryError::Missing(api_ref.id()))
    }

    pub fn len(&self) -> usize {
        self.apis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}

impl std::fmt::Debug for ApiRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRegistry")
            .field("apis", &self.apis.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StarredEntitiesApi;
    use crate::api_ref::STARRED_ENTITIES_API_REF;
    use crate::mock::MockStarredEntitiesApi;
    use crate::model::EntityRef;

    #[tokio::test]
    async fn test_register_and_resolve_starred_api() {
        let mut registry = ApiRegistry::new();
        let api: Arc<dyn StarredEntitiesApi> = Arc::new(MockStarredEntitiesApi::new());
        registry.register(STARRED_ENTITIES_API_REF, api).unwrap();

        let resolved = registry.require(STARRED_ENTITIES_API_REF).unwrap();
        let a: EntityRef = "component:default/a".parse().unwrap();
        resolved.star(&a).await.unwrap();

        let again = registry.get(STARRED_ENTITIES_API_REF).unwrap();
        assert!(again.is_starred(&a));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_and_missing() {
        let mut registry = ApiRegistry::new();
        assert_eq!(
            registry.require(STARRED_ENTITIES_API_REF).err(),
            Some(RegistryError::Missing("catalog-react.starred-entities"))
        );

        let api: Arc<dyn StarredEntitiesApi> = Arc::new(MockStarredEntitiesApi::new());
        registry.register(STARRED_ENTITIES_API_REF, api.clone()).unwrap();
        assert_eq!(
            registry.register(STARRED_ENTITIES_API_REF, api),
            Err(RegistryError::Duplicate("catalog-react.starred-entities"))
        );
    }

    #[test]
    fn test_invalid_id_rejected() {
        const BAD: ApiRef<String> = ApiRef::new("Not Valid");
        let mut registry = ApiRegistry::new();
        assert_eq!(
            registry.register(BAD, Arc::new("x".to_string())),
            Err(RegistryError::InvalidId("Not Valid"))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_same_id_different_type_does_not_resolve() {
        const AS_STRING: ApiRef<String> = ApiRef::new("core.value");
        const AS_NUMBER: ApiRef<u32> = ApiRef::new("core.value");

        let mut registry = ApiRegistry::new();
        registry.register(AS_STRING, Arc::new("x".to_string())).unwrap();
        assert!(registry.get(AS_NUMBER).is_none());
        assert_eq!(registry.get(AS_STRING).as_deref(), Some(&"x".to_string()));
    }
}
