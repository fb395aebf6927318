use super::{StarredStorage, StorageError};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory storage. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<BTreeSet<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that already holds `starred`.
    pub fn with_entries<I, S>(starred: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Mutex::new(starred.into_iter().map(Into::into).collect())),
            fail_writes: Arc::default(),
        }
    }

    /// When set, every `save` fails with [`StorageError::Unavailable`] and
    /// leaves the stored set untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Replaces the stored set directly, bypassing any actor. Simulates a
    /// write from another process or device.
    pub fn replace(&self, starred: BTreeSet<String>) -> Result<(), StorageError> {
        *self.lock()? = starred;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeSet<String>>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl StarredStorage for MemoryStorage {
    async fn load(&self) -> Result<BTreeSet<String>, StorageError> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, starred: &BTreeSet<String>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory storage rejecting writes".to_string(),
            ));
        }
        *self.lock()? = starred.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        let set: BTreeSet<String> = ["component:default/a".to_string()].into();
        storage.save(&set).await.unwrap();

        assert_eq!(other.load().await.unwrap(), set);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_set() {
        let storage = MemoryStorage::with_entries(["component:default/a"]);
        storage.set_fail_writes(true);

        let result = storage.save(&BTreeSet::new()).await;
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert_eq!(storage.load().await.unwrap().len(), 1);
    }
}
