use async_trait::async_trait;
use dashmap::DashMap;
use kurz_core::repository::{ReadRepository, RedirectRecord, Repository, Result};
use kurz_core::ShortCode;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Nothing is persisted. Increments go through the entry's shard lock, so
/// concurrent touches of the same code never lose a hit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, RedirectRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<RedirectRecord>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<(ShortCode, RedirectRecord)>> {
        Ok(self
            .storage
            .iter()
            .map(|entry| {
                (
                    ShortCode::new_unchecked(entry.key().as_str()),
                    entry.value().clone(),
                )
            })
            .collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, record: RedirectRecord) -> Result<()> {
        self.storage.insert(code.as_str().to_owned(), record);
        Ok(())
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.remove(code.as_str()).is_some())
    }

    async fn touch(&self, code: &ShortCode) -> Result<Option<RedirectRecord>> {
        let Some(mut entry) = self.storage.get_mut(code.as_str()) else {
            return Ok(None);
        };

        entry.used += 1;
        Ok(Some(entry.value().clone()))
    }
}
