use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored redirect in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    /// The URL the short code redirects to.
    pub url: String,
    /// How many times the redirect has been followed.
    #[serde(default)]
    pub used: u64,
}

impl RedirectRecord {
    /// Creates a record that has never been used.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            used: 0,
        }
    }
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<RedirectRecord>>;

    /// Returns every stored record exactly once, in no particular order.
    async fn list(&self) -> Result<Vec<(ShortCode, RedirectRecord)>>;
}

/// A repository that can be mutated.
///
/// Every mutation must be durable by the time the call returns.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a record, replacing any record already stored under `code`.
    async fn insert(&self, code: &ShortCode, record: RedirectRecord) -> Result<()>;

    /// Deletes the record for a given short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;

    /// Increments the hit counter of `code` and returns the updated record.
    /// Returns `None` without writing anything if the code does not exist.
    async fn touch(&self, code: &ShortCode) -> Result<Option<RedirectRecord>>;
}
