use crate::error::MappingError;
use crate::repository::RedirectRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, MappingError>;

/// The operations the command line tool and the redirect handler perform
/// against the redirect mapping.
#[async_trait]
pub trait Mapping: Send + Sync + 'static {
    /// Stores `url` under `code`, or under a generated code if `code` is `None`.
    /// An existing record with the same code is replaced and its counter reset.
    /// Returns the code the record was stored under.
    async fn append(&self, code: Option<ShortCode>, url: String) -> Result<ShortCode>;

    /// Deletes the record stored under `code`.
    /// Returns `Err(NotFound)` if there is no such record.
    async fn delete(&self, code: &ShortCode) -> Result<()>;

    /// Lists every record, ordered by short code.
    async fn list(&self) -> Result<Vec<(ShortCode, RedirectRecord)>>;

    /// Resolves `code` and counts the hit.
    /// Returns `None` if the code does not exist.
    async fn lookup_and_touch(&self, code: &ShortCode) -> Result<Option<RedirectRecord>>;
}
