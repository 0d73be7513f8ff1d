//! Storage backends for the redirect mapping.

pub mod memory;
pub mod yaml;

pub use kurz_core::repository::{ReadRepository, RedirectRecord, Repository, Result};
pub use kurz_core::StorageError;
pub use memory::InMemoryRepository;
pub use yaml::{StoreDocument, YamlFileRepository, DEFAULT_STORE_PATH};
