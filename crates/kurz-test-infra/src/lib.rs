//! Fixtures shared by the integration tests of the workspace.

pub mod error;
pub mod store;

pub use error::{Result, TestInfraError};
pub use store::{StoreConfig, TempStore};
