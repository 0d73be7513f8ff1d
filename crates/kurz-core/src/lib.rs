//! Core types and traits for the kurz URL shortener.
//!
//! This crate provides the types shared by the storage backends, the
//! mapping service, the redirect handler and the command line tool.

pub mod error;
pub mod mapping;
pub mod repository;
pub mod shortcode;

pub use error::{CoreError, MappingError, StorageError};
pub use mapping::Mapping;
pub use repository::{ReadRepository, RedirectRecord, Repository};
pub use shortcode::ShortCode;
