//! The mapping service: the single entry point for reading and changing the
//! redirect mapping.
//!
//! [`MappingService`] wraps a [`Repository`](kurz_core::Repository) and a
//! [`Generator`](kurz_generator::Generator) and implements the
//! [`Mapping`](kurz_core::Mapping) trait that the command line tool and the
//! redirect handler are written against.

pub mod service;

pub use kurz_core::{Mapping, MappingError};
pub use service::MappingService;
