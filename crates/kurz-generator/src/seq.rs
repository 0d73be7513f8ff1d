use crate::Generator;
use kurz_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A predictable short code generator backed by a counter.
///
/// Produces `<prefix>000000`, `<prefix>000001`, ... which makes it the
/// generator of choice wherever the assigned code must be known up front.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a generator counting from zero.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a generator counting from `offset`.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::generated(format!("{}{:06}", self.prefix, count))
    }
}
