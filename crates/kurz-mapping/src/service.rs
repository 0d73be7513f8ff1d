use async_trait::async_trait;
use kurz_core::{Mapping, MappingError, RedirectRecord, Repository, ShortCode};
use kurz_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A concrete implementation of the `Mapping` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Short code generation when the caller does not supply one
/// - URL validation
/// - Hit counting on lookup
///
/// Note: generated codes are not checked against existing records. A
/// colliding code replaces the older record, exactly like an explicit key.
#[derive(Debug, Clone)]
pub struct MappingService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R: Repository, G: Generator> MappingService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The only requirement on a target URL is that it is not blank.
    fn validate_url(url: &str) -> Result<(), MappingError> {
        if url.trim().is_empty() {
            return Err(MappingError::MissingUrl);
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Mapping for MappingService<R, G> {
    async fn append(
        &self,
        code: Option<ShortCode>,
        url: String,
    ) -> Result<ShortCode, MappingError> {
        Self::validate_url(&url)?;

        let code = match code {
            Some(code) => code,
            None => self.generator.generate().into(),
        };

        self.repository
            .insert(&code, RedirectRecord::new(url.as_str()))
            .await?;

        info!(code = %code, url = %url, "appended redirect");
        Ok(code)
    }

    async fn delete(&self, code: &ShortCode) -> Result<(), MappingError> {
        if !self.repository.delete(code).await? {
            debug!(code = %code, "nothing to delete");
            return Err(MappingError::NotFound(code.to_string()));
        }

        info!(code = %code, "deleted redirect");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<(ShortCode, RedirectRecord)>, MappingError> {
        let mut records = self.repository.list().await?;
        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }

    async fn lookup_and_touch(
        &self,
        code: &ShortCode,
    ) -> Result<Option<RedirectRecord>, MappingError> {
        trace!(code = %code, "resolving short code");

        let record = self.repository.touch(code).await?;
        match &record {
            Some(record) => {
                debug!(code = %code, url = %record.url, used = record.used, "resolved short code")
            }
            None => trace!(code = %code, "short code not found"),
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurz_generator::{RandomGenerator, SeqGenerator};
    use kurz_storage::{InMemoryRepository, ReadRepository, YamlFileRepository};
    use kurz_test_infra::{StoreConfig, TempStore};

    fn test_service() -> MappingService<InMemoryRepository, SeqGenerator> {
        MappingService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("k"))
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new(s).unwrap()
    }

    #[tokio::test]
    async fn append_with_generated_code() {
        let service = test_service();

        let code = service
            .append(None, "https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(code.as_str(), "k000000");
        assert!(matches!(code, ShortCode::Generated(_)));
    }

    #[tokio::test]
    async fn append_with_random_code() {
        let service = MappingService::new(InMemoryRepository::new(), RandomGenerator::default());

        let code = service
            .append(None, "https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(code.as_str().len(), 8);
        assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn append_with_custom_code() {
        let service = test_service();

        let code = service
            .append(Some(code("my-alias")), "https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(code.as_str(), "my-alias");
    }

    #[tokio::test]
    async fn append_without_url_fails() {
        let service = test_service();

        for url in ["", "   "] {
            let err = service.append(None, url.to_string()).await.unwrap_err();
            assert!(matches!(err, MappingError::MissingUrl));
            assert_eq!(err.to_string(), "missing url");
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_same_code_overwrites_and_resets_counter() {
        let service = test_service();

        service
            .append(Some(code("abc")), "https://one.example.com".to_string())
            .await
            .unwrap();
        service.lookup_and_touch(&code("abc")).await.unwrap();
        service
            .append(Some(code("abc")), "https://two.example.com".to_string())
            .await
            .unwrap();

        let records = service.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, RedirectRecord::new("https://two.example.com"));
    }

    #[tokio::test]
    async fn delete_existing() {
        let service = test_service();
        service
            .append(Some(code("abc")), "https://example.com".to_string())
            .await
            .unwrap();

        service.delete(&code("abc")).await.unwrap();

        assert!(service.lookup_and_touch(&code("abc")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let service = test_service();

        let err = service.delete(&code("nope")).await.unwrap_err();
        assert!(matches!(err, MappingError::NotFound(ref key) if key == "nope"));
    }

    #[tokio::test]
    async fn list_is_sorted_and_complete() {
        let service = test_service();
        for key in ["zeta", "alpha", "mid"] {
            service
                .append(Some(code(key)), format!("https://{key}.example.com"))
                .await
                .unwrap();
        }

        let keys: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|(code, _)| code.to_string())
            .collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn lookup_increments_once_per_call() {
        let service = test_service();
        service
            .append(Some(code("abc")), "https://example.com".to_string())
            .await
            .unwrap();

        for _ in 0..7 {
            service.lookup_and_touch(&code("abc")).await.unwrap().unwrap();
        }

        let record = service.repository().get(&code("abc")).await.unwrap().unwrap();
        assert_eq!(record.used, 7);
    }

    #[tokio::test]
    async fn lookup_nonexistent() {
        let service = test_service();

        assert!(service.lookup_and_touch(&code("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mutations_reach_the_store_file() {
        let store = TempStore::new(
            StoreConfig::builder()
                .redirects(vec![("abc".into(), "http://example.com".into(), 0)])
                .build(),
        )
        .unwrap();
        let repository = YamlFileRepository::open(store.path()).await.unwrap();
        let service = MappingService::new(repository, SeqGenerator::with_prefix("k"));

        service.lookup_and_touch(&code("abc")).await.unwrap();
        service
            .append(None, "http://example.org".to_string())
            .await
            .unwrap();
        service.delete(&code("abc")).await.unwrap();

        let on_disk = store.read_redirects().unwrap();
        assert!(!on_disk.contains_key("abc"));
        assert_eq!(on_disk["k000000"], RedirectRecord::new("http://example.org"));
    }

    #[tokio::test]
    async fn failed_delete_does_not_rewrite_the_store() {
        let store = TempStore::empty().unwrap();
        store.write_raw("redirects:\n  abc:\n    url: http://example.com\n").unwrap();
        let repository = YamlFileRepository::open(store.path()).await.unwrap();
        let service = MappingService::new(repository, SeqGenerator::with_prefix("k"));

        assert!(service.delete(&code("missing")).await.is_err());

        // Hand-written layout survives because nothing was saved.
        assert_eq!(
            store.read_raw().unwrap(),
            "redirects:\n  abc:\n    url: http://example.com\n"
        );
    }
}
