use async_trait::async_trait;
use kurz_core::repository::{ReadRepository, RedirectRecord, Repository, Result};
use kurz_core::{ShortCode, StorageError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

/// Store file used when no path is configured, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "config.yaml";

/// The full contents of a store file.
///
/// ```yaml
/// redirects:
///   abc:
///     url: http://example.com
///     used: 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default, deserialize_with = "nullable_map")]
    pub redirects: BTreeMap<String, RedirectRecord>,
}

// `redirects:` with nothing under it parses as null.
fn nullable_map<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, RedirectRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let redirects: Option<BTreeMap<String, RedirectRecord>> = Option::deserialize(deserializer)?;
    Ok(redirects.unwrap_or_default())
}

impl StoreDocument {
    /// Parses a store file. An empty file is an empty store.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Repository backed by a single YAML file.
///
/// The whole file is loaded on [`open`](Self::open) and rewritten after every
/// mutation. A single lock covers both the in-memory copy and the file write,
/// and the in-memory copy only changes once the file has been replaced, so a
/// failed write leaves both untouched.
///
/// Writes go to `<path>.tmp` first and are renamed over the store file, so
/// readers never observe a partially written store.
#[derive(Debug)]
pub struct YamlFileRepository {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl YamlFileRepository {
    /// Loads an existing store file.
    ///
    /// A missing file is an error, not an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        let document = StoreDocument::from_yaml(&contents)?;

        debug!(
            path = %path.display(),
            redirects = document.redirects.len(),
            "opened store"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Creates an empty store file at `path` unless one already exists.
    ///
    /// Returns `true` if a file was created.
    pub async fn create(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;

        match file {
            Ok(mut file) => {
                let contents = StoreDocument::default().to_yaml()?;
                file.write_all(contents.as_bytes())
                    .await
                    .map_err(|e| StorageError::io(path, e))?;
                file.sync_all().await.map_err(|e| StorageError::io(path, e))?;
                info!(path = %path.display(), "created empty store");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Returns the path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        let contents = document.to_yaml()?;
        let temp_path = self.temp_path();

        if let Err(e) = self.replace_from_temp(&temp_path, contents.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }

        trace!(path = %self.path.display(), bytes = contents.len(), "saved store");
        Ok(())
    }

    /// Writes `contents` to `temp_path`, syncs it and renames it over the store.
    async fn replace_from_temp(&self, temp_path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = tokio::fs::File::create(temp_path)
            .await
            .map_err(|e| StorageError::io(temp_path, e))?;
        file.write_all(contents)
            .await
            .map_err(|e| StorageError::io(temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::io(temp_path, e))?;
        drop(file);

        tokio::fs::rename(temp_path, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))
    }

    /// Applies `change` to a copy of the document and, if it reports a
    /// modification, persists the copy before making it current.
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> (T, bool) + Send,
        T: Send,
    {
        let mut current = self.document.lock().await;
        let mut next = current.clone();
        let (output, modified) = change(&mut next);

        if modified {
            self.save(&next).await?;
            *current = next;
        }

        Ok(output)
    }
}

#[async_trait]
impl ReadRepository for YamlFileRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<RedirectRecord>> {
        let document = self.document.lock().await;
        Ok(document.redirects.get(code.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<(ShortCode, RedirectRecord)>> {
        let document = self.document.lock().await;
        Ok(document
            .redirects
            .iter()
            .map(|(key, record)| (ShortCode::new_unchecked(key.as_str()), record.clone()))
            .collect())
    }
}

#[async_trait]
impl Repository for YamlFileRepository {
    async fn insert(&self, code: &ShortCode, record: RedirectRecord) -> Result<()> {
        let key = code.as_str().to_owned();
        self.mutate(move |document| {
            document.redirects.insert(key, record);
            ((), true)
        })
        .await
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        self.mutate(|document| {
            let removed = document.redirects.remove(code.as_str()).is_some();
            (removed, removed)
        })
        .await
    }

    async fn touch(&self, code: &ShortCode) -> Result<Option<RedirectRecord>> {
        self.mutate(|document| match document.redirects.get_mut(code.as_str()) {
            Some(record) => {
                record.used += 1;
                (Some(record.clone()), true)
            }
            None => (None, false),
        })
        .await
    }
}
