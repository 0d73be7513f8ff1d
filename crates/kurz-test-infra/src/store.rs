use crate::Result;
use kurz_core::RedirectRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typed_builder::TypedBuilder;

/// The on-disk layout of a store file, kept independent of the storage crate
/// so fixtures check the file format rather than the implementation.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    redirects: Option<BTreeMap<String, RedirectRecord>>,
}

/// Describes the store file a [`TempStore`] starts with.
///
/// # Example
///
/// ```rust
/// use kurz_test_infra::{StoreConfig, TempStore};
///
/// let store = TempStore::new(
///     StoreConfig::builder()
///         .redirects(vec![("abc".into(), "http://example.com".into(), 0)])
///         .build(),
/// )
/// .unwrap();
/// assert!(store.path().exists());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreConfig {
    /// Initial `(key, url, used)` entries.
    #[builder(default)]
    pub redirects: Vec<(String, String, u64)>,

    /// Name of the store file inside the temporary directory.
    #[builder(default = "config.yaml".to_string())]
    pub file_name: String,

    /// When `false` the directory is created but the store file is not.
    #[builder(default = true)]
    pub create_file: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Test fixture for a store file in a disposable directory.
///
/// The directory and everything in it is removed when the fixture is dropped.
pub struct TempStore {
    dir: TempDir,
    path: PathBuf,
}

impl TempStore {
    /// Creates the directory and, unless disabled, the seeded store file.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(&config.file_name);
        let store = Self { dir, path };

        if config.create_file {
            let redirects = config
                .redirects
                .into_iter()
                .map(|(key, url, used)| (key, RedirectRecord { url, used }))
                .collect();
            store.write_redirects(&redirects)?;
        }

        Ok(store)
    }

    /// A store file with no redirects.
    pub fn empty() -> Result<Self> {
        Self::new(StoreConfig::default())
    }

    /// A directory without a store file.
    pub fn missing() -> Result<Self> {
        Self::new(StoreConfig::builder().create_file(false).build())
    }

    /// Path of the store file, whether or not it exists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temporary directory holding the store file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Reads the store file verbatim.
    pub fn read_raw(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Overwrites the store file verbatim.
    pub fn write_raw(&self, contents: &str) -> Result<()> {
        Ok(std::fs::write(&self.path, contents)?)
    }

    /// Parses the store file as it currently is on disk.
    pub fn read_redirects(&self) -> Result<BTreeMap<String, RedirectRecord>> {
        let contents = self.read_raw()?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let file: StoreFile = serde_yaml::from_str(&contents)?;
        Ok(file.redirects.unwrap_or_default())
    }

    /// Replaces the store file with the given redirects.
    pub fn write_redirects(&self, redirects: &BTreeMap<String, RedirectRecord>) -> Result<()> {
        let file = StoreFile {
            redirects: Some(redirects.clone()),
        };
        self.write_raw(&serde_yaml::to_string(&file)?)
    }

    /// Names of the entries in the fixture directory, sorted.
    pub fn dir_entries(&self) -> Result<Vec<String>> {
        let mut names = std::fs::read_dir(self.dir.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}
