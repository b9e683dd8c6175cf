//! # File Store
//!
//! Named text blobs kept as flat files in one directory.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          File Store                                     │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(dir) ← Configure root directory                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FileStore::open(config).await ← Create dir if allowed                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  ./files/                                │                           │
//! │  │    compra_1.json                         │  list()  → names          │
//! │  │    factura_1.json                        │  read()  → content        │
//! │  │    notes.txt                             │  write() → create/replace │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every name is a single path component, so nothing outside the root is
//! ever touched. Writes replace the whole file; concurrent writers to the
//! same name are not coordinated (last write wins).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Configuration
// =============================================================================

/// File store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./files").create_if_missing(true);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the documents.
    pub root: PathBuf,

    /// Whether to create the directory on open.
    /// Default: true
    pub create_if_missing: bool,
}

impl StoreConfig {
    /// Creates a configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StoreConfig {
            root: root.into(),
            create_if_missing: true,
        }
    }

    /// Sets whether the root is created when missing.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Handle to a document directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the root when configured to.
    ///
    /// Fails with `NotFound` when the root is missing and creation is off,
    /// and with `RootNotDirectory` when the root is some other kind of file.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let root_name = config.root.display().to_string();

        match tokio::fs::metadata(&config.root).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(StoreError::RootNotDirectory { root: root_name }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && config.create_if_missing => {
                tokio::fs::create_dir_all(&config.root)
                    .await
                    .map_err(|e| StoreError::from_io(&root_name, e))?;
                debug!(root = %root_name, "Created store root");
            }
            Err(e) => return Err(StoreError::from_io(&root_name, e)),
        }

        info!(root = %config.root.display(), "File store opened");
        Ok(FileStore { root: config.root })
    }

    /// The directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the regular files in the root, sorted.
    pub async fn list(&self) -> StoreResult<Vec<String>> {
        let root_name = self.root.display().to_string();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::from_io(&root_name, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::from_io(&root_name, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::from_io(&root_name, e))?;
            if !file_type.is_file() {
                continue;
            }
            // Non-UTF-8 names cannot be addressed through this API.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort();
        debug!(count = names.len(), "Listed documents");
        Ok(names)
    }

    /// Creates or replaces a document.
    pub async fn write(&self, name: &str, content: &str) -> StoreResult<()> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| StoreError::from_io(name, e))?;

        info!(name, bytes = content.len(), "Document written");
        Ok(())
    }

    /// Reads a document's full content.
    ///
    /// A missing document is `StoreError::NotFound`, never an empty string.
    /// Directories are not documents, so naming one is also `NotFound`,
    /// matching [`FileStore::list`].
    pub async fn read(&self, name: &str) -> StoreResult<String> {
        let path = self.path_for(name)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StoreError::from_io(name, e))?;
        if !metadata.is_file() {
            return Err(StoreError::not_found(name));
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::from_io(name, e))?;

        debug!(name, bytes = content.len(), "Document read");
        Ok(content)
    }

    /// Whether a document exists.
    pub async fn exists(&self, name: &str) -> StoreResult<bool> {
        let path = self.path_for(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) => match StoreError::from_io(name, e) {
                StoreError::NotFound { .. } => Ok(false),
                other => Err(other),
            },
        }
    }

    /// Reads a document and deserializes it as JSON.
    pub async fn read_json<T: DeserializeOwned>(&self, name: &str) -> StoreResult<T> {
        let content = self.read(name).await?;
        serde_json::from_str(&content).map_err(|e| StoreError::Serialization {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Serializes a value as pretty JSON and stores it.
    pub async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> StoreResult<()> {
        let content =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialization {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        self.write(name, &content).await
    }

    /// Resolves a name to a path inside the root.
    fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

// =============================================================================
// Name Validation
// =============================================================================

/// Checks that `name` is a single, plain path component.
///
/// ## Example
/// ```rust
/// use tally_store::store::validate_name;
///
/// assert!(validate_name("compra_1.json").is_ok());
/// assert!(validate_name("../etc/passwd").is_err());
/// ```
pub fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::invalid_name(name, "must not be empty"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(StoreError::invalid_name(name, "must not contain path separators"));
    }

    if name == "." || name == ".." {
        return Err(StoreError::invalid_name(name, "must not be a relative directory"));
    }

    if name.contains('\0') {
        return Err(StoreError::invalid_name(name, "must not contain NUL"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
