use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::storage::error::{StorageError, StorageResult};

/// Storage type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// In-memory storage (for testing or scratch catalogs)
    #[default]
    Memory,

    /// Comma-separated file with a `title,year,rating,poster` header
    Csv,

    /// Pretty-printed JSON object keyed by title
    Json,
}

impl StorageType {
    /// Pick the file backend from the extension of `path`.
    ///
    /// `.csv` and `.json` are recognised regardless of case. Anything else is
    /// rejected rather than guessed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(StorageType::Csv),
            Some("json") => Ok(StorageType::Json),
            _ => Err(StorageError::UnsupportedStorageType(format!(
                "{} (expected a .csv or .json file)",
                path.display()
            ))),
        }
    }
}

/// How a user-supplied title is resolved against stored titles on delete and update.
///
/// Adding a movie always uses an exact, case-sensitive comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TitleMatch {
    /// Only an identical title matches
    CaseSensitive,

    /// An identical title wins, otherwise the first title equal after lowercasing.
    ///
    /// When several stored titles fold to the same lowercase form and none is
    /// identical, the earliest one in catalog order is chosen. A lowercase-keyed
    /// map would pick the last one instead; this choice is intentional.
    #[default]
    CaseInsensitive,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage type
    pub storage_type: StorageType,

    /// Path to the catalog file
    pub path: Option<PathBuf>,

    /// Whether to create missing parent directories when saving
    pub create_if_missing: bool,

    /// Title resolution policy for delete and update
    pub edit_match: TitleMatch,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::default(),
            path: None,
            create_if_missing: true,
            edit_match: TitleMatch::default(),
        }
    }
}

impl StorageConfig {
    /// Create a new storage configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file-backed configuration, choosing the backend from the extension
    pub fn for_path<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let storage_type = StorageType::from_path(&path)?;
        Ok(Self::default()
            .with_storage_type(storage_type)
            .with_path(path))
    }

    /// Set the storage type
    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = storage_type;
        self
    }

    /// Set the storage path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to create missing parent directories on save
    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    /// Set the title resolution policy for delete and update
    pub fn with_edit_match(mut self, edit_match: TitleMatch) -> Self {
        self.edit_match = edit_match;
        self
    }
}
