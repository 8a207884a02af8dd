use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::search::SearchOptions;
use crate::storage::{StorageConfig, StorageResult, StorageType, TitleMatch};

/// Movie catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Maximum number of suggestions offered when a search misses
    pub suggestion_limit: usize,

    /// Minimum similarity (0-100) for a suggestion to be offered
    pub score_threshold: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            suggestion_limit: 3,
            score_threshold: 0.0,
        }
    }
}

impl CatalogConfig {
    /// Create a new catalog configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a catalog file, choosing the backend from its extension
    pub fn for_path<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Ok(Self::default().with_storage(StorageConfig::for_path(path)?))
    }

    /// Set the storage configuration
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Set the storage type
    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage.storage_type = storage_type;
        self
    }

    /// Set the storage path
    pub fn with_storage_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the title resolution policy for delete and update
    pub fn with_edit_match(mut self, edit_match: TitleMatch) -> Self {
        self.storage.edit_match = edit_match;
        self
    }

    /// Set the maximum number of suggestions
    pub fn with_suggestion_limit(mut self, suggestion_limit: usize) -> Self {
        self.suggestion_limit = suggestion_limit;
        self
    }

    /// Set the minimum suggestion score
    pub fn with_score_threshold(mut self, score_threshold: f64) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    /// Search options derived from this configuration
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.suggestion_limit,
            score_threshold: self.score_threshold,
        }
    }
}
