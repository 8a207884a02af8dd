use std::path::PathBuf;
use parking_lot::RwLock;

use crate::movie::{Catalog, MovieRecord};
use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Result of adding a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The movie was stored
    Added,

    /// A movie with exactly this title already exists; nothing was written
    Duplicate,
}

/// Result of deleting or updating a movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The change was stored under the title as it appears in the catalog
    Applied { title: String },

    /// No stored title matched; nothing was written
    NotFound,
}

/// Storage engine trait
///
/// Backends only know how to load and save a whole [`Catalog`]. The catalog
/// operations are provided on top of that and behave the same for every
/// backend: each call loads, mutates and saves, with no state kept in between.
pub trait StorageEngine: Send + Sync {
    /// Get the storage configuration
    fn config(&self) -> &StorageConfig;

    /// Load the full catalog. A missing file is an empty catalog.
    fn load(&self) -> StorageResult<Catalog>;

    /// Replace the stored catalog
    fn save(&self, catalog: &Catalog) -> StorageResult<()>;

    /// Get the storage type
    fn storage_type(&self) -> &'static str;

    /// Get the storage path
    fn path(&self) -> Option<&PathBuf> {
        self.config().path.as_ref()
    }

    /// Return every stored movie
    fn list(&self) -> StorageResult<Catalog> {
        self.load()
    }

    /// Add a movie unless the exact title is already present
    fn add(&self, title: &str, year: i32, rating: f64, poster: Option<&str>) -> StorageResult<AddOutcome> {
        ensure_storable(rating)?;
        let mut catalog = self.load()?;

        if !catalog.insert(title, MovieRecord::new(year, rating, poster)) {
            log::info!("Movie '{}' already exists in {}", title, self.storage_type());
            return Ok(AddOutcome::Duplicate);
        }

        self.save(&catalog)?;
        log::info!("Movie '{}' added", title);
        Ok(AddOutcome::Added)
    }

    /// Delete a movie, resolving the title with the configured match policy
    fn delete(&self, title: &str) -> StorageResult<EditOutcome> {
        let mut catalog = self.load()?;

        let Some(stored) = catalog
            .resolve_title(title, self.config().edit_match)
            .map(str::to_string)
        else {
            log::info!("Movie '{}' not found", title);
            return Ok(EditOutcome::NotFound);
        };

        catalog.remove(&stored);
        self.save(&catalog)?;
        log::info!("Movie '{}' deleted", stored);
        Ok(EditOutcome::Applied { title: stored })
    }

    /// Replace the rating of a movie, leaving year and poster untouched
    fn update(&self, title: &str, rating: f64) -> StorageResult<EditOutcome> {
        ensure_storable(rating)?;
        let mut catalog = self.load()?;

        let Some(stored) = catalog
            .resolve_title(title, self.config().edit_match)
            .map(str::to_string)
        else {
            log::info!("Movie '{}' not found", title);
            return Ok(EditOutcome::NotFound);
        };

        if let Some(record) = catalog.get_mut(&stored) {
            record.rating = rating;
        }
        self.save(&catalog)?;
        log::info!("Movie '{}' rating updated to {}", stored, rating);
        Ok(EditOutcome::Applied { title: stored })
    }
}

// NaN and infinities have no JSON form and would not read back from CSV
fn ensure_storable(rating: f64) -> StorageResult<()> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(StorageError::Serialization(format!("rating {} is not a finite number", rating)))
    }
}

/// In-memory storage engine implementation for testing or scratch catalogs
pub struct MemoryStorageEngine {
    /// Storage configuration
    config: StorageConfig,

    /// The catalog itself
    catalog: RwLock<Catalog>,
}

impl MemoryStorageEngine {
    /// Create a new, empty in-memory storage engine
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        Ok(Self::with_catalog(config, Catalog::new()))
    }

    /// Create an in-memory storage engine seeded with `catalog`
    pub fn with_catalog(config: StorageConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog: RwLock::new(catalog),
        }
    }
}

impl StorageEngine for MemoryStorageEngine {
    fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn load(&self) -> StorageResult<Catalog> {
        Ok(self.catalog.read().clone())
    }

    fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        *self.catalog.write() = catalog.clone();
        Ok(())
    }

    fn storage_type(&self) -> &'static str {
        "memory"
    }
}
