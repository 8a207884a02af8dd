//! # Movie Catalog
//!
//! A personal movie catalog kept in a single CSV or JSON file, with typo-tolerant
//! title search.
//!
//! ## Features
//!
//! - Pluggable storage behind the [`StorageEngine`] trait, chosen by file extension
//! - Read-modify-write on every operation, the file is the only source of truth
//! - Crash-safe rewrites through a temporary file and rename
//! - Fuzzy title suggestions ranked by normalized Levenshtein similarity
//!
//! ## Example
//!
//! ```rust
//! use movie_catalog::{AddOutcome, CatalogConfig, MovieCatalog, SearchOutcome};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("movies.json");
//! let catalog = MovieCatalog::open(CatalogConfig::for_path(&path).unwrap()).unwrap();
//!
//! assert_eq!(catalog.add("The Godfather", 1972, 9.2, None).unwrap(), AddOutcome::Added);
//!
//! if let SearchOutcome::Suggestions(suggestions) = catalog.search("Gotfather").unwrap() {
//!     for s in suggestions {
//!         println!("Did you mean {} ({:.0}%)?", s.title, s.score);
//!     }
//! }
//! ```

mod config;
mod error;
mod movie;
mod movie_catalog;
mod persistence;
mod search;
mod stats;
mod storage;

// Re-export public API
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use movie::{validate_rating, Catalog, MovieRecord, MAX_RATING, MIN_RATING};
pub use movie_catalog::{MovieCatalog, SearchOutcome};
pub use search::{similarity, suggest, SearchOptions, Suggestion};
pub use stats::RatingStats;

// Re-export storage API
pub use storage::{
    create_storage_engine,
    AddOutcome,
    CsvStorageEngine,
    EditOutcome,
    JsonStorageEngine,
    MemoryStorageEngine,
    StorageConfig,
    StorageEngine,
    StorageError,
    StorageResult,
    StorageType,
    TitleMatch,
    CSV_HEADER,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
