use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::movie::{validate_rating, Catalog, MovieRecord};
use crate::search::{suggest, Suggestion};
use crate::stats::RatingStats;
use crate::storage::{create_storage_engine, AddOutcome, EditOutcome, StorageEngine};

/// Result of looking a title up
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The exact title is in the catalog
    Found { title: String, record: MovieRecord },

    /// The title is not in the catalog; closest titles first, possibly none
    Suggestions(Vec<Suggestion>),
}

/// Main entry point for the movie catalog
///
/// Wraps a storage engine chosen from the configuration. Nothing is cached:
/// every call goes back to storage.
pub struct MovieCatalog {
    /// The underlying storage engine
    engine: Box<dyn StorageEngine>,

    /// Catalog configuration
    config: CatalogConfig,
}

impl MovieCatalog {
    /// Open the catalog described by `config`
    pub fn open(config: CatalogConfig) -> Result<Self> {
        let engine = create_storage_engine(config.storage.clone())?;
        Ok(Self { engine, config })
    }

    /// Wrap an existing storage engine
    pub fn with_engine(engine: Box<dyn StorageEngine>, config: CatalogConfig) -> Self {
        Self { engine, config }
    }

    /// Get the catalog configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Get the storage engine
    pub fn engine(&self) -> &dyn StorageEngine {
        self.engine.as_ref()
    }

    /// All movies in catalog order
    pub fn list(&self) -> Result<Catalog> {
        Ok(self.engine.list()?)
    }

    /// Add a movie unless the exact title already exists
    pub fn add(&self, title: &str, year: i32, rating: f64, poster: Option<&str>) -> Result<AddOutcome> {
        if title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        check_rating(rating)?;
        Ok(self.engine.add(title, year, rating, poster)?)
    }

    /// Delete a movie
    pub fn delete(&self, title: &str) -> Result<EditOutcome> {
        Ok(self.engine.delete(title)?)
    }

    /// Change the rating of a movie
    pub fn update(&self, title: &str, rating: f64) -> Result<EditOutcome> {
        check_rating(rating)?;
        Ok(self.engine.update(title, rating)?)
    }

    /// Look a title up exactly, falling back to fuzzy suggestions
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        let catalog = self.engine.load()?;

        if let Some(record) = catalog.get(query) {
            return Ok(SearchOutcome::Found {
                title: query.to_string(),
                record: record.clone(),
            });
        }

        let suggestions = suggest(query, catalog.titles(), &self.config.search_options());
        Ok(SearchOutcome::Suggestions(suggestions))
    }

    /// Rating statistics, `None` when the catalog is empty
    pub fn stats(&self) -> Result<Option<RatingStats>> {
        Ok(RatingStats::from_catalog(&self.engine.load()?))
    }

    /// Pick a movie at random
    pub fn random_movie<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<(String, MovieRecord)>> {
        Ok(self.engine.load()?.into_iter().choose(rng))
    }

    /// All movies, highest rating first; equal ratings keep catalog order
    pub fn sorted_by_rating(&self) -> Result<Vec<(String, MovieRecord)>> {
        let mut movies: Vec<_> = self.engine.load()?.into_iter().collect();
        movies.sort_by(|a, b| b.1.rating.total_cmp(&a.1.rating));
        Ok(movies)
    }
}

fn check_rating(rating: f64) -> Result<()> {
    if validate_rating(rating) {
        Ok(())
    } else {
        Err(CatalogError::InvalidRating(rating))
    }
}
