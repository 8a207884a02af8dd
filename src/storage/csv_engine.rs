use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::movie::{Catalog, MovieRecord};
use crate::persistence::{atomic_write, read_if_exists};
use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::storage_engine::StorageEngine;

/// Header row, also the fixed field order of every record
pub const CSV_HEADER: [&str; 4] = ["title", "year", "rating", "poster"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    year: i32,
    rating: f64,
    #[serde(default)]
    poster: Option<String>,
}

#[derive(Debug, Serialize)]
struct CsvRowRef<'a> {
    title: &'a str,
    year: i32,
    rating: f64,
    poster: &'a str,
}

/// CSV storage engine implementation
///
/// The file is parsed completely on every load and rewritten completely on
/// every save.
pub struct CsvStorageEngine {
    /// Storage configuration
    config: StorageConfig,

    /// Path to the CSV file
    path: PathBuf,
}

impl CsvStorageEngine {
    /// Create a new CSV storage engine
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let path = config.path.clone().ok_or_else(|| {
            StorageError::ConfigurationError("CSV storage requires a path".to_string())
        })?;

        Ok(Self { config, path })
    }

    fn parse(&self, bytes: &[u8]) -> StorageResult<Catalog> {
        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
        let mut catalog = Catalog::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| csv_error(&self.path, e))?;
            let record = MovieRecord::new(row.year, row.rating, row.poster.as_deref());

            match catalog.get_mut(&row.title) {
                Some(existing) => {
                    log::warn!("Title '{}' repeated in {}, keeping the last row", row.title, self.path.display());
                    *existing = record;
                }
                None => {
                    catalog.insert(row.title, record);
                }
            }
        }

        Ok(catalog)
    }

    fn render(catalog: &Catalog) -> StorageResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(CSV_HEADER)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        for (title, record) in catalog.iter() {
            writer
                .serialize(CsvRowRef {
                    title,
                    year: record.year,
                    rating: record.rating,
                    poster: record.poster.as_deref().unwrap_or(""),
                })
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn csv_error(path: &Path, err: csv::Error) -> StorageError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => StorageError::Io(io),
        _ => StorageError::malformed(path, reason),
    }
}

impl StorageEngine for CsvStorageEngine {
    fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn load(&self) -> StorageResult<Catalog> {
        let catalog = match read_if_exists(&self.path)? {
            Some(bytes) => self.parse(&bytes)?,
            None => Catalog::new(),
        };
        log::debug!("Loaded {} movies from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        let bytes = Self::render(catalog)?;
        atomic_write(&self.path, &bytes, self.config.create_if_missing)
    }

    fn storage_type(&self) -> &'static str {
        "csv"
    }
}
