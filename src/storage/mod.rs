// Storage module for the movie catalog
//
// Every backend stores a whole catalog in one place and is driven through the
// same StorageEngine trait, so the rest of the crate never knows which file
// format is in use.

mod error;
mod config;
mod storage_engine;

// Storage backends
mod csv_engine;
mod json_engine;

// Re-exports
pub use error::{StorageError, StorageResult};
pub use config::{StorageConfig, StorageType, TitleMatch};
pub use storage_engine::{AddOutcome, EditOutcome, MemoryStorageEngine, StorageEngine};
pub use csv_engine::{CsvStorageEngine, CSV_HEADER};
pub use json_engine::JsonStorageEngine;

// Factory function to create a storage engine based on configuration
pub fn create_storage_engine(config: StorageConfig) -> StorageResult<Box<dyn StorageEngine>> {
    log::debug!("Opening {:?} storage at {:?}", config.storage_type, config.path);

    match config.storage_type {
        StorageType::Csv => {
            let engine = CsvStorageEngine::new(config)?;
            Ok(Box::new(engine))
        },
        StorageType::Json => {
            let engine = JsonStorageEngine::new(config)?;
            Ok(Box::new(engine))
        },
        StorageType::Memory => {
            let engine = MemoryStorageEngine::new(config)?;
            Ok(Box::new(engine))
        },
    }
}
