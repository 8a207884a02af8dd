use std::path::PathBuf;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::movie::Catalog;
use crate::persistence::{atomic_write, read_if_exists};
use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::storage_engine::StorageEngine;

const INDENT: &[u8] = b"    ";

/// JSON storage engine implementation
///
/// The file holds a single object keyed by title, pretty-printed with four
/// spaces. A `null` or blank document reads as an empty catalog.
pub struct JsonStorageEngine {
    /// Storage configuration
    config: StorageConfig,

    /// Path to the JSON file
    path: PathBuf,
}

impl JsonStorageEngine {
    /// Create a new JSON storage engine
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let path = config.path.clone().ok_or_else(|| {
            StorageError::ConfigurationError("JSON storage requires a path".to_string())
        })?;

        Ok(Self { config, path })
    }

    fn parse(&self, bytes: &[u8]) -> StorageResult<Catalog> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Catalog::new());
        }

        let catalog: Option<Catalog> = serde_json::from_slice(bytes).map_err(|e| {
            if e.is_io() {
                StorageError::Io(e.into())
            } else {
                StorageError::malformed(&self.path, e)
            }
        })?;

        Ok(catalog.unwrap_or_default())
    }

    fn render(catalog: &Catalog) -> StorageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(INDENT));
        catalog
            .serialize(&mut serializer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(bytes)
    }
}

impl StorageEngine for JsonStorageEngine {
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
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::MovieRecord;
    use crate::storage::config::StorageType;
    use crate::storage::storage_engine::EditOutcome;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn engine_at(path: &Path) -> JsonStorageEngine {
        JsonStorageEngine::new(
            StorageConfig::new()
                .with_storage_type(StorageType::Json)
                .with_path(path),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let engine = engine_at(&dir.path().join("movies.json"));
        assert!(engine.list().unwrap().is_empty());
    }

    #[test]
    fn test_null_and_blank_documents_are_empty() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("movies.json");
        let engine = engine_at(&file_path);

        for content in ["null", "", "  \n"] {
            fs::write(&file_path, content).unwrap();
            assert!(engine.list().unwrap().is_empty(), "content {:?}", content);
        }
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("movies.json");
        let engine = engine_at(&file_path);

        engine.add("Inception", 2010, 8.8, None).unwrap();

        let expected = "{\n    \"Inception\": {\n        \"year\": 2010,\n        \"rating\": 8.8,\n        \"poster\": \"\"\n    }\n}";
        assert_eq!(fs::read_to_string(&file_path).unwrap(), expected);
    }

    #[test]
    fn test_existing_order_is_kept_on_rewrite() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("movies.json");
        fs::write(
            &file_path,
            r#"{"Zodiac": {"year": 2007, "rating": 7.7, "poster": ""},
                "Alien": {"year": 1979, "rating": 8.5, "poster": "http://img/alien.jpg"},
                "Heat": {"year": 1995, "rating": 8.3, "poster": null}}"#,
        )
        .unwrap();

        let engine = engine_at(&file_path);
        assert_eq!(
            engine.update("ALIEN", 9.1).unwrap(),
            EditOutcome::Applied { title: "Alien".to_string() }
        );

        let catalog = engine.list().unwrap();
        assert_eq!(catalog.titles().collect::<Vec<_>>(), vec!["Zodiac", "Alien", "Heat"]);
        assert_eq!(
            catalog.get("Alien"),
            Some(&MovieRecord::new(1979, 9.1, Some("http://img/alien.jpg")))
        );
        assert_eq!(catalog.get("Zodiac"), Some(&MovieRecord::new(2007, 7.7, None)));
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("movies.json");
        let engine = engine_at(&file_path);

        for content in ["{\"Alien\": {\"year\": 1979", "[1, 2, 3]", "{\"Alien\": {\"rating\": 8.5}}"] {
            fs::write(&file_path, content).unwrap();
            assert!(
                matches!(engine.list(), Err(StorageError::Malformed { .. })),
                "content {:?}",
                content
            );
        }
    }

    #[test]
    fn test_non_finite_rating_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("movies.json");
        let engine = engine_at(&file_path);

        engine.add("Alien", 1979, 8.5, None).unwrap();
        let before = fs::read(&file_path).unwrap();

        assert!(matches!(engine.update("Alien", f64::NAN), Err(StorageError::Serialization(_))));
        assert!(matches!(
            engine.add("Heat", 1995, f64::INFINITY, None),
            Err(StorageError::Serialization(_))
        ));

        assert_eq!(fs::read(&file_path).unwrap(), before);
        assert_eq!(engine.list().unwrap().get("Alien"), Some(&MovieRecord::new(1979, 8.5, None)));
    }
}
