use movie_catalog::{
    create_storage_engine, AddOutcome, Catalog, CatalogConfig, CatalogError, EditOutcome,
    MovieCatalog, MovieRecord, SearchOutcome, StorageConfig, StorageError, StorageType,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sample_catalog() -> Catalog {
    vec![
        ("The Shawshank Redemption".to_string(), MovieRecord::new(1994, 9.5, None)),
        ("Crouching Tiger, Hidden Dragon".to_string(), MovieRecord::new(2000, 7.9, Some("http://img/ct.jpg"))),
        ("Amélie".to_string(), MovieRecord::new(2001, 8.3, Some("http://img/amelie.jpg"))),
        ("12 \"Angry\" Men".to_string(), MovieRecord::new(1957, 9.0, None)),
        ("The Room".to_string(), MovieRecord::new(2003, 3.6, None)),
    ]
    .into_iter()
    .collect()
}

fn round_trip(file_name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(file_name);
    let engine = create_storage_engine(StorageConfig::for_path(&path).unwrap()).unwrap();

    let catalog = sample_catalog();
    engine.save(&catalog).unwrap();
    assert_eq!(engine.load().unwrap(), catalog);

    // Saving an unchanged catalog produces identical bytes
    let first = fs::read(&path).unwrap();
    engine.save(&engine.load().unwrap()).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_csv_round_trip() {
    round_trip("movies.csv");
}

#[test]
fn test_json_round_trip() {
    round_trip("movies.json");
}

fn full_workflow(path: &Path) {
    let catalog = MovieCatalog::open(CatalogConfig::for_path(path).unwrap()).unwrap();

    // Missing file
    assert!(catalog.list().unwrap().is_empty());

    assert_eq!(catalog.add("Inception", 2010, 8.8, None).unwrap(), AddOutcome::Added);
    assert_eq!(
        catalog.add("The Godfather", 1972, 9.2, Some("http://img/gf.jpg")).unwrap(),
        AddOutcome::Added
    );
    assert_eq!(catalog.add("Pulp Fiction", 1994, 8.8, None).unwrap(), AddOutcome::Added);

    // Duplicate add leaves everything as it was
    let before = catalog.list().unwrap();
    assert_eq!(catalog.add("Inception", 2011, 2.0, None).unwrap(), AddOutcome::Duplicate);
    assert_eq!(catalog.list().unwrap(), before);

    // Case-insensitive update keeps year and poster
    assert_eq!(
        catalog.update("the godfather", 9.4).unwrap(),
        EditOutcome::Applied { title: "The Godfather".to_string() }
    );
    assert_eq!(
        catalog.list().unwrap().get("The Godfather"),
        Some(&MovieRecord::new(1972, 9.4, Some("http://img/gf.jpg")))
    );

    // Case-insensitive delete removes exactly one entry
    assert_eq!(
        catalog.delete("INCEPTION").unwrap(),
        EditOutcome::Applied { title: "Inception".to_string() }
    );
    let remaining = catalog.list().unwrap();
    assert_eq!(remaining.titles().collect::<Vec<_>>(), vec!["The Godfather", "Pulp Fiction"]);

    assert_eq!(catalog.delete("Inception").unwrap(), EditOutcome::NotFound);
    assert_eq!(catalog.update("Titanic", 5.0).unwrap(), EditOutcome::NotFound);

    // Search falls back to suggestions
    match catalog.search("Gotfather").unwrap() {
        SearchOutcome::Suggestions(suggestions) => {
            assert_eq!(suggestions[0].title, "The Godfather");
            assert!(suggestions[0].score > suggestions[1].score);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(matches!(
        catalog.search("Pulp Fiction").unwrap(),
        SearchOutcome::Found { .. }
    ));

    // Changes are visible to a freshly opened catalog
    let reopened = MovieCatalog::open(CatalogConfig::for_path(path).unwrap()).unwrap();
    assert_eq!(reopened.list().unwrap(), remaining);

    let tmp = path.with_extension(format!(
        "{}.tmp",
        path.extension().unwrap().to_str().unwrap()
    ));
    assert!(!tmp.exists());
}

#[test]
fn test_full_workflow_csv() {
    let dir = tempdir().unwrap();
    full_workflow(&dir.path().join("movies.csv"));
}

#[test]
fn test_full_workflow_json() {
    let dir = tempdir().unwrap();
    full_workflow(&dir.path().join("movies.json"));
}

#[test]
fn test_format_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.db");

    assert!(matches!(
        CatalogConfig::for_path(&path),
        Err(StorageError::UnsupportedStorageType(_))
    ));

    let config = CatalogConfig::new()
        .with_storage_type(StorageType::Json)
        .with_storage_path(&path);
    let catalog = MovieCatalog::open(config).unwrap();
    catalog.add("Alien", 1979, 8.5, None).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"Alien\""));
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(&path, "title,year,rating,poster\nAlien,1979,great,\n").unwrap();

    let catalog = MovieCatalog::open(CatalogConfig::for_path(&path).unwrap()).unwrap();
    assert!(matches!(
        catalog.list(),
        Err(CatalogError::Storage(StorageError::Malformed { .. }))
    ));
    assert!(catalog.delete("Alien").is_err());
}
