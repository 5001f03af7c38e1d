#![cfg(feature = "sqlite")]

use fitconv::config::toml_config::CatalogConfig;
use fitconv::domain::model::CategoryId;
use fitconv::domain::ports::CategoryLookup;
use fitconv::{build_lookup, fit_from_eft, FitError};
use tempfile::TempDir;

fn write_catalog(dir: &TempDir) -> String {
    let path = dir.path().join("sde_lite.sqlite");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE typeInfo (typeID INTEGER PRIMARY KEY, typeName TEXT, categoryID INTEGER);
         INSERT INTO typeInfo VALUES (2456, 'Hobgoblin II', 18);
         INSERT INTO typeInfo VALUES (35832, 'Astrahus', 65);
         INSERT INTO typeInfo VALUES (35894, 'Standup Cloning Center I', 66);",
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_sqlite_catalog_resolves_categories() {
    let dir = TempDir::new().unwrap();
    let catalog = CatalogConfig {
        sqlite_path: Some(write_catalog(&dir)),
        ..CatalogConfig::default()
    };

    let lookup = build_lookup(&catalog).unwrap();
    assert_eq!(lookup.category_of("Hobgoblin II"), Some(CategoryId::DRONE));
    assert_eq!(lookup.category_of("Astrahus"), Some(CategoryId::STRUCTURE));
    assert_eq!(lookup.category_of("Tritanium"), None);
}

#[test]
fn test_structure_fit_against_sqlite_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = CatalogConfig {
        sqlite_path: Some(write_catalog(&dir)),
        cache: Some(false),
        categories: None,
    };
    let lookup = build_lookup(&catalog).unwrap();

    let fit = fit_from_eft(
        "[Astrahus, Home]
Standup Ballistic Control System I



Standup Multirole Missile Launcher I

Standup M-Set Missile Precision I

Standup Cloning Center I
",
        &lookup,
    )
    .unwrap();

    assert!(fit.is_structure);
    assert_eq!(fit.service_slots.len(), 1);
    assert_eq!(fit.service_slots[0].name, "Standup Cloning Center I");
}

#[test]
fn test_missing_catalog_file_is_catalog_error() {
    let dir = TempDir::new().unwrap();
    let catalog = CatalogConfig {
        sqlite_path: Some(dir.path().join("absent.sqlite").to_string_lossy().into_owned()),
        ..CatalogConfig::default()
    };

    assert!(matches!(build_lookup(&catalog), Err(FitError::CatalogError(_))));
}
