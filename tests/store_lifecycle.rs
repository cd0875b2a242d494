//! Store Lifecycle Tests
//!
//! File-backed behavior of the store:
//! - Schema bootstrap is idempotent across reopen
//! - Sample data loads only into an empty PERSON table
//! - Seed scripts on disk replace the embedded sample data
//! - Writes survive close and reopen

use std::fs;

use npsdb::store::{params, ScriptSource, Store, StoreOptions, Table};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn db_path(tmp: &TempDir) -> std::path::PathBuf {
    tmp.path().join("nps.db")
}

// =============================================================================
// Seeding
// =============================================================================

/// Reopening a seeded database neither reseeds nor duplicates rows.
#[test]
fn test_reopen_does_not_reseed() {
    let tmp = TempDir::new().unwrap();
    let path = db_path(&tmp);

    let store = Store::open(&path, &StoreOptions::default()).unwrap();
    assert!(store.was_seeded());
    let persons = store.count(Table::Person).unwrap();
    assert!(persons > 0);
    store.close().unwrap();

    let store = Store::open(&path, &StoreOptions::default()).unwrap();
    assert!(!store.was_seeded());
    assert_eq!(store.count(Table::Person).unwrap(), persons);
}

/// A database opened without seeding picks up sample data on a later open.
#[test]
fn test_unseeded_database_is_seeded_later() {
    let tmp = TempDir::new().unwrap();
    let path = db_path(&tmp);

    let store = Store::open(&path, &StoreOptions::unseeded()).unwrap();
    assert!(!store.was_seeded());
    assert_eq!(store.count(Table::Person).unwrap(), 0);
    store.close().unwrap();

    let store = Store::open(&path, &StoreOptions::default()).unwrap();
    assert!(store.was_seeded());
    assert!(store.count(Table::Donation).unwrap() > 0);
}

/// Scripts from disk replace the embedded ones.
#[test]
fn test_custom_seed_script() {
    let tmp = TempDir::new().unwrap();
    let seed = tmp.path().join("seed.sql");
    fs::write(
        &seed,
        "INSERT INTO PERSON (ID, FIRST_NAME, LAST_NAME, DATE_OF_BIRTH, STREET, CITY, STATE, POSTAL_CODE)
         VALUES (1, 'Only', 'One', '2000-01-01', 'x', 'y', 'ZZ', '00000');",
    )
    .unwrap();

    let options = StoreOptions {
        seed: ScriptSource::File(seed),
        ..StoreOptions::default()
    };
    let store = Store::open(&db_path(&tmp), &options).unwrap();
    assert!(store.was_seeded());
    assert_eq!(store.count(Table::Person).unwrap(), 1);
    assert_eq!(store.count(Table::NationalPark).unwrap(), 0);
}

/// A broken seed script leaves no partial data behind.
#[test]
fn test_failed_seed_is_rolled_back() {
    let tmp = TempDir::new().unwrap();
    let seed = tmp.path().join("seed.sql");
    fs::write(
        &seed,
        "INSERT INTO PERSON (ID, FIRST_NAME, LAST_NAME, DATE_OF_BIRTH, STREET, CITY, STATE, POSTAL_CODE)
         VALUES (1, 'A', 'B', '2000-01-01', 'x', 'y', 'ZZ', '00000');
         INSERT INTO NO_SUCH_TABLE VALUES (1);",
    )
    .unwrap();

    let options = StoreOptions {
        seed: ScriptSource::File(seed),
        ..StoreOptions::default()
    };
    assert!(Store::open(&db_path(&tmp), &options).is_err());

    let store = Store::open(&db_path(&tmp), &StoreOptions::unseeded()).unwrap();
    assert_eq!(store.count(Table::Person).unwrap(), 0);
}

// =============================================================================
// Durability
// =============================================================================

#[test]
fn test_writes_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = db_path(&tmp);

    let store = Store::open(&path, &StoreOptions::unseeded()).unwrap();
    store
        .execute(
            "INSERT INTO NATIONAL_PARK (NAME, STREET, CITY, STATE, POSTAL_CODE, ESTABLISHMENT_DATE)
             VALUES (?, ?, ?, ?, ?, ?)",
            params!["Acadia", "25 Visitor Center Rd", "Bar Harbor", "ME", "04609", "1916-07-08"],
        )
        .unwrap();
    store.close().unwrap();

    let store = Store::open(&path, &StoreOptions::unseeded()).unwrap();
    let row = store
        .query_one("SELECT * FROM NATIONAL_PARK WHERE NAME=?", params!["Acadia"])
        .unwrap()
        .unwrap();
    assert_eq!(row["CITY"], "Bar Harbor");
    assert_eq!(row["VISITOR_CAPACITY"], serde_json::Value::Null);
}
