//! Behavioural tests for `SqliteTrailStore` using rstest-bdd.

use std::{cell::RefCell, path::PathBuf};

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use trailside_core::{
    FilterSet, SqliteTrailStore, SqliteTrailStoreError, Trail, TrailStore,
    test_support::write_sqlite_trails,
};

/// Shared state for SQLite store scenarios.
#[derive(Debug)]
struct TrailStoreWorld {
    temp_dir: TempDir,
    path: RefCell<Option<PathBuf>>,
    store: RefCell<Option<SqliteTrailStore>>,
    error: RefCell<Option<SqliteTrailStoreError>>,
    results: RefCell<Vec<Trail>>,
}

#[fixture]
fn world() -> TrailStoreWorld {
    TrailStoreWorld {
        temp_dir: TempDir::new().expect("create temp dir"),
        path: RefCell::new(None),
        store: RefCell::new(None),
        error: RefCell::new(None),
        results: RefCell::new(Vec::new()),
    }
}

fn trail(id: u64, difficulty: f64) -> Trail {
    Trail::new(id, format!("trail-{id}"), Coord { x: 8.0, y: 46.5 })
        .with_difficulty(difficulty)
        .with_duration_minutes(90)
}

fn persist(world: &TrailStoreWorld, trails: &[Trail]) {
    let path = world.temp_dir.path().join("trails.db");
    write_sqlite_trails(&path, trails).expect("persist trails");
    world.path.replace(Some(path));
}

fn query(world: &TrailStoreWorld, filters: &FilterSet) {
    let results = {
        let store = world.store.borrow();
        store
            .as_ref()
            .expect("store should be open before querying")
            .query(filters)
            .expect("query should succeed")
    };
    world.results.replace(results);
}

#[given("a SQLite trail dataset with an easy and a hard trail")]
fn given_easy_and_hard(world: &TrailStoreWorld) {
    persist(world, &[trail(1, 2.0), trail(2, 7.5)]);
}

#[given("a SQLite trail dataset containing an invalid trail")]
fn given_invalid(world: &TrailStoreWorld) {
    persist(world, &[trail(1, 2.0).invalid()]);
}

#[given("no SQLite trail database on disk")]
fn given_missing(world: &TrailStoreWorld) {
    world
        .path
        .replace(Some(world.temp_dir.path().join("missing.db")));
}

#[when("I open the SQLite trail store")]
fn open_store(world: &TrailStoreWorld) {
    let path = world
        .path
        .borrow()
        .clone()
        .expect("path should be initialised before opening the store");
    match SqliteTrailStore::open(&path) {
        Ok(store) => {
            world.store.replace(Some(store));
        }
        Err(err) => {
            world.error.replace(Some(err));
        }
    }
}

#[when("I query trails no harder than 3")]
fn query_easy(world: &TrailStoreWorld) {
    let filters = FilterSet {
        max_difficulty: Some(3.0),
        ..FilterSet::default()
    };
    query(world, &filters);
}

#[when("I query with the validity-only filter set")]
fn query_valid(world: &TrailStoreWorld) {
    query(world, &FilterSet::validity_only());
}

#[then("only the easy trail is returned")]
fn then_easy(world: &TrailStoreWorld) {
    let ids: Vec<_> = world.results.borrow().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1]);
}

#[then("no trails are returned")]
fn then_none(world: &TrailStoreWorld) {
    assert!(world.results.borrow().is_empty());
}

#[then("opening the SQLite trail store fails")]
fn then_open_fails(world: &TrailStoreWorld) {
    assert!(matches!(
        world.error.borrow().as_ref(),
        Some(SqliteTrailStoreError::OpenDatabase { .. })
    ));
}

#[scenario(path = "tests/features/sqlite_trail_store.feature", index = 0)]
fn difficulty_bound_narrows_results(world: TrailStoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_trail_store.feature", index = 1)]
fn validity_flag_excludes_broken_records(world: TrailStoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_trail_store.feature", index = 2)]
fn missing_database_is_reported(world: TrailStoreWorld) {
    let _ = world;
}
