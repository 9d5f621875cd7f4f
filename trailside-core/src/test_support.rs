//! Test doubles for stores and forecast providers used by unit and behaviour
//! tests across the workspace.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use geo::Coord;

use crate::{
    FilterSet, MemoryTrailStore, Trail, TrailStore, TrailStoreError, WeatherCategory,
    WeatherError, WeatherProvider,
};

type CoordKey = (i64, i64);

fn coord_key(location: Coord<f64>) -> CoordKey {
    (
        (location.x * 1e6).round() as i64,
        (location.y * 1e6).round() as i64,
    )
}

/// Deterministic `WeatherProvider` answering from a fixed table.
///
/// Locations without an entry receive the default forecast. Every call is
/// counted so tests can assert on fan-out and caching.
#[derive(Debug, Default)]
pub struct StubWeatherProvider {
    default: Option<WeatherCategory>,
    forecasts: HashMap<CoordKey, WeatherCategory>,
    failing: HashSet<CoordKey>,
    calls: AtomicUsize,
}

impl StubWeatherProvider {
    /// Provider returning `category` everywhere.
    pub fn always(category: WeatherCategory) -> Self {
        Self {
            default: Some(category),
            ..Self::default()
        }
    }

    /// Override the forecast at `location`.
    #[must_use]
    pub fn with_forecast_at(mut self, location: Coord<f64>, category: WeatherCategory) -> Self {
        self.forecasts.insert(coord_key(location), category);
        self
    }

    /// Fail every request for `location`.
    #[must_use]
    pub fn failing_at(mut self, location: Coord<f64>) -> Self {
        self.failing.insert(coord_key(location));
        self
    }

    /// Number of forecasts requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    async fn forecast(
        &self,
        location: Coord<f64>,
        _date: NaiveDate,
    ) -> Result<Option<WeatherCategory>, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = coord_key(location);
        if self.failing.contains(&key) {
            return Err(WeatherError::Network {
                url: "stub://forecast".to_owned(),
                message: "scripted failure".to_owned(),
            });
        }
        Ok(self.forecasts.get(&key).copied().or(self.default))
    }
}

/// `TrailStore` wrapper that records every query and can fail the first
/// few of them.
#[derive(Debug, Default)]
pub struct RecordingTrailStore {
    inner: MemoryTrailStore,
    failures_remaining: AtomicUsize,
    queries: Mutex<Vec<FilterSet>>,
}

impl RecordingTrailStore {
    /// Wrap a store built from `trails`.
    pub fn with_trails<I>(trails: I) -> Self
    where
        I: IntoIterator<Item = Trail>,
    {
        Self {
            inner: MemoryTrailStore::with_trails(trails),
            ..Self::default()
        }
    }

    /// Fail the next `count` queries.
    #[must_use]
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Filter sets queried so far, oldest first.
    pub fn queries(&self) -> Vec<FilterSet> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

impl TrailStore for RecordingTrailStore {
    fn query(&self, filters: &FilterSet) -> Result<Vec<Trail>, TrailStoreError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(filters.clone());
        }
        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(TrailStoreError::Unavailable {
                reason: "scripted failure".to_owned(),
            });
        }
        self.inner.query(filters)
    }

    fn get(&self, id: u64) -> Result<Option<Trail>, TrailStoreError> {
        self.inner.get(id)
    }
}

/// Create a `trails` table at `path` and insert `trails`.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_trails(
    path: &std::path::Path,
    trails: &[Trail],
) -> Result<(), rusqlite::Error> {
    fn json<T: serde::Serialize>(value: &T) -> Result<String, rusqlite::Error> {
        serde_json::to_string(value)
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
    }

    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute(
        "CREATE TABLE trails (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            difficulty REAL NOT NULL,
            distance_km REAL NOT NULL,
            duration_minutes INTEGER NOT NULL,
            elevation_gain_m REAL NOT NULL,
            landscapes TEXT NOT NULL DEFAULT '[]',
            trail_type TEXT NOT NULL DEFAULT 'loop',
            safety_risks TEXT NOT NULL DEFAULT '[]',
            popularity REAL NOT NULL DEFAULT 0,
            closed_seasons TEXT NOT NULL DEFAULT '[]',
            lon REAL NOT NULL,
            lat REAL NOT NULL,
            valid INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO trails (id, name, difficulty, distance_km, duration_minutes,
                elevation_gain_m, landscapes, trail_type, safety_risks, popularity,
                closed_seasons, lon, lat, valid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )?;
        for trail in trails {
            insert.execute(rusqlite::params![
                trail.id,
                trail.name,
                trail.difficulty,
                trail.distance_km,
                trail.duration_minutes,
                trail.elevation_gain_m,
                json(&trail.landscapes)?,
                trail.trail_type.as_str(),
                json(&trail.safety_risks)?,
                trail.popularity,
                json(&trail.closed_seasons)?,
                trail.location.x,
                trail.location.y,
                trail.valid,
            ])?;
        }
    }
    tx.commit()
}
