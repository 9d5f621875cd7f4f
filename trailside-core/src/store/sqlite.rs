//! SQLite-backed store implementation for persisted trails.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};

use geo::Coord;
use rusqlite::{Connection, OpenFlags, Row, params_from_iter, types::Value};
use thiserror::Error;

use crate::{FilterSet, Season, Trail, TrailType};

use super::{TrailStore, TrailStoreError};

const SELECT_COLUMNS: &str = "SELECT id, name, difficulty, distance_km, duration_minutes, \
     elevation_gain_m, landscapes, trail_type, safety_risks, popularity, closed_seasons, \
     lon, lat, valid FROM trails";

/// Error raised when reading persisted trails.
#[derive(Debug, Error)]
pub enum SqliteTrailStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored tag column was not a valid JSON array.
    #[error("failed to parse {column} for trail {id}: {source}")]
    InvalidTags {
        /// Identifier of the trail whose tags failed to parse.
        id: u64,
        /// Column holding the payload.
        column: &'static str,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The stored trail type was not recognised.
    #[error("trail {id} has unknown trail type '{value}'")]
    InvalidTrailType {
        /// Identifier of the offending trail.
        id: u64,
        /// Stored value.
        value: String,
    },
    /// Generic SQLite error when reading trail rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<SqliteTrailStoreError> for TrailStoreError {
    fn from(error: SqliteTrailStoreError) -> Self {
        Self::Backend {
            source: Box::new(error),
        }
    }
}

/// Read-only trail store backed by a SQLite `trails` table.
///
/// Numeric bounds and the validity flag are pushed into SQL; tag predicates
/// are applied after decoding so results always agree with
/// [`FilterSet::admits`].
pub struct SqliteTrailStore {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl fmt::Debug for SqliteTrailStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteTrailStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteTrailStore {
    /// Open the database at `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteTrailStoreError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteTrailStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: path.to_path_buf(),
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, SqliteTrailStoreError>,
    ) -> Result<T, TrailStoreError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| TrailStoreError::Unavailable {
                reason: "SQLite connection lock poisoned".to_owned(),
            })?;
        f(&connection).map_err(TrailStoreError::from)
    }
}

impl TrailStore for SqliteTrailStore {
    fn query(&self, filters: &FilterSet) -> Result<Vec<Trail>, TrailStoreError> {
        let (clause, params) = where_clause(filters);
        let sql = format!("{SELECT_COLUMNS}{clause} ORDER BY id");
        self.with_connection(|connection| {
            let mut statement = connection.prepare(&sql)?;
            let mut rows = statement.query(params_from_iter(params))?;
            let mut trails = Vec::new();
            while let Some(row) = rows.next()? {
                let trail = decode_trail(row)?;
                if filters.admits(&trail) {
                    trails.push(trail);
                }
            }
            Ok(trails)
        })
    }

    fn get(&self, id: u64) -> Result<Option<Trail>, TrailStoreError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        self.with_connection(|connection| {
            let mut statement = connection.prepare(&sql)?;
            let mut rows = statement.query([id])?;
            rows.next()?.map(decode_trail).transpose()
        })
    }
}

fn where_clause(filters: &FilterSet) -> (String, Vec<Value>) {
    let mut predicates: Vec<&str> = Vec::new();
    let mut params = Vec::new();
    let real_bounds = [
        ("difficulty >= ?", filters.min_difficulty),
        ("difficulty <= ?", filters.max_difficulty),
        ("distance_km >= ?", filters.min_distance_km),
        ("distance_km <= ?", filters.max_distance_km),
        ("elevation_gain_m >= ?", filters.min_elevation_m),
        ("elevation_gain_m <= ?", filters.max_elevation_m),
    ];
    for (predicate, bound) in real_bounds {
        if let Some(value) = bound {
            predicates.push(predicate);
            params.push(Value::Real(value));
        }
    }
    let integer_bounds = [
        ("duration_minutes >= ?", filters.min_duration_minutes),
        ("duration_minutes <= ?", filters.max_duration_minutes),
    ];
    for (predicate, bound) in integer_bounds {
        if let Some(value) = bound {
            predicates.push(predicate);
            params.push(Value::Integer(i64::from(value)));
        }
    }
    if filters.require_valid {
        predicates.push("valid = 1");
    }
    if predicates.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", predicates.join(" AND ")), params)
    }
}

fn decode_tags<T>(id: u64, column: &'static str, json: &str) -> Result<T, SqliteTrailStoreError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|source| SqliteTrailStoreError::InvalidTags {
        id,
        column,
        source,
    })
}

fn decode_trail(row: &Row<'_>) -> Result<Trail, SqliteTrailStoreError> {
    let id: u64 = row.get(0)?;
    let landscapes: String = row.get(6)?;
    let trail_type: String = row.get(7)?;
    let safety_risks: String = row.get(8)?;
    let closed_seasons: String = row.get(10)?;

    Ok(Trail {
        id,
        name: row.get(1)?,
        difficulty: row.get(2)?,
        distance_km: row.get(3)?,
        duration_minutes: row.get(4)?,
        elevation_gain_m: row.get(5)?,
        landscapes: decode_tags::<BTreeSet<String>>(id, "landscapes", &landscapes)?,
        trail_type: TrailType::from_str(&trail_type).map_err(|_| {
            SqliteTrailStoreError::InvalidTrailType {
                id,
                value: trail_type.clone(),
            }
        })?,
        safety_risks: decode_tags::<BTreeSet<String>>(id, "safety_risks", &safety_risks)?,
        popularity: row.get(9)?,
        closed_seasons: decode_tags::<BTreeSet<Season>>(id, "closed_seasons", &closed_seasons)?,
        location: Coord {
            x: row.get(11)?,
            y: row.get(12)?,
        },
        valid: row.get(13)?,
    })
}
