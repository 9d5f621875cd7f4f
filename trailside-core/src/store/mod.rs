//! Candidate retrieval.
//!
//! The `TrailStore` trait defines a read-only interface for retrieving
//! [`Trail`] values that satisfy a [`FilterSet`]. The recommender queries it
//! once per fallback level.

use thiserror::Error;

use crate::{FilterSet, Trail};

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryTrailStore;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteTrailStore, SqliteTrailStoreError};

/// Errors raised by [`TrailStore`] implementations.
#[derive(Debug, Error)]
pub enum TrailStoreError {
    /// The backing storage failed.
    #[error("trail store backend failed: {source}")]
    Backend {
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The store cannot answer queries right now.
    #[error("trail store is unavailable: {reason}")]
    Unavailable {
        /// Why the store is unavailable.
        reason: String,
    },
}

/// Read-only access to persisted trails.
///
/// Implementations must return exactly the trails for which
/// [`FilterSet::admits`] holds; ordering is unspecified.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use trailside_core::{FilterSet, MemoryTrailStore, Trail, TrailStore};
///
/// let store = MemoryTrailStore::with_trails([
///     Trail::new(1, "Easy", Coord { x: 0.0, y: 0.0 }).with_difficulty(2.0),
///     Trail::new(2, "Hard", Coord { x: 0.0, y: 0.0 }).with_difficulty(8.0),
/// ]);
/// let filters = FilterSet { max_difficulty: Some(3.0), ..FilterSet::default() };
///
/// let found = store.query(&filters)?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, 1);
/// # Ok::<(), trailside_core::TrailStoreError>(())
/// ```
pub trait TrailStore: Send + Sync {
    /// Return every trail admitted by `filters`.
    fn query(&self, filters: &FilterSet) -> Result<Vec<Trail>, TrailStoreError>;

    /// Look up a single trail.
    fn get(&self, id: u64) -> Result<Option<Trail>, TrailStoreError>;
}

impl<T: TrailStore + ?Sized> TrailStore for Box<T> {
    fn query(&self, filters: &FilterSet) -> Result<Vec<Trail>, TrailStoreError> {
        (**self).query(filters)
    }

    fn get(&self, id: u64) -> Result<Option<Trail>, TrailStoreError> {
        (**self).get(id)
    }
}
