use std::collections::BTreeMap;

use crate::{FilterSet, Trail};

use super::{TrailStore, TrailStoreError};

/// In-memory `TrailStore` backed by a map keyed by trail id.
///
/// The store performs a linear scan and suits datasets loaded from a file.
#[derive(Debug, Default, Clone)]
pub struct MemoryTrailStore {
    trails: BTreeMap<u64, Trail>,
}

impl MemoryTrailStore {
    /// Create a store from a collection of trails. Later duplicates replace
    /// earlier ones.
    pub fn with_trails<I>(trails: I) -> Self
    where
        I: IntoIterator<Item = Trail>,
    {
        Self {
            trails: trails.into_iter().map(|trail| (trail.id, trail)).collect(),
        }
    }

    /// Number of stored trails.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

impl TrailStore for MemoryTrailStore {
    fn query(&self, filters: &FilterSet) -> Result<Vec<Trail>, TrailStoreError> {
        Ok(self
            .trails
            .values()
            .filter(|trail| filters.admits(trail))
            .cloned()
            .collect())
    }

    fn get(&self, id: u64) -> Result<Option<Trail>, TrailStoreError> {
        Ok(self.trails.get(&id).cloned())
    }
}
