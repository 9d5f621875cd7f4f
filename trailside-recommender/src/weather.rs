//! Forecast enrichment for the best-scored candidates.
//!
//! Only the top-K trails by relevance are looked up. Requests fan out
//! through `buffer_unordered` with a bounded number in flight, and answers
//! are cached per rounded location and date for the engine's lifetime. A
//! failed lookup leaves the trail without a forecast, which the criteria
//! treat as neutral.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use futures_util::{StreamExt, stream};
use geo::Coord;
use log::{debug, warn};
use lru::LruCache;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use trailside_core::{Trail, WeatherCategory, WeatherProvider};

use crate::WeatherEnrichmentConfig;

/// Location rounded to 0.01 degrees, plus the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    lat_centi: i64,
    lon_centi: i64,
    date: NaiveDate,
}

impl ForecastKey {
    /// Key for `location` on `date`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "coordinates scaled by 100 fit comfortably in i64"
    )]
    pub fn new(location: Coord<f64>, date: NaiveDate) -> Self {
        Self {
            lat_centi: (location.y * 100.0).round() as i64,
            lon_centi: (location.x * 100.0).round() as i64,
            date,
        }
    }
}

/// Forecasts found for one batch of trails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Forecast per trail id; trails without an entry stay neutral.
    pub forecasts: HashMap<u64, WeatherCategory>,
    /// Lookups that reached the provider.
    pub requested: usize,
    /// Lookups answered from the cache.
    pub cache_hits: usize,
    /// Lookups that failed.
    pub failures: usize,
}

/// Fetches forecasts with bounded concurrency behind an LRU cache.
pub struct WeatherEnricher<W> {
    provider: W,
    config: WeatherEnrichmentConfig,
    cache: Mutex<LruCache<ForecastKey, Option<WeatherCategory>>>,
    runtime: OnceLock<Option<Runtime>>,
}

impl<W> std::fmt::Debug for WeatherEnricher<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherEnricher")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl<W: WeatherProvider> WeatherEnricher<W> {
    /// Enricher over `provider`. The private runtime is only built the
    /// first time a lookup happens outside any Tokio runtime.
    pub fn new(provider: W, config: WeatherEnrichmentConfig) -> Self {
        Self {
            provider,
            cache: Mutex::new(LruCache::new(config.cache_capacity)),
            config,
            runtime: OnceLock::new(),
        }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &W {
        &self.provider
    }

    /// Fetch forecasts for `trails` on `date`, best first; only the first
    /// `top_k` are looked up.
    ///
    /// Called from inside a multi-threaded Tokio runtime, the lookups run on
    /// that runtime through `block_in_place`. Inside a current-thread runtime
    /// no lookups are made, since blocking would stall the caller's own
    /// executor.
    pub fn enrich(&self, trails: &[&Trail], date: NaiveDate) -> Enrichment {
        let selected = trails.get(..self.config.top_k).unwrap_or(trails);
        if selected.is_empty() {
            return Enrichment::default();
        }
        let future = self.fetch(selected, date);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => {
                warn!("skipping forecasts: called from a current-thread runtime");
                Enrichment::default()
            }
            Err(_) => match self.own_runtime() {
                Some(runtime) => runtime.block_on(future),
                None => Enrichment::default(),
            },
        }
    }

    fn own_runtime(&self) -> Option<&Runtime> {
        self.runtime
            .get_or_init(|| {
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|err| warn!("skipping forecasts: no runtime: {err}"))
                    .ok()
            })
            .as_ref()
    }

    async fn fetch(&self, trails: &[&Trail], date: NaiveDate) -> Enrichment {
        let mut enrichment = Enrichment::default();
        let mut pending: HashMap<ForecastKey, (Coord<f64>, Vec<u64>)> = HashMap::new();
        for trail in trails {
            let key = ForecastKey::new(trail.location, date);
            match self.cached(&key) {
                Some(cached) => {
                    enrichment.cache_hits += 1;
                    if let Some(category) = cached {
                        enrichment.forecasts.insert(trail.id, category);
                    }
                }
                None => pending
                    .entry(key)
                    .or_insert_with(|| (trail.location, Vec::new()))
                    .1
                    .push(trail.id),
            }
        }
        if enrichment.cache_hits > 0 {
            debug!("{} forecast cache hits", enrichment.cache_hits);
        }

        enrichment.requested = pending.len();
        let provider = &self.provider;
        let results: Vec<_> = stream::iter(pending)
            .map(|(key, (location, ids))| async move {
                (key, ids, provider.forecast(location, date).await)
            })
            .buffer_unordered(self.config.max_in_flight.max(1))
            .collect()
            .await;

        for (key, ids, outcome) in results {
            match outcome {
                Ok(category) => {
                    self.remember(key, category);
                    if let Some(category) = category {
                        enrichment
                            .forecasts
                            .extend(ids.into_iter().map(|id| (id, category)));
                    }
                }
                Err(err) => {
                    enrichment.failures += 1;
                    warn!("forecast lookup failed for trails {ids:?}: {err}");
                }
            }
        }
        enrichment
    }

    fn cached(&self, key: &ForecastKey) -> Option<Option<WeatherCategory>> {
        self.cache
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(key).copied())
    }

    fn remember(&self, key: ForecastKey, category: Option<WeatherCategory>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use trailside_core::test_support::StubWeatherProvider;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 14).expect("valid date")
    }

    fn trail(id: u64, x: f64) -> Trail {
        Trail::new(id, format!("Trail {id}"), Coord { x, y: 46.0 })
    }

    #[fixture]
    fn trails() -> Vec<Trail> {
        [7.1, 7.2, 7.3, 7.4, 7.5]
            .into_iter()
            .zip(1..)
            .map(|(x, id)| trail(id, x))
            .collect()
    }

    fn enricher(provider: StubWeatherProvider, top_k: usize) -> WeatherEnricher<StubWeatherProvider> {
        WeatherEnricher::new(
            provider,
            WeatherEnrichmentConfig {
                top_k,
                ..WeatherEnrichmentConfig::default()
            },
        )
    }

    #[rstest]
    fn only_top_k_trails_are_looked_up(trails: Vec<Trail>) {
        let enricher = enricher(StubWeatherProvider::always(WeatherCategory::Sunny), 3);
        let refs: Vec<&Trail> = trails.iter().collect();
        let enrichment = enricher.enrich(&refs, date());
        assert_eq!(enricher.provider().calls(), 3);
        assert_eq!(enrichment.forecasts.len(), 3);
        assert!(!enrichment.forecasts.contains_key(&4));
    }

    #[rstest]
    fn repeated_lookups_hit_the_cache(trails: Vec<Trail>) {
        let enricher = enricher(StubWeatherProvider::always(WeatherCategory::Cloudy), 20);
        let refs: Vec<&Trail> = trails.iter().collect();
        let first = enricher.enrich(&refs, date());
        let second = enricher.enrich(&refs, date());
        assert_eq!(enricher.provider().calls(), 5);
        assert_eq!(first.requested, 5);
        assert_eq!(second.cache_hits, 5);
        assert_eq!(first.forecasts, second.forecasts);
    }

    #[rstest]
    fn nearby_trails_share_a_lookup() {
        let near = [trail(1, 7.001), trail(2, 7.002)];
        let enricher = enricher(StubWeatherProvider::always(WeatherCategory::Rainy), 20);
        let refs: Vec<&Trail> = near.iter().collect();
        let enrichment = enricher.enrich(&refs, date());
        assert_eq!(enricher.provider().calls(), 1);
        assert_eq!(enrichment.forecasts.len(), 2);
    }

    #[rstest]
    fn failures_leave_the_forecast_empty(trails: Vec<Trail>) {
        let failing = trails
            .first()
            .map(|t| t.location)
            .expect("fixture has trails");
        let provider = StubWeatherProvider::always(WeatherCategory::Sunny).failing_at(failing);
        let enricher = enricher(provider, 20);
        let refs: Vec<&Trail> = trails.iter().collect();
        let enrichment = enricher.enrich(&refs, date());
        assert_eq!(enrichment.failures, 1);
        assert!(!enrichment.forecasts.contains_key(&1));
        assert_eq!(enrichment.forecasts.len(), 4);

        // Failures are not cached.
        enricher.enrich(&refs, date());
        assert_eq!(enricher.provider().calls(), 6);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn runs_inside_a_multi_thread_runtime(trails: Vec<Trail>) {
        let enricher = enricher(StubWeatherProvider::always(WeatherCategory::Snowy), 20);
        let refs: Vec<&Trail> = trails.iter().collect();
        let enrichment = enricher.enrich(&refs, date());
        assert_eq!(enrichment.forecasts.len(), 5);
    }
}
