//! Request orchestration: filter building, progressive retrieval, scoring,
//! forecast enrichment and ranking.

use log::{debug, warn};
use trailside_core::{
    FilterSet, RankedResult, ScoredTrail, SearchContext, Trail, TrailStore, TrailStoreError,
    UserProfile, WeatherProvider,
};
use trailside_rules::{BuildOutcome, FilterBuilder};
use trailside_scorer::{Ranker, Scorer};

use crate::fallback::{ensure_multi_day_window, relax};
use crate::{
    Explanation, Recommendation, RecommendationMetadata, RecommendError, RecommenderConfig,
    WeatherEnricher,
};

/// Candidates found at one fallback level.
struct Retrieval {
    level: u8,
    candidates: Vec<Trail>,
}

/// Hiking-trail recommender.
///
/// Generic over the candidate store and the forecast provider. Rules are
/// compiled once at construction and the forecast cache lives as long as
/// the recommender.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailside_core::{
///     ExperienceLevel, FitnessLevel, MemoryTrailStore, OfflineWeatherProvider,
///     SearchContext, Trail, UserProfile,
/// };
/// use trailside_recommender::Recommender;
///
/// let store = MemoryTrailStore::with_trails([Trail::new(1, "Lakeside", Coord { x: 7.0, y: 46.0 })
///     .with_difficulty(2.0)
///     .with_duration_minutes(60)
///     .with_distance_km(4.0)]);
/// let recommender = Recommender::new(store, OfflineWeatherProvider);
/// let user = UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low);
/// let context = SearchContext::default().with_time_available(90);
///
/// let recommendation = recommender.recommend(&user, &context);
/// assert_eq!(recommendation.metadata.error, None);
/// assert_eq!(recommendation.trails().count(), 1);
/// ```
pub struct Recommender<S, W>
where
    S: TrailStore,
    W: WeatherProvider,
{
    store: S,
    builder: FilterBuilder,
    enricher: WeatherEnricher<W>,
    ranker: Ranker,
    config: RecommenderConfig,
}

impl<S, W> std::fmt::Debug for Recommender<S, W>
where
    S: TrailStore,
    W: WeatherProvider,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("rules", &self.builder.rules().len())
            .field("enricher", &self.enricher)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S, W> Recommender<S, W>
where
    S: TrailStore,
    W: WeatherProvider,
{
    /// Recommender with the built-in rules and default configuration.
    pub fn new(store: S, weather: W) -> Self {
        let config = RecommenderConfig::default();
        Self {
            store,
            builder: FilterBuilder::with_default_rules(),
            enricher: WeatherEnricher::new(weather, config.weather),
            ranker: Ranker::new(config.distance_leniency),
            config,
        }
    }

    /// Recommender with explicit rules and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidConfig`] when `config` fails
    /// [`RecommenderConfig::validate`].
    pub fn with_config(
        store: S,
        weather: W,
        builder: FilterBuilder,
        config: RecommenderConfig,
    ) -> Result<Self, RecommendError> {
        config.validate()?;
        Ok(Self {
            store,
            builder,
            enricher: WeatherEnricher::new(weather, config.weather),
            ranker: Ranker::new(config.distance_leniency),
            config,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Candidate store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Forecast provider.
    pub const fn weather(&self) -> &W {
        self.enricher.provider()
    }

    /// Recommend trails for `user` in `context`.
    ///
    /// Never fails: a fault that escapes the pipeline's own recovery yields
    /// an empty recommendation with `metadata.error` set.
    pub fn recommend(&self, user: &UserProfile, context: &SearchContext) -> Recommendation {
        let mut warnings = Vec::new();
        match self.try_recommend(user, context, &mut warnings) {
            Ok(recommendation) => recommendation,
            Err(err) => {
                warn!("recommendation failed: {err}");
                Recommendation::failed(err, warnings)
            }
        }
    }

    fn try_recommend(
        &self,
        user: &UserProfile,
        context: &SearchContext,
        warnings: &mut Vec<String>,
    ) -> Result<Recommendation, RecommendError> {
        let BuildOutcome {
            mut filters,
            display,
            activated_rules,
            warnings: rule_warnings,
        } = self.build_filters(user, context, warnings);
        warnings.extend(rule_warnings);
        ensure_multi_day_window(&mut filters, context);

        let Some(retrieval) = self.retrieve(&filters, context, warnings)? else {
            return Ok(Recommendation {
                activated_rules,
                display_settings: display,
                metadata: RecommendationMetadata {
                    fallback_level: self.config.max_level,
                    threshold: self
                        .config
                        .threshold_at(usize::from(self.config.max_level.saturating_sub(1))),
                    warnings: std::mem::take(warnings),
                    ..RecommendationMetadata::default()
                },
                ..Recommendation::default()
            });
        };

        let candidate_count = retrieval.candidates.len();
        let scorer = Scorer::for_user(user);
        let mut scored = scorer.score_all(retrieval.candidates, user, context);
        let weather_fetched_count = self.enrich(&scorer, &mut scored, user, context);

        // Relaxation only widens retrieval; exact matches answer to the
        // filters as built.
        let (ranked, threshold) =
            self.rank(scored, &filters, retrieval.level, user, context, warnings);

        let explanations = ranked
            .exact_matches
            .iter()
            .chain(&ranked.suggestions)
            .map(|trail| Explanation::for_trail(trail, user.archetype))
            .collect();
        debug!(
            "recommended {} exact matches and {} suggestions at level {}",
            ranked.exact_matches.len(),
            ranked.suggestions.len(),
            retrieval.level
        );
        Ok(Recommendation {
            exact_matches: ranked.exact_matches,
            suggestions: ranked.suggestions,
            activated_rules,
            display_settings: display,
            explanations,
            metadata: RecommendationMetadata {
                candidate_count,
                fallback_level: retrieval.level,
                threshold,
                weather_fetched_count,
                warnings: std::mem::take(warnings),
                error: None,
            },
        })
    }

    fn build_filters(
        &self,
        user: &UserProfile,
        context: &SearchContext,
        warnings: &mut Vec<String>,
    ) -> BuildOutcome {
        self.builder.build(user, context).unwrap_or_else(|err| {
            warn!("using validity-only filters: {err}");
            warnings.push(format!("filter building failed: {err}"));
            BuildOutcome {
                filters: FilterSet::validity_only(),
                ..BuildOutcome::default()
            }
        })
    }

    /// Walk the fallback levels until one yields a candidate.
    ///
    /// Returns `Ok(None)` when every level answered with nothing, and an
    /// error only when every level failed.
    fn retrieve(
        &self,
        base: &FilterSet,
        context: &SearchContext,
        warnings: &mut Vec<String>,
    ) -> Result<Option<Retrieval>, RecommendError> {
        let mut last_error: Option<TrailStoreError> = None;
        let mut answered = false;
        for level in 1..=self.config.max_level {
            let filters = relax(base, level, context);
            match self.store.query(&filters) {
                Ok(candidates) if !candidates.is_empty() => {
                    debug!("level {level} retrieved {} candidates", candidates.len());
                    return Ok(Some(Retrieval { level, candidates }));
                }
                Ok(_) => {
                    answered = true;
                    debug!("level {level} retrieved nothing, relaxing");
                }
                Err(err) => {
                    warn!("retrieval failed at level {level}: {err}");
                    warnings.push(format!("retrieval failed at level {level}: {err}"));
                    last_error = Some(err);
                }
            }
        }
        match last_error {
            Some(source) if !answered => Err(RecommendError::StoreUnavailable {
                levels: self.config.max_level,
                source,
            }),
            _ => Ok(None),
        }
    }

    /// Attach forecasts to the best-scored trails and rescore them.
    /// Returns how many trails received a forecast.
    fn enrich(
        &self,
        scorer: &Scorer,
        scored: &mut Vec<ScoredTrail>,
        user: &UserProfile,
        context: &SearchContext,
    ) -> usize {
        let Some(date) = context.hike_start else {
            return 0;
        };
        scored.sort_by(ScoredTrail::ranking_order);
        let trails: Vec<_> = scored.iter().map(|s| &s.trail).collect();
        let enrichment = self.enricher.enrich(&trails, date);
        if enrichment.forecasts.is_empty() {
            return 0;
        }
        let fetched = enrichment.forecasts.len();
        *scored = std::mem::take(scored)
            .into_iter()
            .map(|trail| match enrichment.forecasts.get(&trail.trail.id) {
                Some(category) => scorer.rescore(trail, user, context, Some(*category)),
                None => trail,
            })
            .collect();
        fetched
    }

    /// Rank at the exit level's threshold, descending the threshold
    /// sequence while no exact match appears.
    fn rank(
        &self,
        scored: Vec<ScoredTrail>,
        filters: &FilterSet,
        level: u8,
        user: &UserProfile,
        context: &SearchContext,
        warnings: &mut Vec<String>,
    ) -> (RankedResult, f64) {
        let first = usize::from(level.saturating_sub(1));
        let last = if self.config.always_return {
            self.config.thresholds.len().max(first + 1)
        } else {
            first + 1
        };
        let mut threshold = self.config.threshold_at(first);
        let mut ranked = RankedResult::default();
        for index in first..last {
            threshold = self.config.threshold_at(index);
            match self
                .ranker
                .rank(scored.clone(), filters, user, context, threshold)
            {
                Ok(result) => {
                    ranked = result;
                    if !ranked.exact_matches.is_empty() {
                        break;
                    }
                    debug!("no exact match at threshold {threshold}");
                }
                Err(err) => {
                    warn!("ranking failed: {err}");
                    warnings.push(format!("ranking failed: {err}"));
                    if self.config.always_return {
                        ranked = self.raw_suggestions(scored, user, context);
                    }
                    return (ranked, threshold);
                }
            }
        }
        (ranked, threshold)
    }

    /// Best `top_n` hard-filter survivors by raw score, skipping trails
    /// whose relevance is not a number.
    fn raw_suggestions(
        &self,
        scored: Vec<ScoredTrail>,
        user: &UserProfile,
        context: &SearchContext,
    ) -> RankedResult {
        let mut suggestions = Ranker::hard_filter(scored, user, context);
        suggestions.retain(|trail| trail.relevance.is_finite());
        suggestions.sort_by(ScoredTrail::ranking_order);
        suggestions.truncate(self.config.top_n);
        RankedResult {
            exact_matches: Vec::new(),
            suggestions,
        }
    }
}
