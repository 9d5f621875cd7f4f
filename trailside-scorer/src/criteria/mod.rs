//! The eight scoring criteria and their weights.
//!
//! Each criterion inspects one aspect of a trail against the hiker and the
//! request, returning a [`CriterionResult`] with a match flag, partial
//! credit in `0.0..=1.0` and a short message. [`CriteriaSet`] holds them in
//! a fixed order so explanations read the same way for every trail.

mod conditions;
mod fit;

use trailside_core::{
    Archetype, CriterionKind, CriterionResult, SearchContext, Trail, UserProfile,
    WeatherCategory,
};

use crate::CriterionError;

pub use conditions::{LandscapeCriterion, SafetyCriterion, SeasonCriterion, WeatherCriterion};
pub use fit::{DifficultyCriterion, DistanceCriterion, DurationCriterion, ElevationCriterion};

/// Score given when a criterion has nothing to judge.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// One scoring dimension.
pub trait Criterion: Send + Sync + std::fmt::Debug {
    /// Which criterion this is.
    fn kind(&self) -> CriterionKind;

    /// Display name.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Positive weight in the relevance average.
    fn weight(&self) -> f64;

    /// Judge `trail` for `user` under `context`, with the forecast fetched
    /// for the hike date when one is available.
    ///
    /// # Errors
    ///
    /// Returns [`CriterionError::NonFinite`] when an attribute the criterion
    /// reads is NaN or infinite.
    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError>;
}

/// Weight of every criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionWeights {
    /// Safety weight.
    pub safety: f64,
    /// Duration weight.
    pub duration: f64,
    /// Difficulty weight.
    pub difficulty: f64,
    /// Distance weight.
    pub distance: f64,
    /// Elevation weight.
    pub elevation: f64,
    /// Landscape weight.
    pub landscape: f64,
    /// Season weight.
    pub season: f64,
    /// Weather weight.
    pub weather: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            safety: 3.0,
            duration: 3.0,
            difficulty: 2.0,
            distance: 1.5,
            elevation: 1.5,
            landscape: 1.0,
            season: 1.0,
            weather: 1.0,
        }
    }
}

impl CriterionWeights {
    /// Emphasise the criteria an archetype cares about.
    ///
    /// # Examples
    /// ```
    /// use trailside_core::Archetype;
    /// use trailside_scorer::CriterionWeights;
    ///
    /// let weights = CriterionWeights::default().emphasise(Some(Archetype::ElevationSeeker));
    /// assert!((weights.elevation - 2.25).abs() < 1e-9);
    /// assert!((weights.safety - 3.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn emphasise(mut self, archetype: Option<Archetype>) -> Self {
        match archetype {
            Some(Archetype::ElevationSeeker) => self.elevation *= 1.5,
            Some(Archetype::PerformanceAthlete) => {
                self.distance *= 1.5;
                self.duration *= 1.2;
            }
            Some(Archetype::Contemplative | Archetype::Photographer) => self.landscape *= 1.5,
            Some(Archetype::Explorer) => self.landscape *= 1.3,
            Some(Archetype::Casual | Archetype::Family) => self.difficulty *= 1.3,
            None => {}
        }
        self
    }

    /// Weight configured for `kind`.
    pub const fn get(&self, kind: CriterionKind) -> f64 {
        match kind {
            CriterionKind::Safety => self.safety,
            CriterionKind::Duration => self.duration,
            CriterionKind::Difficulty => self.difficulty,
            CriterionKind::Distance => self.distance,
            CriterionKind::Elevation => self.elevation,
            CriterionKind::Landscape => self.landscape,
            CriterionKind::Season => self.season,
            CriterionKind::Weather => self.weather,
        }
    }

    fn validate(self) -> Result<Self, CriterionError> {
        for kind in ORDER {
            let weight = self.get(kind);
            if !(weight.is_finite() && weight > 0.0) {
                return Err(CriterionError::InvalidWeight { kind, weight });
            }
        }
        Ok(self)
    }
}

const ORDER: [CriterionKind; 8] = [
    CriterionKind::Safety,
    CriterionKind::Duration,
    CriterionKind::Difficulty,
    CriterionKind::Distance,
    CriterionKind::Elevation,
    CriterionKind::Landscape,
    CriterionKind::Season,
    CriterionKind::Weather,
];

/// The ordered collection of criteria a scorer evaluates.
#[derive(Debug)]
pub struct CriteriaSet {
    criteria: Vec<Box<dyn Criterion>>,
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::build(CriterionWeights::default())
    }
}

impl CriteriaSet {
    /// Criteria with custom weights.
    ///
    /// # Errors
    ///
    /// Returns [`CriterionError::InvalidWeight`] when a weight is zero,
    /// negative or not finite.
    pub fn with_weights(weights: CriterionWeights) -> Result<Self, CriterionError> {
        Ok(Self::build(weights.validate()?))
    }

    /// Default weights re-balanced for `archetype`.
    #[must_use]
    pub fn for_archetype(archetype: Option<Archetype>) -> Self {
        Self::build(CriterionWeights::default().emphasise(archetype))
    }

    fn build(weights: CriterionWeights) -> Self {
        let criteria: Vec<Box<dyn Criterion>> = vec![
            Box::new(SafetyCriterion::new(weights.safety)),
            Box::new(DurationCriterion::new(weights.duration)),
            Box::new(DifficultyCriterion::new(weights.difficulty)),
            Box::new(DistanceCriterion::new(weights.distance)),
            Box::new(ElevationCriterion::new(weights.elevation)),
            Box::new(LandscapeCriterion::new(weights.landscape)),
            Box::new(SeasonCriterion::new(weights.season)),
            Box::new(WeatherCriterion::new(weights.weather)),
        ];
        Self { criteria }
    }

    /// Criteria in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Criterion> {
        self.criteria.iter().map(Box::as_ref)
    }

    /// Sum of every weight.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight()).sum()
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the set holds no criteria.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

fn result(
    kind: CriterionKind,
    weight: f64,
    matches: bool,
    score: f64,
    message: impl Into<String>,
) -> CriterionResult {
    CriterionResult {
        kind,
        matches,
        score: score.clamp(0.0, 1.0),
        message: message.into(),
        weight,
    }
}

fn finite(trail: &Trail, attribute: &'static str, value: f64) -> Result<f64, CriterionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CriterionError::NonFinite {
            trail_id: trail.id,
            attribute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_set_is_ordered_and_weighted() {
        let set = CriteriaSet::default();
        let kinds: Vec<_> = set.iter().map(Criterion::kind).collect();
        assert_eq!(kinds, ORDER.to_vec());
        assert!((set.total_weight() - 14.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(Some(Archetype::PerformanceAthlete), CriterionKind::Distance, 2.25)]
    #[case(Some(Archetype::PerformanceAthlete), CriterionKind::Duration, 3.6)]
    #[case(Some(Archetype::Photographer), CriterionKind::Landscape, 1.5)]
    #[case(Some(Archetype::Explorer), CriterionKind::Landscape, 1.3)]
    #[case(Some(Archetype::Family), CriterionKind::Difficulty, 2.6)]
    #[case(None, CriterionKind::Landscape, 1.0)]
    fn archetypes_reweight_their_criteria(
        #[case] archetype: Option<Archetype>,
        #[case] kind: CriterionKind,
        #[case] expected: f64,
    ) {
        let set = CriteriaSet::for_archetype(archetype);
        let weight = set
            .iter()
            .find(|criterion| criterion.kind() == kind)
            .map(Criterion::weight)
            .unwrap_or_default();
        assert!((weight - expected).abs() < 1e-9, "{kind}: {weight}");
    }

    #[rstest]
    fn safety_and_duration_stay_heaviest() {
        for archetype in Archetype::ALL {
            let weights = CriterionWeights::default().emphasise(Some(archetype));
            let heaviest = weights.safety.min(weights.duration);
            for kind in &ORDER[2..] {
                assert!(weights.get(*kind) < heaviest, "{archetype:?} {kind}");
            }
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn rejects_non_positive_weights(#[case] weight: f64) {
        let weights = CriterionWeights {
            weather: weight,
            ..CriterionWeights::default()
        };
        assert!(matches!(
            CriteriaSet::with_weights(weights),
            Err(CriterionError::InvalidWeight {
                kind: CriterionKind::Weather,
                ..
            })
        ));
    }
}
