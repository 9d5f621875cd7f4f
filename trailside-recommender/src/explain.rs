//! Deterministic, template-based explanations for returned trails.

use trailside_core::{Archetype, CriterionResult, ScoredTrail};

/// Strengths listed per trail.
const MAX_STRENGTHS: usize = 3;

/// Why a trail was recommended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explanation {
    /// Trail explained.
    pub trail_id: u64,
    /// One-line summary.
    pub summary: String,
    /// Strongest matched criteria first, then every concern.
    pub factors: Vec<String>,
}

impl Explanation {
    /// Explain `scored` for a hiker of `archetype`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use trailside_core::{Archetype, SearchContext, Trail, UserProfile};
    /// use trailside_recommender::Explanation;
    /// use trailside_scorer::Scorer;
    ///
    /// let trail = Trail::new(3, "Gorge walk", Coord { x: 7.0, y: 46.0 });
    /// let user = UserProfile::default();
    /// let scored = Scorer::default().score(trail, &user, &SearchContext::default(), None);
    /// let explanation = Explanation::for_trail(&scored, Some(Archetype::Explorer));
    /// assert!(explanation.summary.starts_with("Gorge walk"));
    /// assert!(explanation.summary.ends_with("Explorer profile"));
    /// ```
    pub fn for_trail(scored: &ScoredTrail, archetype: Option<Archetype>) -> Self {
        let profile = archetype.map_or_else(String::new, |a| format!(", {} profile", a.label()));
        let estimate = if scored.scoring_error.is_some() {
            " (estimated)"
        } else {
            ""
        };
        let summary = format!(
            "{}: {:.0}% match{estimate}{profile}",
            scored.trail.name, scored.relevance
        );

        let mut strengths: Vec<&CriterionResult> = scored.matched.iter().collect();
        strengths.sort_by(|a, b| {
            (b.score * b.weight)
                .total_cmp(&(a.score * a.weight))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        let factors = strengths
            .into_iter()
            .take(MAX_STRENGTHS)
            .map(|result| format!("+ {}", result.message))
            .chain(
                scored
                    .unmatched
                    .iter()
                    .map(|result| format!("- {}", result.message)),
            )
            .collect();
        Self {
            trail_id: scored.trail.id,
            summary,
            factors,
        }
    }
}
