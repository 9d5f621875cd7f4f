//! Progressive relaxation of a filter set.
//!
//! Level 1 is the filter set as built. Each later level is derived from
//! that base rather than from the previous level, so relaxations never
//! compound. Multi-day requests keep a minimum duration at every level;
//! it only steps down the notch table and never below the guaranteed floor
//! for the trip's day count.

use trailside_core::{FilterSet, SearchContext, multi_day};

/// Difficulty ceiling after scaling.
const MAX_DIFFICULTY: f64 = 10.0;

/// Filter set for `level` (`1..=7`) derived from `base`.
///
/// # Examples
/// ```
/// use trailside_core::{FilterSet, SearchContext};
/// use trailside_recommender::relax;
///
/// let base = FilterSet {
///     min_duration_minutes: Some(60),
///     max_duration_minutes: Some(120),
///     ..FilterSet::default()
/// };
/// let context = SearchContext::default().with_time_available(120);
///
/// let second = relax(&base, 2, &context);
/// assert_eq!(second.min_duration_minutes, None);
/// assert_eq!(second.max_duration_minutes, Some(240));
/// ```
pub fn relax(base: &FilterSet, level: u8, context: &SearchContext) -> FilterSet {
    let days = context.trip_days();
    let mut filters = match level {
        0 | 1 => base.clone(),
        2 => {
            let mut filters = base.clone();
            if days.is_none() {
                filters.min_duration_minutes = None;
                filters.max_duration_minutes = scale_minutes(base.max_duration_minutes, 2);
            }
            filters
        }
        3 => FilterSet {
            min_difficulty: None,
            min_distance_km: None,
            max_duration_minutes: scale_minutes(base.max_duration_minutes, 3),
            max_difficulty: base.max_difficulty.map(|d| (d * 1.5).min(MAX_DIFFICULTY)),
            max_distance_km: base.max_distance_km.map(|d| d * 2.0),
            max_elevation_m: base.max_elevation_m.map(|e| e * 2.0),
            ..base.clone()
        },
        4 => FilterSet {
            max_duration_minutes: base.max_duration_minutes,
            ..FilterSet::validity_only()
        },
        _ => FilterSet::validity_only(),
    };
    if let Some(days) = days {
        filters.min_distance_km = None;
        filters.max_distance_km = None;
        filters.min_duration_minutes = Some(multi_day_floor(base, level, days));
    }
    filters
}

fn multi_day_floor(base: &FilterSet, level: u8, days: u32) -> u32 {
    let initial = base
        .min_duration_minutes
        .unwrap_or_else(|| multi_day::initial_min_duration(days))
        .max(multi_day::guaranteed_floor(days));
    match level {
        0 | 1 => initial,
        2 => multi_day::step_down(initial, days),
        _ => multi_day::guaranteed_floor(days),
    }
}

fn scale_minutes(minutes: Option<u32>, factor: u32) -> Option<u32> {
    minutes.map(|m| m.saturating_mul(factor))
}

/// Make sure a multi-day request carries its duration window even when the
/// filter set did not come from the builder.
pub(crate) fn ensure_multi_day_window(filters: &mut FilterSet, context: &SearchContext) {
    let (Some(days), Some(time_available)) = (context.trip_days(), context.time_available) else {
        return;
    };
    filters.min_distance_km = None;
    filters.max_distance_km = None;
    if filters.min_duration_minutes.is_none() {
        filters.min_duration_minutes = Some(multi_day::initial_min_duration(days));
    }
    if filters.max_duration_minutes.is_none() {
        filters.max_duration_minutes = Some(multi_day::day_aligned_ceiling(time_available));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> FilterSet {
        FilterSet {
            min_difficulty: Some(3.0),
            max_difficulty: Some(8.0),
            min_distance_km: Some(4.0),
            max_distance_km: Some(10.0),
            min_duration_minutes: Some(60),
            max_duration_minutes: Some(180),
            max_elevation_m: Some(700.0),
            landscape: Some("lake".to_owned()),
            avoid_risky: true,
            require_valid: true,
            ..FilterSet::default()
        }
    }

    fn single_day() -> SearchContext {
        SearchContext::default().with_time_available(180)
    }

    #[rstest]
    fn level_three_widens_every_bound(base: FilterSet) {
        let filters = relax(&base, 3, &single_day());
        assert_eq!(filters.min_difficulty, None);
        assert_eq!(filters.min_distance_km, None);
        assert_eq!(filters.max_difficulty, Some(10.0));
        assert_eq!(filters.max_distance_km, Some(20.0));
        assert_eq!(filters.max_duration_minutes, Some(540));
        assert_eq!(filters.max_elevation_m, Some(1400.0));
        assert_eq!(filters.min_duration_minutes, Some(60));
        assert!(filters.avoid_risky);
        assert_eq!(filters.landscape.as_deref(), Some("lake"));
    }

    #[rstest]
    fn level_four_keeps_validity_and_duration(base: FilterSet) {
        let filters = relax(&base, 4, &single_day());
        assert_eq!(
            filters,
            FilterSet {
                require_valid: true,
                max_duration_minutes: Some(180),
                ..FilterSet::default()
            }
        );
    }

    #[rstest]
    #[case(5)]
    #[case(6)]
    #[case(7)]
    fn ultra_minimal_levels_keep_only_validity(base: FilterSet, #[case] level: u8) {
        assert_eq!(relax(&base, level, &single_day()), FilterSet::validity_only());
    }

    #[rstest]
    #[case(1, 1680)]
    #[case(2, 1200)]
    #[case(3, 960)]
    #[case(4, 960)]
    #[case(7, 960)]
    fn two_day_trips_keep_a_stepped_floor(#[case] level: u8, #[case] floor: u32) {
        let base = FilterSet {
            min_duration_minutes: Some(1680),
            max_duration_minutes: Some(2880),
            ..FilterSet::validity_only()
        };
        let context = SearchContext::default().with_time_available(2880);
        let filters = relax(&base, level, &context);
        assert_eq!(filters.min_duration_minutes, Some(floor));
        assert!(!filters.has_distance_bound());
    }

    #[rstest]
    fn multi_day_window_is_restored() {
        let mut filters = FilterSet {
            max_distance_km: Some(8.0),
            ..FilterSet::validity_only()
        };
        ensure_multi_day_window(&mut filters, &SearchContext::default().with_time_available(4400));
        assert_eq!(filters.min_duration_minutes, Some(2160));
        assert_eq!(filters.max_duration_minutes, Some(5760));
        assert!(!filters.has_distance_bound());
    }
}
