//! Day-count tables for trips of one day or longer.
//!
//! A request is multi-day once `time_available` reaches [`MINUTES_PER_DAY`].
//! Its minimum-duration floor comes from fixed per-day-count tables rather
//! than a linear function, and relaxation walks down
//! [`DURATION_NOTCHES`] without ever passing [`guaranteed_floor`].
//!
//! # Examples
//! ```
//! use trailside_core::multi_day;
//!
//! let days = multi_day::trip_days(2880).expect("two days");
//! assert_eq!(multi_day::initial_min_duration(days), 1680);
//! assert_eq!(multi_day::step_down(1680, days), 1200);
//! assert_eq!(multi_day::step_down(1200, days), 960);
//! assert_eq!(multi_day::step_down(960, days), 960);
//! ```

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Minimum-duration values relaxation may step through, longest first.
pub const DURATION_NOTCHES: [u32; 7] = [2880, 2160, 1680, 1200, 960, 720, 480];

/// Whole days available, or `None` for a single-day request.
pub const fn trip_days(time_available: u32) -> Option<u32> {
    if time_available >= MINUTES_PER_DAY {
        Some(time_available / MINUTES_PER_DAY)
    } else {
        None
    }
}

/// Round `minutes` up to a whole number of days.
pub const fn day_aligned_ceiling(minutes: u32) -> u32 {
    minutes.div_ceil(MINUTES_PER_DAY).saturating_mul(MINUTES_PER_DAY)
}

/// Minimum trail duration requested before any relaxation.
pub const fn initial_min_duration(days: u32) -> u32 {
    match days {
        0 | 1 => 720,
        2 => 1680,
        3 => 2160,
        _ => 2880,
    }
}

/// Lowest minimum duration relaxation may reach.
pub const fn guaranteed_floor(days: u32) -> u32 {
    match days {
        0 | 1 => 480,
        2 => 960,
        3 => 1200,
        _ => 1680,
    }
}

/// Next notch strictly below `current`, clamped to the guaranteed floor.
pub fn step_down(current: u32, days: u32) -> u32 {
    let floor = guaranteed_floor(days);
    DURATION_NOTCHES
        .into_iter()
        .find(|notch| *notch < current)
        .map_or(floor, |notch| notch.max(floor))
}
