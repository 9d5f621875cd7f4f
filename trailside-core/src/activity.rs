use chrono::NaiveDate;

/// A hike the user has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedActivity {
    /// Trail that was hiked.
    pub trail_id: u64,
    /// Day of completion.
    pub completed_on: NaiveDate,
    /// Actual time taken, when recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_minutes: Option<u32>,
    /// User rating from 1 to 5.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<u8>,
}

impl CompletedActivity {
    /// Record a completion without duration or rating.
    pub const fn new(trail_id: u64, completed_on: NaiveDate) -> Self {
        Self {
            trail_id,
            completed_on,
            duration_minutes: None,
            rating: None,
        }
    }

    /// Set the recorded duration.
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}
