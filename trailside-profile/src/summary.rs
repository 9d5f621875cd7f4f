//! Five-number-style summaries of a numeric sample.

/// Central tendency and spread of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl Summary {
    /// Summarise `values`, ignoring non-finite entries.
    ///
    /// Returns the zero summary when nothing finite remains. Quartiles use
    /// linear interpolation between closest ranks.
    ///
    /// # Examples
    /// ```
    /// use trailside_profile::Summary;
    ///
    /// let summary = Summary::of([4.0, 1.0, 3.0, 2.0]);
    /// assert!((summary.mean - 2.5).abs() < 1e-12);
    /// assert!((summary.median - 2.5).abs() < 1e-12);
    /// assert!((summary.q1 - 1.75).abs() < 1e-12);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        reason = "activity counts are far below 2^52"
    )]
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / count;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
        Self {
            mean,
            median: quantile(&sorted, 0.5),
            q1: quantile(&sorted, 0.25),
            q3: quantile(&sorted, 0.75),
            std: variance.sqrt(),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rank positions are bounded by the sample length"
)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len().saturating_sub(1);
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let (Some(low), Some(high)) = (sorted.get(lower), sorted.get(upper)) else {
        return 0.0;
    };
    low + (high - low) * (position - position.floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn single_value_has_no_spread() {
        let summary = Summary::of([7.0]);
        assert_eq!(
            summary,
            Summary {
                mean: 7.0,
                median: 7.0,
                q1: 7.0,
                q3: 7.0,
                std: 0.0
            }
        );
    }

    #[rstest]
    fn odd_sample_quartiles() {
        let summary = Summary::of([5.0, 1.0, 3.0, 2.0, 4.0]);
        assert!((summary.median - 3.0).abs() < 1e-12);
        assert!((summary.q1 - 2.0).abs() < 1e-12);
        assert!((summary.q3 - 4.0).abs() < 1e-12);
        assert!((summary.std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[rstest]
    fn ignores_non_finite_values() {
        let summary = Summary::of([f64::NAN, 2.0, f64::INFINITY, 4.0]);
        assert!((summary.mean - 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn empty_sample_is_zero() {
        assert_eq!(Summary::of(Vec::new()), Summary::default());
    }
}
