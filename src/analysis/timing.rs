// src/analysis/timing.rs

//! Aggregate wall-clock statistics over a set of simulation runs.

use crate::archive::metadata::SimDuration;
use std::fmt;

/// Summary statistics over simulation durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Shortest run.
    pub min: f64,
    /// Longest run.
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Number of runs summarized.
    pub count: usize,
}

impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} run(s): mean {:.2}s, min {:.2}s, max {:.2}s, std {:.2}s",
            self.count, self.mean, self.min, self.max, self.std_dev
        )
    }
}

/// Summarizes the wall-clock durations of a batch of simulation runs.
///
/// Returns `None` for an empty batch; there is no meaningful mean to
/// report and no statistic is quietly defaulted.
pub fn summarize_timings<I>(durations: I) -> Option<TimingSummary>
where
    I: IntoIterator<Item = SimDuration>,
{
    let seconds: Vec<f64> = durations
        .into_iter()
        .map(|duration| duration.as_secs_f64())
        .collect();
    if seconds.is_empty() {
        return None;
    }

    let count = seconds.len();
    let mean = seconds.iter().sum::<f64>() / count as f64;
    let min = seconds.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = seconds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let variance = seconds
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(TimingSummary {
        mean,
        min,
        max,
        std_dev: variance.sqrt(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_over_known_values() {
        let durations = vec![
            SimDuration(1, 0),
            SimDuration(2, 0),
            SimDuration(3, 0),
            SimDuration(4, 0),
        ];
        let summary = summarize_timings(durations).unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 2.5).abs() < 1e-12);
        assert!((summary.min - 1.0).abs() < 1e-12);
        assert!((summary.max - 4.0).abs() < 1e-12);
        // Population std of {1,2,3,4} is sqrt(1.25).
        assert!((summary.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_nanosecond_remainder_counts() {
        let summary = summarize_timings(vec![SimDuration(1, 500_000_000)]).unwrap();
        assert!((summary.mean - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch_has_no_summary() {
        assert_eq!(summarize_timings(Vec::new()), None);
    }
}
