//! Half-over-half trend classification and linear projection.

use crate::types::{Trend, TrendDirection};

/// Minimum points for a least-squares projection.
pub const MIN_PROJECTION_POINTS: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer {
    threshold: f64,
}

impl TrendAnalyzer {
    /// `threshold` is the mean delta between halves that counts as a change.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Split into the first `n / 2` values and the rest, compare means.
    pub fn classify(&self, series: &[f64]) -> Trend {
        if series.len() < 2 {
            return Trend::flat(series.len());
        }
        let (first, second) = series.split_at(series.len() / 2);
        let first_half_avg = mean(first);
        let second_half_avg = mean(second);
        let delta = second_half_avg - first_half_avg;

        let direction = if delta > self.threshold {
            TrendDirection::Improving
        } else if delta < -self.threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };

        Trend {
            direction,
            percentage: percentage_change(series),
            first_half_avg,
            second_half_avg,
            points: series.len(),
        }
    }
}

/// `(last - first) / first * 100`, or 0 when undefined.
pub fn percentage_change(series: &[f64]) -> f64 {
    match (series.first(), series.last()) {
        (Some(&first), Some(&last)) if series.len() >= 2 && first != 0.0 => {
            (last - first) / first * 100.0
        }
        _ => 0.0,
    }
}

/// Least-squares fit over `(index, value)`, evaluated one step past the end
/// and clamped to [0, 100].
pub fn project_next(series: &[f64]) -> Option<f64> {
    if series.len() < MIN_PROJECTION_POINTS {
        return None;
    }
    let n = series.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean(series);

    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in series.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    let slope = num / den;
    let next = y_mean + slope * (n - x_mean);
    Some(next.clamp(0.0, 100.0))
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
