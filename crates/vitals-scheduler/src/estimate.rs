//! Run duration estimates.

use std::time::Duration;

use vitals_core::models::CheckCategory;

/// Whole seconds, rounded up: sum of nominal durations when sequential,
/// the longest one when parallel.
pub fn estimate_seconds(categories: &[CheckCategory], parallel: bool) -> u64 {
    let nominal = categories.iter().map(|c| c.nominal_duration_ms());
    let total_ms = if parallel {
        nominal.max().unwrap_or(0)
    } else {
        nominal.sum()
    };
    total_ms.div_ceil(1_000)
}

/// Sequential remaining-time estimate: average time per finished check
/// times the number still to run.
pub fn remaining_ms(elapsed: Duration, completed: usize, remaining: usize) -> Option<u64> {
    if completed == 0 {
        return None;
    }
    let avg = elapsed.as_millis() as u64 / completed as u64;
    Some(avg.saturating_mul(remaining as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_sums_and_parallel_takes_max() {
        let cats = [CheckCategory::ApiConnectivity, CheckCategory::Performance];
        // 3000 + 10000
        assert_eq!(estimate_seconds(&cats, false), 13);
        assert_eq!(estimate_seconds(&cats, true), 10);
        assert_eq!(estimate_seconds(&[], true), 0);
    }

    #[test]
    fn remaining_uses_running_average() {
        assert_eq!(remaining_ms(Duration::from_millis(300), 3, 2), Some(200));
        assert_eq!(remaining_ms(Duration::from_millis(300), 0, 2), None);
        assert_eq!(remaining_ms(Duration::from_millis(300), 3, 0), Some(0));
    }
}
