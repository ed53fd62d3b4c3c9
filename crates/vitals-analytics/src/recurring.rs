//! Issues that keep coming back across a window.

use std::collections::HashMap;

use vitals_core::models::HealthCheckReport;

use crate::types::RecurringIssue;

/// Group issues by title. Sorted by occurrence count, most frequent first,
/// then by title.
pub fn find(reports: &[HealthCheckReport]) -> Vec<RecurringIssue> {
    let mut by_title: HashMap<&str, RecurringIssue> = HashMap::new();

    for report in reports {
        for issue in &report.issues {
            by_title
                .entry(issue.title.as_str())
                .and_modify(|entry| {
                    entry.occurrences += 1;
                    entry.first_seen = entry.first_seen.min(report.timestamp);
                    entry.last_seen = entry.last_seen.max(report.timestamp);
                })
                .or_insert_with(|| RecurringIssue {
                    title: issue.title.clone(),
                    category: issue.category,
                    occurrences: 1,
                    first_seen: report.timestamp,
                    last_seen: report.timestamp,
                });
        }
    }

    let mut recurring: Vec<RecurringIssue> = by_title.into_values().collect();
    recurring.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then_with(|| a.title.cmp(&b.title)));
    recurring
}
