//! Report-level recommendations: the deduplicated union of result suggestions.

use std::collections::HashSet;

use vitals_core::models::{
    CheckResult, Effort, Implementation, Issue, Priority, Recommendation,
};

const DEFAULT_TIMEFRAME: &str = "1-2 days";

pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// One recommendation per distinct suggestion text, in first-seen order.
    /// Every recommendation relates to every issue of the report.
    pub fn generate(results: &[CheckResult], issues: &[Issue]) -> Vec<Recommendation> {
        let related: Vec<String> = issues.iter().map(|i| i.id.clone()).collect();
        let mut seen = HashSet::new();
        let mut recs = Vec::new();

        for result in results {
            for suggestion in &result.suggestions {
                if !seen.insert(suggestion.as_str()) {
                    continue;
                }
                recs.push(Recommendation {
                    id: uuid::Uuid::new_v4().to_string(),
                    category: Some(result.category),
                    priority: Priority::Medium,
                    title: suggestion.clone(),
                    description: suggestion.clone(),
                    implementation: Implementation {
                        effort: Effort::Medium,
                        timeframe: DEFAULT_TIMEFRAME.to_string(),
                    },
                    benefits: vec![format!(
                        "Improves {} health",
                        result.category.display_name()
                    )],
                    related_issues: related.clone(),
                });
            }
        }
        recs
    }
}
