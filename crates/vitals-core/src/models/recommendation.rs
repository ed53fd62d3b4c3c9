use serde::{Deserialize, Serialize};

use super::CheckCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    pub effort: Effort,
    pub timeframe: String,
}

/// An actionable recommendation, either from a report's suggestions or from
/// threshold violations over a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    /// `None` for system-wide recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CheckCategory>,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub implementation: Implementation,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub related_issues: Vec<String>,
}
