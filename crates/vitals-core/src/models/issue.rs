use serde::{Deserialize, Serialize};

use super::{CheckCategory, Severity};

/// Estimated effort to apply a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Low => Self::Easy,
            Severity::Medium => Self::Medium,
            Severity::High | Severity::Critical => Self::Hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub steps: Vec<String>,
    pub difficulty: Difficulty,
}

/// A problem derived from a failed or warning result. Never hand-authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub category: CheckCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Result ids this issue was derived from.
    pub affected_checks: Vec<String>,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}
