use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of one check execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Warning,
    Skipped,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 6] = [
        CheckStatus::Pending,
        CheckStatus::Running,
        CheckStatus::Passed,
        CheckStatus::Failed,
        CheckStatus::Warning,
        CheckStatus::Skipped,
    ];

    /// Passed, Failed, Warning, and Skipped end a check execution.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Passed | Self::Failed | Self::Warning | Self::Skipped
        )
    }

    /// Failed and Warning results produce issues.
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Failed | Self::Warning)
    }

    /// Contribution of one result to the status-average report score.
    pub fn score(&self) -> u8 {
        match self {
            Self::Passed => 100,
            Self::Warning => 70,
            Self::Skipped | Self::Running => 50,
            Self::Pending => 30,
            Self::Failed => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Warning => "warning",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown check status: {s}"))
    }
}
