use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of diagnostic domains. Drives check dispatch and default config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    ApiConnectivity,
    ErrorHandling,
    Performance,
    UserExperience,
    Security,
    OfflineCapability,
}

impl CheckCategory {
    /// Every category, in canonical order.
    pub const ALL: [CheckCategory; 6] = [
        CheckCategory::ApiConnectivity,
        CheckCategory::ErrorHandling,
        CheckCategory::Performance,
        CheckCategory::UserExperience,
        CheckCategory::Security,
        CheckCategory::OfflineCapability,
    ];

    /// Stable snake_case identifier used in cache keys and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiConnectivity => "api_connectivity",
            Self::ErrorHandling => "error_handling",
            Self::Performance => "performance",
            Self::UserExperience => "user_experience",
            Self::Security => "security",
            Self::OfflineCapability => "offline_capability",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ApiConnectivity => "API Connectivity",
            Self::ErrorHandling => "Error Handling",
            Self::Performance => "Performance",
            Self::UserExperience => "User Experience",
            Self::Security => "Security",
            Self::OfflineCapability => "Offline Capability",
        }
    }

    /// Typical wall-clock time of one check, used only for run estimates.
    pub fn nominal_duration_ms(&self) -> u64 {
        match self {
            Self::ApiConnectivity => 3_000,
            Self::ErrorHandling => 2_000,
            Self::Performance => 10_000,
            Self::UserExperience => 5_000,
            Self::Security => 3_000,
            Self::OfflineCapability => 2_000,
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown check category: {s}"))
    }
}
