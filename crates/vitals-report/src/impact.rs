//! Impact sentences keyed by `(category, severity)`.

use vitals_core::models::{CheckCategory, Severity};

pub fn impact_for(category: CheckCategory, severity: Severity) -> &'static str {
    use CheckCategory::*;
    use Severity::*;

    match (category, severity) {
        (ApiConnectivity, Critical) => "AI transcription services are unavailable",
        (ApiConnectivity, High) => "Transcription requests fail intermittently",
        (ApiConnectivity, Medium) => "Transcription responses are slower than expected",
        (ApiConnectivity, Low) => "Minor API latency with no visible effect",

        (ErrorHandling, Critical) => "Unhandled errors can crash the application",
        (ErrorHandling, High) => "Failures surface to users without recovery",
        (ErrorHandling, Medium) => "Some error messages are unclear or missing",
        (ErrorHandling, Low) => "Error reporting is less detailed than it could be",

        (Performance, Critical) => "The application is too slow to be usable",
        (Performance, High) => "Processing times noticeably degrade the experience",
        (Performance, Medium) => "Some operations are slower than expected",
        (Performance, Low) => "Small performance regressions detected",

        (UserExperience, Critical) => "Core workflows cannot be completed",
        (UserExperience, High) => "Key features are hard to use or inaccessible",
        (UserExperience, Medium) => "Parts of the interface are confusing",
        (UserExperience, Low) => "Cosmetic interface inconsistencies",

        (Security, Critical) => "User data or credentials may be exposed",
        (Security, High) => "Security controls are missing or misconfigured",
        (Security, Medium) => "Security hardening is incomplete",
        (Security, Low) => "Security best practices are not fully followed",

        (OfflineCapability, Critical) => "The application does not work without a network",
        (OfflineCapability, High) => "Offline data can be lost",
        (OfflineCapability, Medium) => "Offline features are partially unavailable",
        (OfflineCapability, Low) => "Offline experience could be smoother",
    }
}
