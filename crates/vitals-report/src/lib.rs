//! # vitals-report
//!
//! Turns the results of one run into an immutable [`HealthCheckReport`]:
//! status-average scoring, issue and recommendation derivation, and the
//! best-effort report used when orchestration fails.
//!
//! [`HealthCheckReport`]: vitals_core::HealthCheckReport

pub mod builder;
pub mod impact;
pub mod issues;
pub mod quality;
pub mod recommendations;
pub mod scoring;

pub use builder::ReportBuilder;
pub use issues::IssueGenerator;
pub use quality::QualityScorer;
pub use recommendations::RecommendationGenerator;
pub use scoring::ScoringEngine;
