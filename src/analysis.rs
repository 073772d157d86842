//! Commit classification, scoring and report generation.

pub mod analyzer;
pub mod cache;
pub mod report;
pub mod rules;

pub use analyzer::{fallback_analysis, AnalysisError, CommitAnalyzer};
pub use cache::AnalysisCache;
