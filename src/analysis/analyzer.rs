//! The analysis pipeline.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::cache::AnalysisCache;
use super::report::{render_failure_report, render_report, ReportInput};
use super::rules;
use crate::ai::Augmenter;
use crate::data::{AnalysisResult, Category, CommitRecord, CommitStats, ImpactLevel};

/// Score reported by a fallback analysis.
pub const FALLBACK_SCORE: u8 = 5;

/// Internal failures that turn an analysis into a fallback analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A count does not fit the signed range used in reports.
    #[error("{field} count {value} is out of range")]
    CountOutOfRange {
        /// Name of the stats field.
        field: &'static str,
        /// Offending value.
        value: u64,
    },

    /// Report formatting failed.
    #[error("failed to render report: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Scores commits, renders reports and memoizes the results.
pub struct CommitAnalyzer {
    cache: Arc<AnalysisCache>,
    augmenter: Arc<dyn Augmenter>,
}

impl CommitAnalyzer {
    /// Creates an analyzer over the given cache and commentary source.
    pub fn new(cache: Arc<AnalysisCache>, augmenter: Arc<dyn Augmenter>) -> Self {
        Self { cache, augmenter }
    }

    /// The result cache.
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// The commentary source.
    pub fn augmenter(&self) -> &dyn Augmenter {
        self.augmenter.as_ref()
    }

    /// Analyzes one commit.
    ///
    /// Never fails: internal errors produce a fallback analysis instead, which
    /// is returned but not cached.
    pub async fn analyze(&self, record: &CommitRecord) -> AnalysisResult {
        let key = AnalysisCache::key_for(record);
        if let Some(cached) = self.cache.get(&key) {
            debug!(commit = %record.commit_hash, "Returning cached analysis");
            return cached;
        }

        match self.run_pipeline(record).await {
            Ok(result) => {
                self.cache.insert(key, result.clone());
                info!(
                    commit = %record.commit_hash,
                    category = %result.category,
                    score = result.quality_score,
                    "Analysis completed"
                );
                result
            }
            Err(e) => {
                error!(
                    commit = %record.commit_hash,
                    error = %e,
                    "Analysis failed, returning fallback"
                );
                fallback_analysis(record, &e.to_string())
            }
        }
    }

    async fn run_pipeline(&self, record: &CommitRecord) -> Result<AnalysisResult, AnalysisError> {
        let category = rules::categorize(&record.commit_message);
        let quality_score = rules::quality_score(record);
        let impact_level = rules::impact_level(record.total_files_changed);
        let issues = rules::identify_issues(record);
        let recommendations = rules::recommendations(record, &issues);
        let stats = compute_stats(record)?;

        let ai_insights = self.request_insights(record).await;

        let issues_identified: Vec<String> = issues.iter().map(ToString::to_string).collect();
        let report = render_report(
            record,
            &ReportInput {
                category: category.as_str(),
                quality_score,
                impact_level: &impact_level.to_string(),
                stats: &stats,
                issues: &issues_identified,
                recommendations: &recommendations,
                ai_insights: ai_insights.as_deref(),
                generated_at: Utc::now(),
            },
        )?;

        Ok(AnalysisResult {
            commit_hash: record.commit_hash.clone(),
            quality_score,
            category,
            impact_level,
            stats,
            issues_identified,
            recommendations,
            report,
        })
    }

    /// One commentary attempt; every failure degrades to no commentary.
    async fn request_insights(&self, record: &CommitRecord) -> Option<String> {
        match self.augmenter.augment(record).await {
            Ok(Some(text)) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                warn!(commit = %record.commit_hash, error = %e, "AI analysis failed");
                None
            }
        }
    }
}

/// Builds the degraded result returned when the pipeline fails.
pub fn fallback_analysis(record: &CommitRecord, error: &str) -> AnalysisResult {
    AnalysisResult {
        commit_hash: record.commit_hash.clone(),
        quality_score: FALLBACK_SCORE,
        category: Category::Unknown,
        impact_level: ImpactLevel::Medium,
        stats: CommitStats {
            files_changed: i64::try_from(record.total_files_changed).unwrap_or(i64::MAX),
            added_files: None,
            modified_files: None,
            removed_files: None,
            message_length: None,
        },
        issues_identified: vec![format!("Analysis failed: {error}")],
        recommendations: vec!["Manual review recommended".to_string()],
        report: render_failure_report(record, error),
    }
}

fn compute_stats(record: &CommitRecord) -> Result<CommitStats, AnalysisError> {
    Ok(CommitStats {
        files_changed: to_count("files_changed", record.total_files_changed)?,
        added_files: Some(to_count("added_files", record.added_files.len() as u64)?),
        modified_files: Some(to_count("modified_files", record.modified_files.len() as u64)?),
        removed_files: Some(to_count("removed_files", record.removed_files.len() as u64)?),
        message_length: Some(to_count("message_length", record.message_length() as u64)?),
    })
}

fn to_count(field: &'static str, value: u64) -> Result<i64, AnalysisError> {
    i64::try_from(value).map_err(|_| AnalysisError::CountOutOfRange { field, value })
}
