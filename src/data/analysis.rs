//! Analysis result types returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of commit purposes derived from message keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality.
    Feature,
    /// Defect fix.
    Bugfix,
    /// Restructuring without behaviour change.
    Refactor,
    /// Documentation or comments.
    Documentation,
    /// Test changes.
    Test,
    /// Formatting and lint fixes.
    Style,
    /// Build, CI and deployment chores.
    Chore,
    /// No keyword matched.
    Other,
    /// Analysis failed before a category could be assigned.
    Unknown,
}

impl Category {
    /// Returns the wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
            Self::Refactor => "refactor",
            Self::Documentation => "documentation",
            Self::Test => "test",
            Self::Style => "style",
            Self::Chore => "chore",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse size bucket of a changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    /// Up to 3 files.
    Low,
    /// Up to 10 files.
    Medium,
    /// More than 10 files.
    High,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// File-change and message statistics.
///
/// Counts are signed so the JSON body stays within the integer range every
/// consumer can represent. The per-list counts are absent on a fallback
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Total files changed, as reported by the sender.
    pub files_changed: i64,
    /// Number of added paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_files: Option<i64>,
    /// Number of modified paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_files: Option<i64>,
    /// Number of removed paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_files: Option<i64>,
    /// Commit message length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_length: Option<i64>,
}

/// Complete analysis of one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Hash of the analyzed commit.
    pub commit_hash: String,
    /// Heuristic quality score in `1..=10`.
    pub quality_score: u8,
    /// Purpose of the commit.
    pub category: Category,
    /// Size bucket of the changeset.
    pub impact_level: ImpactLevel,
    /// Change statistics.
    pub stats: CommitStats,
    /// Problems found, in detection order.
    pub issues_identified: Vec<String>,
    /// Advice derived from the issues and changeset size.
    pub recommendations: Vec<String>,
    /// Markdown report.
    pub report: String,
}
