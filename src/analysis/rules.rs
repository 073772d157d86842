//! Heuristic classification rules.
//!
//! Every function here is a pure function of the [`CommitRecord`]. Ordering of
//! the tables below is part of the observable behaviour.

use std::fmt;

use crate::data::{Category, CommitRecord, ImpactLevel};

/// Keyword table for categorization, checked top to bottom.
///
/// The first row with any keyword contained in the lowercased message wins,
/// so a message like "fix the feature" is a bugfix.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["fix", "bug", "patch", "hotfix"], Category::Bugfix),
    (&["feat", "feature", "add", "implement"], Category::Feature),
    (&["refactor", "cleanup", "improve"], Category::Refactor),
    (&["doc", "readme", "comment"], Category::Documentation),
    (&["test", "spec"], Category::Test),
    (&["style", "format", "lint"], Category::Style),
    (&["chore", "build", "ci", "deploy"], Category::Chore),
];

/// Case-sensitive prefixes that cost a commit its "finished work" point.
const UNFINISHED_PREFIXES: &[&str] = &["WIP", "wip", "Merge"];

/// Lowercase prefixes flagged as work in progress.
const WIP_PREFIXES: &[&str] = &["wip", "tmp", "temp"];

const BASE_SCORE: i64 = 5;
const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 10;

/// Messages shorter than this (in characters) are flagged.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Changesets above this many files are flagged as too large.
pub const LARGE_CHANGESET_FILES: u64 = 20;

/// Changesets above this many files should come with tests.
pub const TEST_WORTHY_FILES: u64 = 10;

/// A problem detected in a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    /// Message shorter than [`MIN_MESSAGE_LENGTH`].
    MessageTooShort,
    /// Message starts with a work-in-progress marker.
    WorkInProgress,
    /// More than [`LARGE_CHANGESET_FILES`] files changed.
    LargeChangeset,
    /// No files changed at all.
    NoFilesChanged,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MessageTooShort => "Commit message is too short",
            Self::WorkInProgress => "Appears to be a work-in-progress commit",
            Self::LargeChangeset => "Large number of files changed - consider splitting",
            Self::NoFilesChanged => "No files changed in this commit",
        };
        f.write_str(text)
    }
}

/// Categorizes a commit from its message alone.
pub fn categorize(message: &str) -> Category {
    let message = message.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
        .map_or(Category::Other, |(_, category)| *category)
}

/// Computes the quality score, clamped to `1..=10`.
pub fn quality_score(record: &CommitRecord) -> u8 {
    let message = record.commit_message.as_str();
    let length = record.message_length();
    let total = record.total_files_changed;

    let mut score = BASE_SCORE;
    if length > 10 {
        score += 1;
    }
    if length > 50 {
        score += 1;
    }
    if !UNFINISHED_PREFIXES.iter().any(|p| message.starts_with(p)) {
        score += 1;
    }
    if message.chars().any(char::is_uppercase) {
        score += 1;
    }
    if total <= 5 {
        score += 1;
    } else if total > LARGE_CHANGESET_FILES {
        score -= 2;
    }

    score.clamp(MIN_SCORE, MAX_SCORE) as u8
}

/// Buckets the changeset size.
pub fn impact_level(total_files_changed: u64) -> ImpactLevel {
    match total_files_changed {
        0..=3 => ImpactLevel::Low,
        4..=10 => ImpactLevel::Medium,
        _ => ImpactLevel::High,
    }
}

/// Runs every issue check, in a fixed order.
pub fn identify_issues(record: &CommitRecord) -> Vec<Issue> {
    let lowered = record.commit_message.to_lowercase();
    let total = record.total_files_changed;

    let checks = [
        (
            record.message_length() < MIN_MESSAGE_LENGTH,
            Issue::MessageTooShort,
        ),
        (
            WIP_PREFIXES.iter().any(|p| lowered.starts_with(p)),
            Issue::WorkInProgress,
        ),
        (total > LARGE_CHANGESET_FILES, Issue::LargeChangeset),
        (total == 0, Issue::NoFilesChanged),
    ];

    checks
        .into_iter()
        .filter_map(|(fired, issue)| fired.then_some(issue))
        .collect()
}

/// Derives advisory recommendations from the detected issues.
pub fn recommendations(record: &CommitRecord, issues: &[Issue]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if issues.contains(&Issue::MessageTooShort) {
        recommendations.push("Consider adding more descriptive commit messages".to_string());
    }
    if issues.contains(&Issue::LargeChangeset) {
        recommendations
            .push("Consider breaking large commits into smaller, focused changes".to_string());
    }
    if record.total_files_changed > TEST_WORTHY_FILES {
        recommendations.push("Add unit tests for significant changes".to_string());
    }

    recommendations
}
