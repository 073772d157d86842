//! Markdown report rendering.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::data::{CommitRecord, CommitStats};

/// Number of hash characters shown in reports.
pub const SHORT_HASH_LEN: usize = 8;

/// Empty-state line for the issues section.
pub const NO_ISSUES_LINE: &str = "- No issues identified";

/// Empty-state line for the recommendations section.
pub const NO_RECOMMENDATIONS_LINE: &str = "- No specific recommendations";

/// Everything the report template needs besides the record itself.
pub struct ReportInput<'a> {
    /// Category name.
    pub category: &'a str,
    /// Quality score in `1..=10`.
    pub quality_score: u8,
    /// Impact level name.
    pub impact_level: &'a str,
    /// Change statistics.
    pub stats: &'a CommitStats,
    /// Issue descriptions.
    pub issues: &'a [String],
    /// Recommendation texts.
    pub recommendations: &'a [String],
    /// Commentary from the augmentation service, if any was obtained.
    pub ai_insights: Option<&'a str>,
    /// Timestamp printed in the footer.
    pub generated_at: DateTime<Utc>,
}

/// Returns at most the first [`SHORT_HASH_LEN`] characters of a hash.
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Renders the full analysis report.
pub fn render_report(
    record: &CommitRecord,
    input: &ReportInput<'_>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let stats = input.stats;

    writeln!(out, "# Commit Analysis Report")?;
    writeln!(out)?;
    writeln!(out, "## Commit Details")?;
    writeln!(out, "- **Hash**: `{}...`", short_hash(&record.commit_hash))?;
    writeln!(out, "- **Message**: {}", record.commit_message)?;
    writeln!(out, "- **Author**: {}", record.commit_author)?;
    writeln!(out, "- **Repository**: {}", record.repository_name)?;
    writeln!(out, "- **Branch**: {}", record.branch_name)?;
    writeln!(out)?;

    writeln!(out, "## Analysis Summary")?;
    writeln!(out, "- **Category**: {}", input.category)?;
    writeln!(out, "- **Quality Score**: {}/10", input.quality_score)?;
    writeln!(out, "- **Impact Level**: {}", input.impact_level)?;
    writeln!(out)?;

    writeln!(out, "## File Changes")?;
    writeln!(out, "- **Total Files**: {}", stats.files_changed)?;
    writeln!(out, "- **Added**: {} files", stats.added_files.unwrap_or(0))?;
    writeln!(out, "- **Modified**: {} files", stats.modified_files.unwrap_or(0))?;
    writeln!(out, "- **Removed**: {} files", stats.removed_files.unwrap_or(0))?;
    writeln!(out)?;

    writeln!(out, "## Issues Identified")?;
    write_list(&mut out, input.issues, NO_ISSUES_LINE)?;
    writeln!(out)?;

    writeln!(out, "## Recommendations")?;
    write_list(&mut out, input.recommendations, NO_RECOMMENDATIONS_LINE)?;
    writeln!(out)?;

    if let Some(insights) = input.ai_insights {
        writeln!(out, "## AI Insights")?;
        writeln!(out, "{}", insights.trim())?;
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(
        out,
        "*Report generated on {} UTC*",
        input.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;

    Ok(out)
}

/// Renders the short report attached to a fallback analysis.
pub fn render_failure_report(record: &CommitRecord, error: &str) -> String {
    format!(
        "# Analysis Failed\n\nAutomatic analysis failed for commit `{}...`\n\nError: {error}\n\nPlease review manually.",
        short_hash(&record.commit_hash)
    )
}

fn write_list(out: &mut String, items: &[String], empty_line: &str) -> std::fmt::Result {
    if items.is_empty() {
        return writeln!(out, "{empty_line}");
    }
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::data::commit::fixtures::record;

    fn stats() -> CommitStats {
        CommitStats {
            files_changed: 2,
            added_files: Some(1),
            modified_files: Some(1),
            removed_files: Some(0),
            message_length: Some(18),
        }
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn short_hash_truncates() {
        assert_eq!(short_hash("0123456789abcdef"), "01234567");
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(short_hash(""), "");
    }

    #[test]
    fn clean_commit_report() {
        let r = record("Fix login redirect", 2);
        let stats = stats();
        let report = render_report(
            &r,
            &ReportInput {
                category: "bugfix",
                quality_score: 9,
                impact_level: "low",
                stats: &stats,
                issues: &[],
                recommendations: &[],
                ai_insights: None,
                generated_at: timestamp(),
            },
        )
        .unwrap();

        let expected = "\
# Commit Analysis Report

## Commit Details
- **Hash**: `01234567...`
- **Message**: Fix login redirect
- **Author**: Jane Doe
- **Repository**: acme/dashboard
- **Branch**: main

## Analysis Summary
- **Category**: bugfix
- **Quality Score**: 9/10
- **Impact Level**: low

## File Changes
- **Total Files**: 2
- **Added**: 1 files
- **Modified**: 1 files
- **Removed**: 0 files

## Issues Identified
- No issues identified

## Recommendations
- No specific recommendations

---
*Report generated on 2024-03-09 14:05:07 UTC*
";
        assert_eq!(report, expected);
    }

    #[test]
    fn lists_and_insights_are_rendered_in_order() {
        let r = record("wip", 25);
        let stats = stats();
        let issues = vec![
            "Commit message is too short".to_string(),
            "Appears to be a work-in-progress commit".to_string(),
        ];
        let recs = vec!["Add unit tests for significant changes".to_string()];
        let report = render_report(
            &r,
            &ReportInput {
                category: "other",
                quality_score: 3,
                impact_level: "high",
                stats: &stats,
                issues: &issues,
                recommendations: &recs,
                ai_insights: Some("Looks risky.\n"),
                generated_at: timestamp(),
            },
        )
        .unwrap();

        assert!(!report.contains(NO_ISSUES_LINE));
        assert!(!report.contains(NO_RECOMMENDATIONS_LINE));
        assert!(report.contains(
            "## Issues Identified\n- Commit message is too short\n- Appears to be a work-in-progress commit\n"
        ));
        assert!(report.contains("## AI Insights\nLooks risky.\n\n---\n"));

        let issues_at = report.find("## Issues Identified").unwrap();
        let recs_at = report.find("## Recommendations").unwrap();
        let ai_at = report.find("## AI Insights").unwrap();
        let footer_at = report.find("*Report generated on").unwrap();
        assert!(issues_at < recs_at && recs_at < ai_at && ai_at < footer_at);
    }

    #[test]
    fn insights_section_absent_without_text() {
        let r = record("Fix login redirect", 2);
        let stats = stats();
        let report = render_report(
            &r,
            &ReportInput {
                category: "bugfix",
                quality_score: 9,
                impact_level: "low",
                stats: &stats,
                issues: &[],
                recommendations: &[],
                ai_insights: None,
                generated_at: timestamp(),
            },
        )
        .unwrap();
        assert!(!report.contains("AI Insights"));
    }

    #[test]
    fn failure_report_names_error() {
        let r = record("Fix login redirect", 2);
        let report = render_failure_report(&r, "boom");
        assert!(report.starts_with("# Analysis Failed"));
        assert!(report.contains("`01234567...`"));
        assert!(report.contains("Error: boom"));
    }
}
