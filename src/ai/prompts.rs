//! Prompt templates for commit commentary.

use crate::data::CommitRecord;

/// Maximum entries of each file list included in a prompt.
pub const MAX_LISTED_FILES: usize = 5;

/// System prompt sent with every commentary request.
pub const SYSTEM_PROMPT: &str = "You are a senior software engineer reviewing code commits.";

/// Builds the user prompt for one commit.
///
/// Only the first [`MAX_LISTED_FILES`] entries of each file list are included
/// so large changesets cannot blow up the request size.
pub fn generate_user_prompt(record: &CommitRecord) -> String {
    format!(
        "Analyze this Git commit:

Commit Message: {message}
Author: {author}
Repository: {repository}
Branch: {branch}
Files Changed: {total}
Added Files: {added}
Modified Files: {modified}
Removed Files: {removed}

Provide a brief analysis focusing on:
1. Code quality aspects
2. Potential risks or concerns
3. Best practices compliance
4. Development progress assessment

Keep the response concise and actionable.
",
        message = record.commit_message,
        author = record.commit_author,
        repository = record.repository_name,
        branch = record.branch_name,
        total = record.total_files_changed,
        added = head(&record.added_files),
        modified = head(&record.modified_files),
        removed = head(&record.removed_files),
    )
}

fn head(files: &[String]) -> String {
    files
        .iter()
        .take(MAX_LISTED_FILES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::commit::fixtures::record;

    #[test]
    fn prompt_includes_commit_fields() {
        let mut r = record("Add board search", 3);
        r.added_files = vec!["app/search.py".to_string()];
        let prompt = generate_user_prompt(&r);
        assert!(prompt.contains("Commit Message: Add board search"));
        assert!(prompt.contains("Author: Jane Doe"));
        assert!(prompt.contains("Repository: acme/dashboard"));
        assert!(prompt.contains("Branch: main"));
        assert!(prompt.contains("Files Changed: 3"));
        assert!(prompt.contains("Added Files: app/search.py\n"));
        assert!(prompt.contains("Removed Files: \n"));
    }

    #[test]
    fn file_lists_are_capped() {
        let mut r = record("Rename modules", 8);
        r.modified_files = (1..=8).map(|i| format!("m{i}.rs")).collect();
        let prompt = generate_user_prompt(&r);
        assert!(prompt.contains("Modified Files: m1.rs, m2.rs, m3.rs, m4.rs, m5.rs\n"));
        assert!(!prompt.contains("m6.rs"));
    }
}
