//! Inbound commit description.

use serde::{Deserialize, Serialize};

/// Metadata describing one pushed commit, as delivered by a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash.
    pub commit_hash: String,
    /// Complete commit message.
    pub commit_message: String,
    /// Author display name.
    pub commit_author: String,
    /// Repository the commit was pushed to.
    pub repository_name: String,
    /// Branch the commit was pushed to.
    pub branch_name: String,
    /// Paths added by the commit.
    #[serde(default)]
    pub added_files: Vec<String>,
    /// Paths modified by the commit.
    #[serde(default)]
    pub modified_files: Vec<String>,
    /// Paths removed by the commit.
    #[serde(default)]
    pub removed_files: Vec<String>,
    /// Number of files touched, as reported by the sender.
    ///
    /// This is not reconciled against the three path lists; scoring treats it
    /// as authoritative.
    pub total_files_changed: u64,
    /// Link to the commit on the hosting service.
    pub commit_url: String,
}

impl CommitRecord {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.commit_hash.is_empty() {
            return Err("commit_hash must not be empty".to_string());
        }
        Ok(())
    }

    /// Length of the commit message in characters.
    pub fn message_length(&self) -> usize {
        self.commit_message.chars().count()
    }
}
