//! Wire types for commit analysis.

pub mod analysis;
pub mod commit;

pub use analysis::{AnalysisResult, Category, CommitStats, ImpactLevel};
pub use commit::CommitRecord;
