//! # commit-analyzer
//!
//! Scores commit metadata with heuristic rules, renders a markdown report,
//! optionally asks an OpenAI-compatible service for commentary, and memoizes
//! results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use commit_analyzer::ai::DisabledAugmenter;
//! use commit_analyzer::analysis::{AnalysisCache, CommitAnalyzer};
//! use commit_analyzer::data::CommitRecord;
//!
//! # async fn run(record: CommitRecord) {
//! let analyzer = CommitAnalyzer::new(Arc::new(AnalysisCache::default()), Arc::new(DisabledAugmenter));
//! let result = analyzer.analyze(&record).await;
//! println!("{}", result.report);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod analysis;
pub mod cli;
pub mod data;
pub mod server;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of commit-analyzer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
