//! CLI interface for commit-analyzer.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::ai::{Augmenter, DisabledAugmenter};
use crate::analysis::{AnalysisCache, CommitAnalyzer};
use crate::utils::Settings;

pub mod analyze;
pub mod serve;

/// commit-analyzer: heuristic commit scoring with markdown reports.
#[derive(Parser)]
#[command(name = "commit-analyzer")]
#[command(about = "Heuristic commit analysis with optional AI insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs the HTTP service.
    Serve(serve::ServeCommand),
    /// Analyzes a single commit record and prints the result.
    Analyze(analyze::AnalyzeCommand),
}

impl Commands {
    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Serve(_) => "info",
            Self::Analyze(_) => "warn",
        }
    }
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(cmd) => cmd.execute().await,
            Commands::Analyze(cmd) => cmd.execute().await,
        }
    }
}

/// Loads settings and wires an analyzer from them.
///
/// With `ai` false the analyzer never requests commentary, whatever the
/// configuration says.
pub(crate) fn build_analyzer(
    config: Option<&Path>,
    ai: bool,
) -> Result<(Settings, CommitAnalyzer)> {
    let settings = Settings::resolve(config)?;
    let augmenter: Arc<dyn Augmenter> = if ai {
        settings.build_augmenter()?
    } else {
        Arc::new(DisabledAugmenter)
    };
    let cache = Arc::new(AnalysisCache::new(settings.cache_capacity()));
    Ok((settings, CommitAnalyzer::new(cache, augmenter)))
}
