//! `analyze` command.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::data::CommitRecord;

/// Output format for a single analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The markdown report only.
    #[default]
    Markdown,
    /// The full result as pretty-printed JSON.
    Json,
}

/// Analyzes a single commit record.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Commit record JSON file; reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Skips the AI insights request even when an API key is configured.
    #[arg(long)]
    pub no_ai: bool,

    /// Config file (defaults to ~/.commit-analyzer/config.json).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub async fn execute(self) -> Result<()> {
        let raw = read_input(self.input.as_deref())?;
        let record = parse_record(&raw)?;

        let (_, analyzer) = super::build_analyzer(self.config.as_deref(), !self.no_ai)?;
        let result = analyzer.analyze(&record).await;

        match self.format {
            OutputFormat::Markdown => print!("{}", result.report),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?
            ),
        }
        Ok(())
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read commit record: {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read commit record from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_record(raw: &str) -> Result<CommitRecord> {
    let record: CommitRecord =
        serde_json::from_str(raw).context("Failed to parse commit record JSON")?;
    record.validate().map_err(anyhow::Error::msg)?;
    Ok(record)
}
