//! `serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use crate::server::{self, AppState};

/// Runs the HTTP service.
#[derive(Parser)]
pub struct ServeCommand {
    /// Address to bind (defaults to COMMIT_ANALYZER_HOST, then 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to COMMIT_ANALYZER_PORT, then 8001).
    #[arg(long)]
    pub port: Option<u16>,

    /// Config file (defaults to ~/.commit-analyzer/config.json).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ServeCommand {
    /// Executes the serve command.
    pub async fn execute(self) -> Result<()> {
        let (settings, analyzer) = super::build_analyzer(self.config.as_deref(), true)?;

        let host = self.host.unwrap_or_else(|| settings.host());
        let port = match self.port {
            Some(port) => port,
            None => settings.port()?,
        };

        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("Failed to bind {host}:{port}"))?;

        let state = AppState::new(Arc::new(analyzer), settings.config_loaded());
        server::serve(listener, state).await
    }
}
