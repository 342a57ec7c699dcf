//! CLI module for the concierge
//!
//! - `chat`: interactive session (default)
//! - `check`: report which collaborators are configured

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod chat;
pub mod check;

/// City Concierge CLI
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(about = "Persona-aware city concierge grounded in a city guide and live web search")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// City guide to load (text or markdown export)
    #[arg(long, global = true, value_name = "PATH")]
    pub guide: Option<PathBuf>,

    /// Model identifier passed to OpenRouter
    #[arg(long, global = true, value_name = "ID")]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive session (default)
    Chat,
    /// Show which collaborators are configured
    Check,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(guide) = &self.guide {
            config.guide_path = guide.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = crate::config::load_config()?;
    cli.apply_overrides(&mut config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run(config).await,
        Commands::Check => check::run(&config),
    }
}
