//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scout_core::config::CONFIG_FILE;
use scout_core::ScoutConfig;

pub mod agents;
pub mod discover;
pub mod matching;
pub mod run;
pub mod sample;
pub mod serve;

/// Scout - agent-backed matchmaking and dataset discovery
#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use canned sample data instead of calling the agents
    #[arg(long, global = true)]
    pub sample: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file
    #[arg(short, long, global = true, env = "SCOUT_CONFIG", default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Agent platform endpoint (overrides config and SCOUT_AGENT_URL)
    #[arg(long, global = true)]
    pub agent_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web dashboard
    Serve(serve::ServeArgs),

    /// Find compatible matches for a profile
    Match(matching::MatchArgs),

    /// Discover datasets for a research topic
    Discover(discover::DiscoverArgs),

    /// List the known agents
    Agents,

    /// Show the sample form and result of a workflow
    Sample(sample::SampleArgs),
}

impl Cli {
    /// Resolve configuration: file, then environment, then flags.
    pub fn load_config(&self) -> Result<ScoutConfig> {
        let mut config = ScoutConfig::load(Some(self.config.as_path()))
            .with_context(|| format!("Failed to load config from {}", self.config.display()))?;
        if let Some(url) = &self.agent_url {
            config.agent_url = url.clone();
        }
        if self.sample {
            config.sample_mode = true;
        }
        Ok(config)
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(agent_url = %config.agent_url, sample_mode = config.sample_mode, "Configuration loaded");

        match self.command {
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Match(args) => matching::execute(args, &config, self.json).await,
            Commands::Discover(args) => discover::execute(args, &config, self.json).await,
            Commands::Agents => agents::execute(self.json),
            Commands::Sample(args) => sample::execute(args, self.json),
        }
    }
}
