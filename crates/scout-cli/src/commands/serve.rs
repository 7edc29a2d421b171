//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use scout_agent::AgentClient;
use scout_core::{Dashboard, ScoutConfig};
use scout_web::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: .scout/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: &ScoutConfig) -> Result<()> {
    let client = AgentClient::from_config(config);
    let state = AppState::new(Dashboard::new(config.sample_mode), Arc::new(client));

    println!();
    println!("  {} {}", "Scout".cyan().bold(), "Dashboard".bold());
    println!();
    println!("  {}  http://{}:{}", "Dashboard".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!("  {}      {}", "Agents".green(), config.agent_url);
    if config.sample_mode {
        println!("  {}", "Sample data mode is on".yellow());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    scout_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}
