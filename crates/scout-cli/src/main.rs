//! Scout CLI
//!
//! Finds compatible collaborators and discovers research datasets through
//! remote agents, from the terminal or the web dashboard.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod progress;

use commands::{Cli, Commands};

/// Initialize tracing, mirroring output to `log_file` when given.
///
/// The returned guard flushes the file writer and must outlive the server.
fn init_tracing(log_file: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scout=info,scout_web=debug,scout_agent=debug".into());

    let appender = log_file.and_then(|path| {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(std::path::Path::new("."));
        let name = path.file_name()?.to_string_lossy().into_owned();
        match Builder::new().rotation(Rotation::NEVER).filename_prefix(name).build(dir) {
            Ok(appender) => Some(appender),
            Err(e) => {
                eprintln!("Could not open log file {}: {}", path.display(), e);
                None
            }
        }
    });

    match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            // stderr keeps `--json` output on stdout parseable
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| std::path::PathBuf::from(".scout/serve.log")),
        ),
        _ => None,
    };

    let _guard = init_tracing(log_file.as_deref());

    cli.execute().await
}
