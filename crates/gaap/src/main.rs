mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // stdout carries the payload, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Title { transcript, cwd } => {
            commands::title::run(transcript.as_deref(), cwd.as_deref())
        }
        Commands::Compress => commands::compress::run(),
        Commands::Status => commands::status::run(),
        Commands::Version => commands::version::run(),
    }
}
