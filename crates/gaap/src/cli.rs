use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gaap")]
#[command(version)]
#[command(about = "Notification helpers for AI coding assistants")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a short title for a session
    Title {
        /// Session transcript (JSONL)
        transcript: Option<String>,

        /// Working directory of the session
        cwd: Option<String>,
    },

    /// Compress the message read from stdin
    Compress,

    /// Show configuration and cache status
    Status,

    /// Print version information
    Version,
}
