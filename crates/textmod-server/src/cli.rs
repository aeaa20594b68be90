use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "textmod")]
#[command(author, version, about = "Text moderation service and latency benchmark")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the moderation service
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = "textmod.yaml", env = "TEXTMOD_CONFIG")]
        config: PathBuf,

        /// Listen address
        #[arg(short, long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run a latency benchmark and print the report
    Bench {
        /// Configuration file path
        #[arg(short, long, default_value = "textmod.yaml", env = "TEXTMOD_CONFIG")]
        config: PathBuf,

        /// Base URL of a running service; classifies in-process when omitted
        #[arg(short, long)]
        target: Option<String>,

        /// Number of requests to issue
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// File with one input text per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Dispatch concurrently with this many workers
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
