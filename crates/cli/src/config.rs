//! Command-line surface.

use crate::commands::Command;
use clap::Parser;

/// Diagnostic client for a chord-style DHT ring.
#[derive(Debug, Parser)]
#[command(name = "ring-check", version, about)]
pub struct CliConfig {
    /// Host the ring's nodes bind on.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// First port probed when looking for a live entry point.
    #[arg(long, default_value_t = 11000)]
    pub start_port: u16,

    /// Ceiling on queries issued by one walk; guards against successor
    /// chains that never close.
    #[arg(long, default_value_t = 150)]
    pub check_node_limit: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}
