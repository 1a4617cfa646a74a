//! CLI tool for diagnosing a running chord ring.
//!
//! Provides commands for:
//! - Launching a test ring of node processes
//! - Walking the successor chain and reporting its composition
//! - Generating key/value load and latency samples

pub mod commands;
pub mod config;
pub mod launch;

pub use commands::Command;
pub use config::CliConfig;
