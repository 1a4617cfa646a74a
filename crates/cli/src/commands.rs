//! Operation dispatch.

use crate::config::CliConfig;
use crate::launch;
use anyhow::Context;
use clap::Subcommand;
use client::HttpNodeClient;
use corelib::{ConsoleReport, EntryLocator, RingWalker, WalkerConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch a ring of node processes, one every five seconds.
    SetupNodes {
        /// How many nodes to launch.
        count: u32,
    },
    /// Walk the successor chain from the first live port and report it.
    CheckChain,
    /// Store the fixed test key set via one node.
    PutTestValues {
        /// Node address, `host:port`.
        address: String,
    },
    /// Read the fixed test key set back via one node.
    GetTestValues {
        /// Node address, `host:port`.
        address: String,
    },
    /// Profile snapshot-query throughput against one node.
    ProfileNodeInfo {
        /// Target address; defaults to `host:start-port`.
        address: Option<String>,
    },
    /// Run the put/get probe sequence in parallel, one worker per node.
    ParallelLoad {
        /// Target addresses, one worker each.
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

pub async fn run(config: CliConfig) -> anyhow::Result<()> {
    let client = HttpNodeClient::new(Duration::from_secs(config.timeout_secs))
        .context("building http client")?;

    match &config.command {
        Command::SetupNodes { count } => {
            launch::setup_nodes(&config.host, config.start_port, *count).await;
        }
        Command::CheckChain => check_chain(&config, &client).await?,
        Command::PutTestValues { address } => {
            probes::put_test_values(&client, address).await;
        }
        Command::GetTestValues { address } => {
            probes::get_test_values(&client, address).await;
        }
        Command::ProfileNodeInfo { address } => {
            let target = address
                .clone()
                .unwrap_or_else(|| format!("{}:{}", config.host, config.start_port));
            probes::profile_node_info(&client, &target).await;
        }
        Command::ParallelLoad { addresses } => {
            probes::parallel_load(&client, addresses.clone()).await;
        }
    }

    println!("finished!");
    Ok(())
}

async fn check_chain(config: &CliConfig, client: &HttpNodeClient) -> anyhow::Result<()> {
    let locator = EntryLocator::new(
        config.host.clone(),
        config.start_port,
        config.check_node_limit,
    );
    let entry = locator.locate(client).await?;
    info!(%entry, "entry point located");

    // Ctrl-C aborts the walk at the next iteration boundary.
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let walker = RingWalker::new(WalkerConfig {
        host: config.host.clone(),
        check_node_limit: config.check_node_limit,
        ..WalkerConfig::default()
    });
    let mut report = ConsoleReport;
    let outcome = walker.walk(client, &entry, &mut report, &cancel).await;

    println!("{}", outcome.end);
    info!(
        hop_count = outcome.hop_count,
        request_count = outcome.request_count,
        "walk finished"
    );
    Ok(())
}
