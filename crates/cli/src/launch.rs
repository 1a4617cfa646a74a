//! Node process launcher.
//!
//! Fire-and-forget: spawned nodes are not supervised, and launch goes
//! through the platform's shortcut script so the node binary's
//! environment setup stays in one place.

use std::time::Duration;
use tracing::{info, warn};

/// Delay between launches; gives each node time to join the ring before
/// the next one bootstraps off it.
const LAUNCH_INTERVAL: Duration = Duration::from_secs(5);

fn launcher_script() -> &'static str {
    if cfg!(windows) {
        "rust_dkvs.bat"
    } else {
        "./rust_dkvs.sh"
    }
}

/// Spawns one node process with the positional argument convention
/// `(born_id, bind_addr, bind_port, bootstrap_addr, bootstrap_port, log_dir)`.
pub fn start_node(
    born_id: u32,
    bind_addr: &str,
    bind_port: u16,
    bootstrap_addr: &str,
    bootstrap_port: u16,
    log_dir: &str,
) {
    let spawned = tokio::process::Command::new(launcher_script())
        .arg(born_id.to_string())
        .arg(bind_addr)
        .arg(bind_port.to_string())
        .arg(bootstrap_addr)
        .arg(bootstrap_port.to_string())
        .arg(log_dir)
        .spawn();
    if let Err(err) = spawned {
        warn!(born_id, %err, "node launch failed");
    }
}

/// Launches `count` nodes on consecutive ports, all bootstrapping off
/// the first port, with a fixed delay between launches.
pub async fn setup_nodes(host: &str, start_port: u16, count: u32) {
    for i in 0..count {
        let born_id = i + 1;
        start_node(
            born_id,
            host,
            start_port.saturating_add(i as u16),
            host,
            start_port,
            "./",
        );
        info!(born_id, "launched");
        tokio::time::sleep(LAUNCH_INTERVAL).await;
    }
}
