//! Parallel load generator.
//!
//! One worker per target address; each worker independently runs the
//! sequential put-then-get probe sequence against its own node. Workers
//! share no mutable state, own their request/response pairs end to end,
//! and are joined by a single barrier with no ordering guarantee.

use crate::kv_check::{get_test_values, put_test_values};
use client::HttpNodeClient;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Fans the probe sequence out across `addresses`, one worker each,
/// and waits for every worker to finish.
pub async fn parallel_load(client: &HttpNodeClient, addresses: Vec<String>) {
    let mut workers = JoinSet::new();
    for address in addresses {
        let client = client.clone();
        workers.spawn(async move {
            put_test_values(&client, &address).await;
            let per_item = get_test_values(&client, &address).await;
            (address, per_item)
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((address, per_item)) => {
                info!(%address, per_item, "load worker finished");
            }
            Err(err) => warn!(%err, "load worker failed"),
        }
    }
}
