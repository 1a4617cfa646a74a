//! Snapshot-query throughput profile.

use client::HttpNodeClient;
use corelib::NodeQuery;
use std::time::Instant;
use tracing::warn;

/// Sequential snapshot queries in one profile run.
pub const PROFILE_QUERY_COUNT: u32 = 50;

/// Issues back-to-back snapshot queries against one node and reports
/// the mean microseconds per query. Failures are counted into the
/// elapsed time like any other round trip.
pub async fn profile_node_info(client: &HttpNodeClient, address: &str) -> f64 {
    let started = Instant::now();
    for _ in 0..PROFILE_QUERY_COUNT {
        if let Err(err) = client.query(address).await {
            warn!(%address, %err, "profile query failed");
        }
    }
    let per_query_usec = started.elapsed().as_micros() as f64 / PROFILE_QUERY_COUNT as f64;
    println!("{per_query_usec:.3} usec/query");
    per_query_usec
}
