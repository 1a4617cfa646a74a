//! Fixed put/get batches for smoke-testing a ring.

use client::HttpNodeClient;
use std::time::Instant;
use tracing::{info, warn};

/// Size of the fixed key set, keys "0" through "99", value == key.
pub const TEST_KEY_COUNT: u32 = 100;

/// Stores the fixed key set on the ring via the node at `address`.
///
/// Individual failures are logged and skipped; one unreachable key must
/// not abort the batch.
pub async fn put_test_values(client: &HttpNodeClient, address: &str) {
    for i in 0..TEST_KEY_COUNT {
        let key = i.to_string();
        info!(%key, "put request");
        if let Err(err) = client.put_simple(address, &key, &key).await {
            warn!(%key, %err, "put request failed");
        }
    }
}

/// Reads the fixed key set back and reports the mean seconds per item.
pub async fn get_test_values(client: &HttpNodeClient, address: &str) -> f64 {
    let started = Instant::now();
    for i in 0..TEST_KEY_COUNT {
        let key = i.to_string();
        match client.get_simple(address, &key).await {
            Ok(value) => info!(%key, %value, "get response"),
            Err(err) => warn!(%key, %err, "get missed"),
        }
    }
    let per_item = started.elapsed().as_secs_f64() / TEST_KEY_COUNT as f64;
    println!("{per_item:.6} sec/data");
    per_item
}
