//! Simple key/value probe requests.
//!
//! These exist to generate load and latency samples; the ring walker
//! never consults them. Responses stay raw JSON values, since only the
//! round-trip matters to the probes.

use crate::http::HttpNodeClient;
use corelib::QueryError;
use serde_json::Value;

impl HttpNodeClient {
    /// Stores `value` under `key` on the ring via the node at `address`.
    pub async fn put_simple(
        &self,
        address: &str,
        key: &str,
        value: &str,
    ) -> Result<Value, QueryError> {
        self.get_json(address, "/global_put_simple", &[("key", key), ("val", value)])
            .await
    }

    /// Reads `key` from the ring via the node at `address`.
    pub async fn get_simple(&self, address: &str, key: &str) -> Result<Value, QueryError> {
        self.get_json(address, "/global_get_simple", &[("key", key)])
            .await
    }
}
