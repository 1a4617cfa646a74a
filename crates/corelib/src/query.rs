//! Transport-agnostic query seam.

use crate::error::QueryError;
use crate::snapshot::NodeInfo;
use async_trait::async_trait;

/// Sends a single "describe yourself" request to one node address.
///
/// Implementations issue exactly one request per call and never retry;
/// retry policy belongs entirely to the ring walker. The HTTP transport
/// lives in the client crate, and tests script this trait directly.
#[async_trait]
pub trait NodeQuery: Send + Sync {
    /// Queries `address` for its current ring snapshot.
    async fn query(&self, address: &str) -> Result<NodeInfo, QueryError>;
}
