//! HTTP transport for the diagnostic client.
//!
//! Implements the corelib query seam over the node's JSON-over-HTTP
//! interface and carries the simple key/value probe requests used by
//! the load tools.

pub mod http;
pub mod kv;

pub use http::{HttpNodeClient, DEFAULT_QUERY_TIMEOUT};
