//! Entry-point discovery.
//!
//! The well-known bootstrap port may be occupied by a node that has since
//! left the ring, so the locator scans forward from it: probe a port, and
//! on any failure move to the next one immediately. The scan is capped so
//! a fully dead host terminates instead of walking the whole port range.

use crate::query::NodeQuery;
use thiserror::Error;
use tracing::debug;

/// The locator ran out of candidates before any node answered.
#[derive(Debug, Clone, Error)]
pub enum LocateError {
    #[error("no live node within {attempts} probes from {host}:{start_port}")]
    NoLiveNode {
        host: String,
        start_port: u16,
        attempts: u32,
    },
}

/// Probes increasing ports at one host until a node answers.
///
/// Configuration is explicit per instance; there is no process-wide
/// bind address or probe budget.
#[derive(Debug, Clone)]
pub struct EntryLocator {
    host: String,
    start_port: u16,
    max_probes: u32,
}

impl EntryLocator {
    pub fn new(host: impl Into<String>, start_port: u16, max_probes: u32) -> Self {
        Self {
            host: host.into(),
            start_port,
            max_probes,
        }
    }

    /// Returns the first address whose snapshot query succeeds.
    ///
    /// The snapshot itself is discarded: the walker re-queries the entry
    /// point anyway, and the node may change between locate and walk.
    pub async fn locate<Q: NodeQuery + ?Sized>(&self, query: &Q) -> Result<String, LocateError> {
        let mut port = Some(self.start_port);
        for attempt in 0..self.max_probes {
            let Some(current) = port else { break };
            let address = format!("{}:{}", self.host, current);
            match query.query(&address).await {
                Ok(_) => {
                    debug!(%address, attempt, "entry point answered");
                    return Ok(address);
                }
                Err(err) => {
                    debug!(%address, attempt, %err, "entry probe failed");
                    port = current.checked_add(1);
                }
            }
        }
        Err(LocateError::NoLiveNode {
            host: self.host.clone(),
            start_port: self.start_port,
            attempts: self.max_probes,
        })
    }
}
