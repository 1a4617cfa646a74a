//! Ring walker state machine.
//!
//! The walker attaches to one live entry node and chases successor
//! pointers around the ring, emitting one hop record per node, until one
//! of four things happens:
//!
//! - the reported successor equals the start address (the ring closed),
//! - the global request budget runs out (the chain may never close),
//! - an address that once answered keeps failing past the retry budget
//!   (a member is genuinely down and its metadata is not recoverable), or
//! - the caller cancels the walk.
//!
//! The walk is an inherently sequential pointer-chase: the next address
//! is only known after the previous query succeeds, so the loop is
//! single-threaded and suspends only at the network boundary.
//!
//! Failure classification is three-way. Before the first success the
//! entry point itself is suspect (it may have died between locate and
//! the first query), so the walker keeps scanning forward through ports
//! on the configured host. After a success, a failure is first treated
//! as a transient blip and retried against the same address a bounded
//! number of times; only when the retries are exhausted does the walk
//! give up. The walker follows primary successors only: it does not fall
//! back to `successor_info_list[1..]` when the primary stays down, which
//! is a known limitation of the observed protocol tooling.

use crate::query::NodeQuery;
use crate::report::{Hop, ReportSink};
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Walker tuning, passed in at construction.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Host scanned when the entry point dies before the first success.
    pub host: String,
    /// Ceiling on requests issued by one walk. Successor chains can form
    /// cycles shorter or longer than the membership when metadata is
    /// stale; without a ceiling such a walk never terminates.
    pub check_node_limit: u32,
    /// How many times a previously live address is re-queried before the
    /// walk is declared stuck.
    pub same_address_retry_limit: u32,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            check_node_limit: 150,
            same_address_retry_limit: 3,
        }
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEnd {
    /// The successor chain returned to the start address; the full
    /// membership has been enumerated.
    Closed,
    /// The request budget ran out before the chain closed.
    LimitExceeded,
    /// An address that had answered kept failing past the retry budget.
    Stuck { address: String },
    /// The caller's cancellation token fired.
    Cancelled,
}

impl fmt::Display for WalkEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkEnd::Closed => {
                write!(f, "ring closed: traversal returned to the start address")
            }
            WalkEnd::LimitExceeded => {
                write!(f, "request limit reached; the successor chain may never close")
            }
            WalkEnd::Stuck { address } => {
                write!(f, "successor {address} is down and its information was not recovered")
            }
            WalkEnd::Cancelled => write!(f, "walk cancelled"),
        }
    }
}

/// Terminal summary of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    pub end: WalkEnd,
    /// Successful hops; equals the membership size when `end` is `Closed`.
    pub hop_count: u32,
    /// Total iterations charged against `check_node_limit`.
    pub request_count: u32,
}

/// Drives the consistency walk over any [`NodeQuery`] transport.
#[derive(Debug, Clone)]
pub struct RingWalker {
    config: WalkerConfig,
}

impl RingWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walks the ring starting from `start_address`, feeding each
    /// successful hop to `sink` in traversal order.
    ///
    /// `cancel` is checked once per iteration, before the query, so a
    /// runaway walk can be aborted without waiting for the request
    /// budget to drain.
    pub async fn walk<Q: NodeQuery + ?Sized>(
        &self,
        query: &Q,
        start_address: &str,
        sink: &mut dyn ReportSink,
        cancel: &CancellationToken,
    ) -> WalkOutcome {
        let mut start_address = start_address.to_string();
        let mut current_address = start_address.clone();
        // Port the bootstrap scan continues from, when the address carries one.
        let mut scan_port = address_port(&current_address);

        let mut hop_count: u32 = 0;
        let mut request_count: u32 = 0;
        let mut same_address_retries: u32 = 0;
        let mut any_success = false;

        loop {
            if cancel.is_cancelled() {
                debug!(%current_address, "walk cancelled by caller");
                return self.outcome(WalkEnd::Cancelled, hop_count, request_count);
            }

            request_count += 1;
            if request_count >= self.config.check_node_limit {
                warn!(
                    limit = self.config.check_node_limit,
                    "request limit reached before ring closure"
                );
                return self.outcome(WalkEnd::LimitExceeded, hop_count, request_count);
            }

            match query.query(&current_address).await {
                Ok(info) => {
                    any_success = true;
                    same_address_retries = 0;

                    // An empty successor list only occurs on a degenerate
                    // single-node ring; such a node closes on itself.
                    let successor_address = match info.primary_successor() {
                        Some(successor) => successor.address_str.clone(),
                        None => current_address.clone(),
                    };

                    hop_count += 1;
                    let hop = Hop {
                        index: hop_count,
                        queried_address: current_address.clone(),
                        self_address: info.address_str.clone(),
                        born_id: info.born_id,
                        node_id: info.node_id,
                        successor_address: successor_address.clone(),
                    };
                    sink.hop(&hop);

                    if successor_address == start_address {
                        return self.outcome(WalkEnd::Closed, hop_count, request_count);
                    }
                    current_address = successor_address;
                }
                Err(err) if !any_success => {
                    // No node has answered yet, so the entry point itself is
                    // stale; keep scanning forward on the configured host.
                    // The start address moves with the scan so that closure
                    // is judged against the first live entry.
                    match scan_port.and_then(|p| p.checked_add(1)) {
                        Some(next_port) => {
                            debug!(%current_address, %err, next_port, "entry stale; scanning forward");
                            scan_port = Some(next_port);
                            current_address = format!("{}:{}", self.config.host, next_port);
                            start_address = current_address.clone();
                        }
                        None => {
                            warn!(%current_address, %err, "no port left to scan");
                            return self.outcome(
                                WalkEnd::Stuck {
                                    address: current_address,
                                },
                                hop_count,
                                request_count,
                            );
                        }
                    }
                }
                Err(err) if same_address_retries < self.config.same_address_retry_limit => {
                    same_address_retries += 1;
                    debug!(
                        %current_address,
                        attempt = same_address_retries,
                        %err,
                        "transient failure; retrying same address"
                    );
                }
                Err(err) => {
                    warn!(%current_address, %err, "successor down past the retry budget");
                    return self.outcome(
                        WalkEnd::Stuck {
                            address: current_address,
                        },
                        hop_count,
                        request_count,
                    );
                }
            }
        }
    }

    fn outcome(&self, end: WalkEnd, hop_count: u32, request_count: u32) -> WalkOutcome {
        WalkOutcome {
            end,
            hop_count,
            request_count,
        }
    }
}

/// Port component of a `host:port` address, when present and numeric.
fn address_port(address: &str) -> Option<u16> {
    address
        .rsplit_once(':')
        .and_then(|(_, port)| port.parse().ok())
}
