//! Hop telemetry.
//!
//! One record per successful hop, consumed strictly in traversal order.
//! The order is part of the contract: a sink must see hop `n` before hop
//! `n + 1`, so the line stream can be diffed between runs for audit.

use crate::position::RingPosition;
use std::fmt;

/// One successful hop of a ring walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Hop {
    /// 1-based position of this hop in traversal order.
    pub index: u32,
    /// Address the walker sent the query to.
    pub queried_address: String,
    /// Address the node reported for itself.
    pub self_address: String,
    /// Launch-order identifier the node reported; negative means unset.
    pub born_id: i32,
    /// The node's slot on the ring.
    pub node_id: RingPosition,
    /// Primary successor the node reported; the next hop target.
    pub successor_address: String,
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr={} born_id={} node_id_ratio={:.6} counter={} succ_addr={}",
            self.self_address,
            self.born_id,
            self.node_id.ratio_percent(),
            self.index,
            self.successor_address,
        )
    }
}

/// Consumes hop telemetry in traversal order.
pub trait ReportSink {
    fn hop(&mut self, hop: &Hop);
}

/// Prints one line per hop to stdout. The lines are the product of a
/// chain check, not logging, so they bypass `tracing`.
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ReportSink for ConsoleReport {
    fn hop(&mut self, hop: &Hop) {
        println!("{hop}");
    }
}

/// Buffers hops in traversal order, for tests and embedding callers
/// that post-process the walk.
#[derive(Debug, Default)]
pub struct CollectedReport {
    pub hops: Vec<Hop>,
}

impl ReportSink for CollectedReport {
    fn hop(&mut self, hop: &Hop) {
        self.hops.push(hop.clone());
    }
}
