//! Tests for the ring-walk state machine.
//!
//! # Test Strategy
//!
//! 1. **Healthy rings**: full traversal, closure, hop ordering
//! 2. **Degraded rings**: stale entry points, dead successors, blips
//! 3. **Hard stops**: request budget, retry budget, cancellation
//! 4. **Entry location**: forward port scan, probe budget
//!
//! All of it runs against a scripted in-memory transport; no sockets.

use async_trait::async_trait;
use corelib::{
    CollectedReport, EntryLocator, NodeInfo, NodeQuery, QueryError, RingPosition, RingWalker,
    WalkEnd, WalkOutcome, WalkerConfig,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Scripted transport
// ============================================================================

enum Behavior {
    Live(NodeInfo),
    /// Fails the first `n` queries, then answers like a live node.
    Flaky(Mutex<u32>, NodeInfo),
}

#[derive(Default)]
struct ScriptedRing {
    nodes: HashMap<String, Behavior>,
    log: Mutex<Vec<String>>,
}

impl ScriptedRing {
    fn live(mut self, info: NodeInfo) -> Self {
        self.nodes.insert(info.address_str.clone(), Behavior::Live(info));
        self
    }

    fn flaky(mut self, failures: u32, info: NodeInfo) -> Self {
        self.nodes.insert(
            info.address_str.clone(),
            Behavior::Flaky(Mutex::new(failures), info),
        );
        self
    }

    fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn queries_to(&self, address: &str) -> usize {
        self.queries().iter().filter(|a| *a == address).count()
    }
}

#[async_trait]
impl NodeQuery for ScriptedRing {
    async fn query(&self, address: &str) -> Result<NodeInfo, QueryError> {
        self.log.lock().unwrap().push(address.to_string());
        match self.nodes.get(address) {
            Some(Behavior::Live(info)) => Ok(info.clone()),
            Some(Behavior::Flaky(failures_left, info)) => {
                let mut left = failures_left.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    Err(QueryError::Unreachable(format!("blip at {address}")))
                } else {
                    Ok(info.clone())
                }
            }
            None => Err(QueryError::Unreachable(format!(
                "connection refused: {address}"
            ))),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn addr(port: u16) -> String {
    format!("127.0.0.1:{port}")
}

/// Minimal snapshot embedded as a successor entry.
fn successor_stub(port: u16) -> NodeInfo {
    NodeInfo {
        node_id: RingPosition(port as u32),
        address_str: addr(port),
        born_id: -1,
        successor_info_list: vec![],
        predecessor_info_list: vec![],
        finger_table: vec![],
    }
}

fn member(port: u16, born_id: i32, successor_port: u16) -> NodeInfo {
    NodeInfo {
        node_id: RingPosition((port as u32) << 16),
        address_str: addr(port),
        born_id,
        successor_info_list: vec![successor_stub(successor_port)],
        predecessor_info_list: vec![],
        finger_table: vec![],
    }
}

/// A healthy ring over `ports`, each node pointing at the next, the last
/// closing back to the first.
fn healthy_ring(ports: &[u16]) -> ScriptedRing {
    let mut ring = ScriptedRing::default();
    for (i, port) in ports.iter().enumerate() {
        let successor = ports[(i + 1) % ports.len()];
        ring = ring.live(member(*port, i as i32 + 1, successor));
    }
    ring
}

fn walker() -> RingWalker {
    RingWalker::new(WalkerConfig::default())
}

async fn run_walk(ring: &ScriptedRing, start: &str) -> (WalkOutcome, CollectedReport) {
    let mut report = CollectedReport::default();
    let outcome = walker()
        .walk(ring, start, &mut report, &CancellationToken::new())
        .await;
    (outcome, report)
}

// ============================================================================
// Healthy rings
// ============================================================================

#[tokio::test]
async fn test_three_node_ring_closes_with_three_hops() {
    let ring = healthy_ring(&[11000, 11001, 11002]);

    let (outcome, report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, 3);

    let visited: Vec<_> = report.hops.iter().map(|h| h.self_address.clone()).collect();
    assert_eq!(visited, vec![addr(11000), addr(11001), addr(11002)]);

    // Hop indices count up in traversal order
    let indices: Vec<_> = report.hops.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    // The final hop points back at the start
    assert_eq!(report.hops[2].successor_address, addr(11000));
}

#[tokio::test]
async fn test_walk_visits_every_member_exactly_once() {
    let ports: Vec<u16> = (11000..11010).collect();
    let ring = healthy_ring(&ports);

    let (outcome, report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, ports.len() as u32);

    let mut visited: Vec<_> = report.hops.iter().map(|h| h.self_address.clone()).collect();
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), ports.len(), "no address visited twice");
}

#[tokio::test]
async fn test_walk_is_idempotent_over_an_unchanged_ring() {
    let ring = healthy_ring(&[11000, 11001, 11002, 11003, 11004]);

    let (first, first_report) = run_walk(&ring, &addr(11000)).await;
    let (second, second_report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(first, second);
    assert_eq!(first_report.hops, second_report.hops);
}

#[tokio::test]
async fn test_single_node_with_empty_successor_list_closes_on_itself() {
    let mut lone = member(11000, 1, 11000);
    lone.successor_info_list.clear();
    let ring = ScriptedRing::default().live(lone);

    let (outcome, report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, 1);
    assert_eq!(report.hops[0].successor_address, addr(11000));
}

// ============================================================================
// Degraded rings
// ============================================================================

#[tokio::test]
async fn test_stale_entry_scans_forward_and_still_closes() {
    // 11000 and 11001 died after the locator ran; the live ring starts
    // at 11002.
    let ring = ScriptedRing::default()
        .live(member(11002, 1, 11003))
        .live(member(11003, 2, 11002));

    let (outcome, report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, 2);
    assert_eq!(report.hops[0].self_address, addr(11002));
    // two dead probes plus two live hops
    assert_eq!(outcome.request_count, 4);
}

#[tokio::test]
async fn test_dead_successor_is_queried_exactly_four_times_then_stuck() {
    // 11000 answers; its successor 11001 never does.
    let ring = ScriptedRing::default().live(member(11000, 1, 11001));

    let (outcome, _) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(
        outcome.end,
        WalkEnd::Stuck {
            address: addr(11001)
        }
    );
    assert_eq!(outcome.hop_count, 1);
    // one initial query plus three retries, never fewer, never more
    assert_eq!(ring.queries_to(&addr(11001)), 4);
}

#[tokio::test]
async fn test_transient_blip_retries_the_same_address_without_advancing() {
    let ring = ScriptedRing::default()
        .live(member(11000, 1, 11001))
        .flaky(2, member(11001, 2, 11000));

    let (outcome, report) = run_walk(&ring, &addr(11000)).await;

    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, 2);
    // two failed attempts and the successful third, all at 11001
    assert_eq!(ring.queries_to(&addr(11001)), 3);
    assert_eq!(report.hops[1].self_address, addr(11001));
}

// ============================================================================
// Hard stops
// ============================================================================

#[tokio::test]
async fn test_request_limit_stops_an_unclosing_chain() {
    // 11001 and 11002 point at each other; the chain never returns to
    // the 11000 entry, so only the budget stops the walk.
    let ring = ScriptedRing::default()
        .live(member(11000, 1, 11001))
        .live(member(11001, 2, 11002))
        .live(member(11002, 3, 11001));

    let limit = 10;
    let walker = RingWalker::new(WalkerConfig {
        check_node_limit: limit,
        ..WalkerConfig::default()
    });
    let mut report = CollectedReport::default();
    let outcome = walker
        .walk(&ring, &addr(11000), &mut report, &CancellationToken::new())
        .await;

    assert_eq!(outcome.end, WalkEnd::LimitExceeded);
    assert_eq!(outcome.request_count, limit);
    // the budgeted iteration itself issues no query
    assert_eq!(ring.queries().len(), (limit - 1) as usize);
}

#[tokio::test]
async fn test_cancelled_token_stops_the_walk_before_any_query() {
    let ring = healthy_ring(&[11000, 11001]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut report = CollectedReport::default();
    let outcome = walker()
        .walk(&ring, &addr(11000), &mut report, &cancel)
        .await;

    assert_eq!(outcome.end, WalkEnd::Cancelled);
    assert_eq!(outcome.request_count, 0);
    assert!(ring.queries().is_empty());
    assert!(report.hops.is_empty());
}

// ============================================================================
// Entry location
// ============================================================================

#[tokio::test]
async fn test_locator_lands_one_step_past_a_dead_bootstrap_port() {
    // 11000 is dead; 11001 is a one-node ring closing on itself.
    let ring = ScriptedRing::default().live(member(11001, 1, 11001));

    let locator = EntryLocator::new("127.0.0.1", 11000, 150);
    let entry = locator.locate(&ring).await.unwrap();
    assert_eq!(entry, addr(11001));
    assert_eq!(ring.queries(), vec![addr(11000), addr(11001)]);

    // The walk from the located entry reports a one-node ring.
    let (outcome, report) = run_walk(&ring, &entry).await;
    assert_eq!(outcome.end, WalkEnd::Closed);
    assert_eq!(outcome.hop_count, 1);
    assert_eq!(report.hops[0].successor_address, entry);
}

#[tokio::test]
async fn test_locator_gives_up_after_its_probe_budget() {
    let ring = ScriptedRing::default(); // nothing answers

    let locator = EntryLocator::new("127.0.0.1", 11000, 5);
    let err = locator.locate(&ring).await.unwrap_err();

    assert!(matches!(err, corelib::LocateError::NoLiveNode { attempts: 5, .. }));
    assert_eq!(ring.queries().len(), 5);
}
