//! Failure taxonomy for node queries.

use std::time::Duration;
use thiserror::Error;

/// Ways a single "describe yourself" query can fail.
///
/// All three variants are recoverable at the ring-walker layer: the walker
/// always terminates in one of its end states and reports which, so none
/// of these is ever upgraded to a crash.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// No connection could be established (refused, no route, dead port).
    #[error("node unreachable: {0}")]
    Unreachable(String),

    /// A connection was made but no response arrived within the bound.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// A response arrived but could not be decoded into a node snapshot.
    #[error("malformed node snapshot: {0}")]
    Malformed(String),
}
