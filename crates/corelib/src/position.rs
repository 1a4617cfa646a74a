//! Ring position arithmetic.
//!
//! Positions are points in the DHT's 32-bit modular identifier space. The
//! observed protocol hashes both node identities and keys into this space;
//! the diagnostic client only ever reads positions back out of node
//! snapshots, so the type stays a thin wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the 32-bit modular identifier space.
///
/// Used both as a node's slot on the ring and as a key's hash target.
/// All arithmetic is modular. `ratio_percent` exists purely for
/// human-readable reporting and is never consulted for routing.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RingPosition(pub u32);

impl RingPosition {
    /// Start of the ring.
    pub const ZERO: RingPosition = RingPosition(0);

    /// Largest representable position (`2^32 - 1`).
    pub const MAX: RingPosition = RingPosition(u32::MAX);

    /// Clockwise distance from `self` to `other`, wrapping at the top of
    /// the identifier space.
    pub fn distance_to(&self, other: &RingPosition) -> RingPosition {
        RingPosition(other.0.wrapping_sub(self.0))
    }

    /// Position expressed as a percentage of the identifier space.
    pub fn ratio_percent(&self) -> f64 {
        (self.0 as f64 / u32::MAX as f64) * 100.0
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
