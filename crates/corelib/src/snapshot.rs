//! Node snapshot model.
//!
//! A `NodeInfo` is what a ring member returns when asked to describe
//! itself: its own slot and address, plus the successor, predecessor,
//! and finger-table metadata chord maintains. Instances are immutable
//! query results with the lifecycle "constructed from one response, read
//! by the walker, superseded by the next hop's snapshot". Nothing here
//! is persisted.

use crate::position::RingPosition;
use serde::{Deserialize, Serialize};

/// Finger-table slots in the observed protocol, one per bit of the
/// identifier space. The decoder does not enforce this length; the
/// walker never reads the table.
pub const FINGER_TABLE_SLOTS: usize = 32;

/// Snapshot of one ring member at query time.
///
/// Field names mirror the wire payload exactly. Decoding fails closed:
/// a payload with a missing or type-mismatched field is a decode error,
/// never a partially filled snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// The member's slot on the ring.
    pub node_id: RingPosition,

    /// Reachable endpoint, `host:port`.
    pub address_str: String,

    /// Launch-order identifier, negative when unset. Diagnostics only;
    /// never consulted by ring logic.
    pub born_id: i32,

    /// Nearest successor first; index 0 is the primary successor. Empty
    /// only for a degenerate single-node ring.
    pub successor_info_list: Vec<NodeInfo>,

    /// Informational; the walker does not consult it.
    pub predecessor_info_list: Vec<NodeInfo>,

    /// Routing shortcuts at exponentially increasing ring offsets.
    /// `None` entries are "not yet known". Present in the payload for
    /// completeness; unused by the walker.
    pub finger_table: Vec<Option<NodeInfo>>,
}

impl NodeInfo {
    /// The node's primary successor, if it reports one.
    pub fn primary_successor(&self) -> Option<&NodeInfo> {
        self.successor_info_list.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> String {
        let nulls: Vec<&str> = vec!["null"; FINGER_TABLE_SLOTS];
        format!(
            concat!(
                r#"{{"node_id":3000000000,"address_str":"127.0.0.1:11000","born_id":1,"#,
                r#""successor_info_list":[{{"node_id":100,"address_str":"127.0.0.1:11001","#,
                r#""born_id":2,"successor_info_list":[],"predecessor_info_list":[],"#,
                r#""finger_table":[]}}],"predecessor_info_list":[],"finger_table":[{}]}}"#
            ),
            nulls.join(",")
        )
    }

    #[test]
    fn test_decode_well_formed_snapshot() {
        let info: NodeInfo = serde_json::from_str(&sample_payload()).unwrap();
        assert_eq!(info.node_id, RingPosition(3_000_000_000));
        assert_eq!(info.address_str, "127.0.0.1:11000");
        assert_eq!(info.born_id, 1);
        assert_eq!(info.finger_table.len(), FINGER_TABLE_SLOTS);
        assert!(info.finger_table.iter().all(Option::is_none));

        let successor = info.primary_successor().unwrap();
        assert_eq!(successor.address_str, "127.0.0.1:11001");
    }

    #[test]
    fn test_decode_fails_closed_on_missing_field() {
        // born_id absent: must be a decode error, not a default
        let payload = r#"{"node_id":1,"address_str":"a:1","successor_info_list":[],"predecessor_info_list":[],"finger_table":[]}"#;
        assert!(serde_json::from_str::<NodeInfo>(payload).is_err());
    }

    #[test]
    fn test_decode_fails_closed_on_mismatched_type() {
        let payload = r#"{"node_id":"not-a-number","address_str":"a:1","born_id":0,"successor_info_list":[],"predecessor_info_list":[],"finger_table":[]}"#;
        assert!(serde_json::from_str::<NodeInfo>(payload).is_err());
    }

    #[test]
    fn test_negative_born_id_is_the_unset_sentinel() {
        let payload = r#"{"node_id":0,"address_str":"a:1","born_id":-1,"successor_info_list":[],"predecessor_info_list":[],"finger_table":[]}"#;
        let info: NodeInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(info.born_id, -1);
        assert!(info.primary_successor().is_none());
    }
}
