//! Load and latency probes against running nodes.
//!
//! Everything in this crate is I/O plumbing around the client crate:
//! fixed put/get batches, a snapshot-query throughput profile, and a
//! parallel load generator. None of it feeds back into ring traversal.

pub mod kv_check;
pub mod loadgen;
pub mod throughput;

pub use kv_check::{get_test_values, put_test_values};
pub use loadgen::parallel_load;
pub use throughput::profile_node_info;
