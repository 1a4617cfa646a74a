//! Core library for the chord ring diagnostic client.
//!
//! This crate provides the transport-free pieces of the ring checker:
//! - Ring position arithmetic
//! - Node snapshot model, wire-faithful
//! - The query seam implemented by transports
//! - Entry-point discovery
//! - The ring-walk state machine and its hop telemetry

pub mod error;
pub mod locator;
pub mod position;
pub mod query;
pub mod report;
pub mod snapshot;
pub mod walker;

pub use error::QueryError;
pub use locator::{EntryLocator, LocateError};
pub use position::RingPosition;
pub use query::NodeQuery;
pub use report::{CollectedReport, ConsoleReport, Hop, ReportSink};
pub use snapshot::NodeInfo;
pub use walker::{RingWalker, WalkEnd, WalkOutcome, WalkerConfig};
