//! Cohab - Batch compute engine for social-behavior metrics from
//! RFID-tracked group housing
//!
//! Cohab turns per-individual visit logs and antenna read streams from an
//! RFID housing monitor into pairwise social statistics through a
//! deterministic pipeline: interval extraction → overlap resolution →
//! co-occurrence/solitary metrics → matrix aggregation, with an independent
//! branch for directional passage traversals → following detection.
//!
//! ## Modules
//!
//! - **Interval branch**: occupancy intervals per compartment, exclusive-time
//!   resolution, measured vs. expected time together, solitary time
//! - **Direction branch**: tunnel traversal classification and
//!   leader/follower detection across passage crossings
//!
//! All computation is pure and batch: the engine consumes already-cleaned,
//! time-ordered records and performs no I/O.

pub mod cooccurrence;
pub mod directions;
pub mod error;
pub mod following;
pub mod intervals;
pub mod matrix;
pub mod overlap;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod solitary;
pub mod topology;
pub mod types;

pub use error::EngineError;
pub use pipeline::{records_to_report_json, ExperimentData, SocialAnalyzer};
pub use report::{ReportEncoder, SocialReport};
pub use topology::{RingTopology, Topology};

// Schema exports
pub use schema::{EventPayload, EventRecord, SCHEMA_VERSION};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "cohab";
