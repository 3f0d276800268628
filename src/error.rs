//! Error types for Cohab

use thiserror::Error;

/// Errors that can occur during computation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Interval sequence corrupt: {starts} starts vs {ends} ends")]
    MismatchedSequence { starts: usize, ends: usize },

    #[error("Visit at {location} ends before it starts ({start} > {end})")]
    NegativeInterval {
        location: String,
        start: f64,
        end: f64,
    },

    #[error("Visit records out of chronological order at t={0}")]
    UnorderedVisits(f64),

    #[error("Antenna read stream out of chronological order at t={0}")]
    UnorderedReads(f64),

    #[error("Invalid phase window: start {0} is not before end {1}")]
    InvalidPhase(f64, f64),

    #[error("Unknown individual: {0}")]
    UnknownIndividual(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(String),

    #[error("Failed to parse input record: {0}")]
    ParseError(String),
}
