//! Interval extraction
//!
//! This module turns one individual's visit log into the interval sequence
//! for a single target compartment, and re-checks the upstream ordering
//! contract at the engine boundary.

use crate::error::EngineError;
use crate::types::{IntervalSeq, Visit};

/// Extract the chronological `[start, end]` subsequence of `visits` whose
/// location equals `location`.
///
/// A location absent from the log yields an empty sequence - sparse
/// topologies and never-visited compartments are normal, not errors. No
/// time-window filtering happens here; callers slice to a phase first.
pub fn location_intervals(visits: &[Visit], location: &str) -> IntervalSeq {
    let mut seq = IntervalSeq::new();
    for visit in visits {
        if visit.location == location {
            seq.push(visit.start, visit.end);
        }
    }
    seq
}

/// Validate the upstream cleaning contract on one individual's visit log:
/// `start <= end` for every visit and chronological, non-overlapping order.
///
/// A violation is a programming-contract error in the ingestion layer, not a
/// recoverable condition; the engine refuses the whole log rather than
/// compute plausible-looking wrong statistics from corrupt intervals.
pub fn validate_visits(visits: &[Visit]) -> Result<(), EngineError> {
    let mut previous_end = f64::NEG_INFINITY;
    for visit in visits {
        if visit.start > visit.end {
            return Err(EngineError::NegativeInterval {
                location: visit.location.clone(),
                start: visit.start,
                end: visit.end,
            });
        }
        if visit.start < previous_end {
            return Err(EngineError::UnorderedVisits(visit.start));
        }
        previous_end = visit.end;
    }
    Ok(())
}
