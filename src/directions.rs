//! Tunnel-traversal extraction
//!
//! Scans one individual's chronological antenna read stream and pulls out
//! completed tunnel crossings as `(entry time, exit time)` intervals keyed
//! by direction label. Consecutive read pairs that match a tunnel direction
//! but are immediately followed by a return to the entry antenna are
//! rejected: the animal poked into the tunnel and backed out.

use crate::error::EngineError;
use crate::topology::Topology;
use crate::types::{AntennaRead, IntervalSeq};
use std::collections::BTreeMap;

/// Traversal intervals per direction label, label-sorted for deterministic
/// iteration.
pub type DirectionMap = BTreeMap<String, IntervalSeq>;

/// Extract completed tunnel traversals from a read stream.
///
/// Every label in the topology appears in the output, with an empty
/// sequence when the stream never crosses that direction. Reads must be in
/// non-decreasing time order.
pub fn extract_traversals(
    reads: &[AntennaRead],
    topology: &dyn Topology,
) -> Result<DirectionMap, EngineError> {
    let mut out: DirectionMap = topology
        .direction_labels()
        .iter()
        .map(|label| (label.clone(), IntervalSeq::new()))
        .collect();

    for pair in reads.windows(2) {
        if pair[1].time < pair[0].time {
            return Err(EngineError::UnorderedReads(pair[1].time));
        }
    }

    let mut idx = 1;
    while idx < reads.len() {
        let entry = &reads[idx - 1];
        let exit = &reads[idx];
        match topology.direction_label(&entry.antenna, &exit.antenna) {
            Some(label) => {
                // a third read back at the entry antenna means the animal
                // backed out rather than crossed
                if idx + 1 < reads.len() && reads[idx + 1].antenna == entry.antenna {
                    idx += 1;
                    continue;
                }
                if let Some(seq) = out.get_mut(label) {
                    seq.push(entry.time, exit.time);
                }
                idx += 2;
            }
            None => idx += 1,
        }
    }
    Ok(out)
}
