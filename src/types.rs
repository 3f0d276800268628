//! Core types for the Cohab pipeline
//!
//! This module defines the data structures that flow through each stage of
//! the pipeline: visits, interval sequences, antenna reads, phase windows,
//! and pairwise matrices.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// One continuous presence of an individual at a location.
///
/// Locations are opaque, equality-comparable identifiers: a compartment name,
/// a cage number, whatever the apparatus configuration supplies. Upstream
/// cleaning guarantees `start <= end` and chronological, non-overlapping
/// visits per individual; [`crate::intervals::validate_visits`] re-checks the
/// contract at the engine boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Compartment identifier (opaque key)
    pub location: String,
    /// Entry time (seconds, RFID clock)
    pub start: f64,
    /// Exit time (seconds, RFID clock)
    pub end: f64,
}

impl Visit {
    pub fn new(location: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            location: location.into(),
            start,
            end,
        }
    }
}

/// A single antenna registration in an individual's read stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaRead {
    /// Registration time (seconds, RFID clock)
    pub time: f64,
    /// Antenna identifier (opaque key, finer-grained than compartments)
    pub antenna: String,
}

impl AntennaRead {
    pub fn new(time: f64, antenna: impl Into<String>) -> Self {
        Self {
            time,
            antenna: antenna.into(),
        }
    }
}

/// An ordered sequence of `[start, end]` intervals kept as two parallel
/// vectors.
///
/// This is the unit of currency for the whole interval branch: extraction
/// produces one per (individual, location), overlap resolution mutates one in
/// place, the calculators sum durations over them. Chronological order and
/// `starts.len() == ends.len()` hold at all times; resolution may shorten the
/// sequence (intervals dropped) or lengthen it (intervals split in two).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSeq {
    starts: Vec<f64>,
    ends: Vec<f64>,
}

impl IntervalSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(start, end)` pairs, enforcing `start <= end` on each.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, EngineError> {
        let mut seq = Self::new();
        for &(start, end) in pairs {
            if start > end {
                return Err(EngineError::NegativeInterval {
                    location: String::new(),
                    start,
                    end,
                });
            }
            seq.push(start, end);
        }
        Ok(seq)
    }

    /// Append an interval at the chronological tail
    pub fn push(&mut self, start: f64, end: f64) {
        self.starts.push(start);
        self.ends.push(end);
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn start(&self, i: usize) -> f64 {
        self.starts[i]
    }

    pub fn end(&self, i: usize) -> f64 {
        self.ends[i]
    }

    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    pub fn ends(&self) -> &[f64] {
        &self.ends
    }

    /// Iterate `(start, end)` pairs in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.starts.iter().copied().zip(self.ends.iter().copied())
    }

    /// Sum of interval durations
    pub fn total_duration(&self) -> f64 {
        self.iter().map(|(s, e)| e - s).sum()
    }

    pub(crate) fn set_start(&mut self, i: usize, t: f64) {
        self.starts[i] = t;
    }

    pub(crate) fn set_end(&mut self, i: usize, t: f64) {
        self.ends[i] = t;
    }

    /// Drop the i-th interval entirely
    pub(crate) fn remove(&mut self, i: usize) {
        self.starts.remove(i);
        self.ends.remove(i);
    }

    /// Replace the i-th interval `[s, e]` with `[s, left_end]` and
    /// `[right_start, e]`. The sequence grows by one; insertion at `i + 1`
    /// keeps chronological order intact.
    pub(crate) fn split(&mut self, i: usize, left_end: f64, right_start: f64) {
        let old_end = self.ends[i];
        self.ends[i] = left_end;
        self.starts.insert(i + 1, right_start);
        self.ends.insert(i + 1, old_end);
    }

    /// Check the structural invariants: equal-length parallel vectors and
    /// `start <= end` per interval.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.starts.len() != self.ends.len() {
            return Err(EngineError::MismatchedSequence {
                starts: self.starts.len(),
                ends: self.ends.len(),
            });
        }
        for (s, e) in self.iter() {
            if s > e {
                return Err(EngineError::NegativeInterval {
                    location: String::new(),
                    start: s,
                    end: e,
                });
            }
        }
        Ok(())
    }
}

/// A named time window over which aggregate statistics are computed.
///
/// Phase boundaries come from the experiment configuration (an external
/// collaborator); the engine only slices event streams to the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase label (e.g. "1 dark", "2 light")
    pub name: String,
    /// Window start (seconds, RFID clock)
    pub start: f64,
    /// Window end (seconds, RFID clock)
    pub end: f64,
}

impl Phase {
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.start >= self.end {
            return Err(EngineError::InvalidPhase(self.start, self.end));
        }
        Ok(())
    }
}

/// A square individual × individual matrix holding one scalar metric.
///
/// Row/column order follows the label list supplied at construction. The
/// diagonal is left at zero; whether the matrix is symmetric depends on the
/// metric (time together is, following is not - row is leader, column is
/// follower).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl PairMatrix {
    /// Create a zero matrix over the given individuals
    pub fn zeros(labels: &[String]) -> Self {
        Self {
            labels: labels.to_vec(),
            values: vec![vec![0.0; labels.len()]; labels.len()],
        }
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row][col] = value;
    }

    /// Look up a cell by individual identifiers
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == row)?;
        let c = self.labels.iter().position(|l| l == col)?;
        Some(self.values[r][c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_seq_push_and_duration() {
        let mut seq = IntervalSeq::new();
        seq.push(2.0, 3.0);
        seq.push(14.0, 20.0);

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.total_duration(), 7.0);
        assert!(seq.validate().is_ok());
    }

    #[test]
    fn test_interval_seq_split_preserves_order() {
        let mut seq = IntervalSeq::from_pairs(&[(0.0, 3.0), (13.0, 18.0)]).unwrap();
        seq.split(0, 2.0, 2.5);

        assert_eq!(seq.starts(), &[0.0, 2.5, 13.0]);
        assert_eq!(seq.ends(), &[2.0, 3.0, 18.0]);
        assert!(seq.validate().is_ok());
    }

    #[test]
    fn test_interval_seq_rejects_negative_interval() {
        let result = IntervalSeq::from_pairs(&[(5.0, 4.0)]);
        assert!(matches!(
            result,
            Err(EngineError::NegativeInterval { .. })
        ));
    }

    #[test]
    fn test_phase_validation() {
        assert!(Phase::new("1 dark", 0.0, 3600.0).validate().is_ok());
        assert!(Phase::new("bad", 10.0, 10.0).validate().is_err());
    }

    #[test]
    fn test_pair_matrix_labels() {
        let labels: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut m = PairMatrix::zeros(&labels);
        m.set(0, 1, 2.5);

        assert_eq!(m.get(0, 1), 2.5);
        assert_eq!(m.get(1, 0), 0.0);
        assert_eq!(m.get_by_label("a", "b"), Some(2.5));
        assert_eq!(m.get_by_label("a", "missing"), None);
    }
}
