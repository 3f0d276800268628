//! Following detection
//!
//! Detects directed leader/follower events: the follower enters a tunnel in
//! the same direction shortly after the leader, while the leader is still
//! inside or has just left. Counts and shared-tunnel time aggregate into
//! asymmetric pair matrices (row leads, column follows).

use crate::directions::DirectionMap;
use crate::error::EngineError;
use crate::types::{IntervalSeq, PairMatrix};
use std::collections::HashMap;

/// Default window after the leader's entry within which a follower entry
/// still counts as following.
pub const DEFAULT_ATTENTION_SPAN: f64 = 10.0;

/// Tuning knobs for the following detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowingConfig {
    /// Maximum follower-entry delay after the leader's entry (seconds)
    pub attention_span: f64,
    /// Grace period after the leader's exit during which a follower entry
    /// still counts (seconds)
    pub exit_tolerance: f64,
}

impl Default for FollowingConfig {
    fn default() -> Self {
        Self {
            attention_span: DEFAULT_ATTENTION_SPAN,
            exit_tolerance: 0.0,
        }
    }
}

/// Outcome of scanning one ordered (leader, follower) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowingTally {
    /// Number of following events
    pub count: u32,
    /// Total time both animals were inside the tunnel together (seconds)
    pub time_together: f64,
    /// Leader-entry to follower-exit duration of each event (seconds)
    pub spans: Vec<f64>,
}

/// Scan every direction for events where `follower` trails `leader`.
///
/// Each leader traversal yields at most one event: the first follower entry
/// strictly after the leader's, within the attention span and strictly
/// before the leader's exit plus the tolerance. An entry at the exact
/// moment the leader leaves does not count. A follower traversal may serve
/// several leader traversals.
pub fn following_single_pair(
    leader: &DirectionMap,
    follower: &DirectionMap,
    config: &FollowingConfig,
) -> FollowingTally {
    let mut tally = FollowingTally::default();
    for (label, leader_seq) in leader {
        let Some(follower_seq) = follower.get(label) else {
            continue;
        };
        for (l_entry, l_exit) in leader_seq.iter() {
            for (f_entry, f_exit) in follower_seq.iter() {
                let trails = f_entry > l_entry
                    && f_entry - l_entry <= config.attention_span
                    && f_entry < l_exit + config.exit_tolerance;
                if trails {
                    tally.count += 1;
                    tally.time_together += (l_exit.min(f_exit) - f_entry).max(0.0);
                    tally.spans.push(f_exit - l_entry);
                    break;
                }
            }
        }
    }
    tally
}

fn clip_to_window(seq: &IntervalSeq, start: f64, end: f64) -> IntervalSeq {
    let mut out = IntervalSeq::new();
    for (s, e) in seq.iter() {
        if s >= start && e <= end {
            out.push(s, e);
        }
    }
    out
}

/// Following matrices over a time window.
///
/// Traversals not fully inside `[window_start, window_end]` are dropped
/// before detection. Returns the raw event-count matrix, the
/// time-together matrix normalized by the window duration, and the spans
/// collected per ordered pair under the key `"leader|follower"`.
pub fn following_matrices(
    directions_by_individual: &HashMap<String, DirectionMap>,
    individuals: &[String],
    window_start: f64,
    window_end: f64,
    config: &FollowingConfig,
) -> Result<(PairMatrix, PairMatrix, HashMap<String, Vec<f64>>), EngineError> {
    if window_start >= window_end {
        return Err(EngineError::InvalidPhase(window_start, window_end));
    }
    let duration = window_end - window_start;

    let clipped: HashMap<&String, DirectionMap> = individuals
        .iter()
        .filter_map(|individual| {
            directions_by_individual.get(individual).map(|dirs| {
                let windowed = dirs
                    .iter()
                    .map(|(label, seq)| {
                        (label.clone(), clip_to_window(seq, window_start, window_end))
                    })
                    .collect();
                (individual, windowed)
            })
        })
        .collect();

    let mut counts = PairMatrix::zeros(individuals);
    let mut times = PairMatrix::zeros(individuals);
    let mut spans = HashMap::new();

    for (row, leader) in individuals.iter().enumerate() {
        let Some(leader_dirs) = clipped.get(leader) else {
            continue;
        };
        for (col, follower) in individuals.iter().enumerate() {
            if row == col {
                continue;
            }
            let Some(follower_dirs) = clipped.get(follower) else {
                continue;
            };
            let tally = following_single_pair(leader_dirs, follower_dirs, config);
            counts.set(row, col, f64::from(tally.count));
            times.set(row, col, tally.time_together / duration);
            if !tally.spans.is_empty() {
                spans.insert(format!("{leader}|{follower}"), tally.spans);
            }
        }
    }
    Ok((counts, times, spans))
}
