//! Interval overlap resolution
//!
//! Given two individuals' interval sequences for the same compartment, this
//! module removes from one sequence ("subordinate") the time mass already
//! claimed by the other ("authoritative"). The operation is asymmetric:
//! argument order decides who keeps overlapping time, so the public entry
//! points name the roles explicitly rather than leaving precedence implicit
//! in argument position.
//!
//! Endpoints are compared by exact `f64` value with no tolerance: a
//! subordinate interval touching an authoritative one at a single instant
//! counts as a zero-duration overlap and resolves by truncation, while
//! intervals separated by any positive epsilon are disjoint.

use crate::types::IntervalSeq;

/// Outcome of resolving one subordinate interval against one authoritative
/// interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// No temporal overlap, nothing mutated
    Disjoint,
    /// Subordinate interval fully contained, removed from the sequence
    Dropped,
    /// Subordinate start advanced to the authoritative end
    HeadTruncated,
    /// Subordinate end pulled back to the authoritative start
    TailTruncated,
    /// Authoritative interval strictly inside; subordinate split in two
    Split,
}

/// Resolve the subordinate's `i`-th interval against the authoritative's
/// `j`-th, applying at most one mutation:
///
/// - full containment drops the subordinate interval,
/// - partial overlap truncates its head or tail,
/// - an authoritative interval strictly inside splits it in two
///   (the sequence grows by one).
fn resolve_step(
    subordinate: &mut IntervalSeq,
    authoritative: &IntervalSeq,
    i: usize,
    j: usize,
) -> Resolution {
    let (sub_start, sub_end) = (subordinate.start(i), subordinate.end(i));
    let (auth_start, auth_end) = (authoritative.start(j), authoritative.end(j));

    if auth_end < sub_start || auth_start > sub_end {
        return Resolution::Disjoint;
    }
    if sub_start >= auth_start && sub_end <= auth_end {
        subordinate.remove(i);
        return Resolution::Dropped;
    }
    if auth_start <= sub_start {
        // containment ruled out, so auth_end < sub_end here
        subordinate.set_start(i, auth_end);
        return Resolution::HeadTruncated;
    }
    if auth_end >= sub_end {
        subordinate.set_end(i, auth_start);
        return Resolution::TailTruncated;
    }
    subordinate.split(i, auth_start, auth_end);
    Resolution::Split
}

/// Single-step resolution of the subordinate's `i`-th interval against the
/// authoritative's `j`-th. Returns whether any overlap was found (and hence
/// whether `subordinate` was mutated).
pub fn resolve(
    subordinate: &mut IntervalSeq,
    authoritative: &IntervalSeq,
    i: usize,
    j: usize,
) -> bool {
    resolve_step(subordinate, authoritative, i, j) != Resolution::Disjoint
}

/// Remove from `subordinate` every instant also claimed by `authoritative`.
///
/// Walks both sequences in chronological lock-step, applying [`resolve`] to
/// the earliest unresolved interval of each side until one sequence is
/// exhausted. `subordinate` is mutated in place; `authoritative` is
/// read-only. After the call, `subordinate` holds exactly the time it did
/// not share with `authoritative`.
pub fn strip_already_claimed(subordinate: &mut IntervalSeq, authoritative: &IntervalSeq) {
    let mut i = 0;
    let mut j = 0;
    while i < subordinate.len() && j < authoritative.len() {
        if authoritative.end(j) < subordinate.start(i) {
            j += 1;
            continue;
        }
        if authoritative.start(j) > subordinate.end(i) {
            i += 1;
            continue;
        }
        match resolve_step(subordinate, authoritative, i, j) {
            // removal shifts the next interval into slot i
            Resolution::Dropped => {}
            // subordinate now starts at the authoritative end; that
            // authoritative interval can claim nothing further
            Resolution::HeadTruncated => j += 1,
            // subordinate interval now ends before the authoritative starts
            Resolution::TailTruncated => i += 1,
            // left piece is final, and the authoritative interval was
            // consumed whole by the cut
            Resolution::Split => {
                i += 1;
                j += 1;
            }
            // unreachable after the ordering guards above
            Resolution::Disjoint => i += 1,
        }
    }
}

/// Role-flipped spelling of [`strip_already_claimed`]: `primary` keeps all of
/// its claimed time, `other` loses whatever the primary already claims.
pub fn keep_as_primary(primary: &IntervalSeq, other: &mut IntervalSeq) {
    strip_already_claimed(other, primary);
}
