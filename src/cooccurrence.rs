//! Co-occurrence calculation
//!
//! Measured time together between two individuals' raw interval sequences,
//! and the overlap expected under an independence null model. The null model
//! multiplies occupancy fractions; it deliberately does not correct for an
//! individual being unable to occupy two compartments at once - downstream
//! statistical comparisons depend on this specific null, so it is preserved
//! as-is.

use crate::intervals::location_intervals;
use crate::types::{IntervalSeq, Visit};

/// Measured overlap duration between two raw interval sequences for one
/// location: Σ max(0, min(e1, e2) − max(s1, s2)) over all interval pairs.
/// Symmetric in the two inputs.
pub fn measured_overlap(a: &IntervalSeq, b: &IntervalSeq) -> f64 {
    let mut total = 0.0;
    for (start_a, end_a) in a.iter() {
        for (start_b, end_b) in b.iter() {
            let overlap = end_a.min(end_b) - start_a.max(start_b);
            if overlap > 0.0 {
                total += overlap;
            }
        }
    }
    total
}

/// Measured overlap as a fraction of the total observation duration
pub fn fraction_together(
    a: &IntervalSeq,
    b: &IntervalSeq,
    total_duration: f64,
) -> f64 {
    measured_overlap(a, b) / total_duration
}

/// Fraction of time two individuals would be expected to share the location
/// if their movements were independent: the product of their occupancy
/// fractions.
pub fn expected_fraction_together(
    a: &IntervalSeq,
    b: &IntervalSeq,
    total_duration: f64,
) -> f64 {
    (a.total_duration() / total_duration) * (b.total_duration() / total_duration)
}

/// Pairwise aggregate over a location vocabulary: summed measured fraction
/// and summed expected fraction of time together for one pair of
/// individuals, from their full visit logs.
pub fn time_together_all_locations(
    visits_a: &[Visit],
    visits_b: &[Visit],
    locations: &[String],
    total_duration: f64,
) -> (f64, f64) {
    let mut measured = 0.0;
    let mut expected = 0.0;
    for location in locations {
        let ints_a = location_intervals(visits_a, location);
        let ints_b = location_intervals(visits_b, location);
        measured += fraction_together(&ints_a, &ints_b, total_duration);
        expected += expected_fraction_together(&ints_a, &ints_b, total_duration);
    }
    (measured, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::location_intervals;

    fn mouse1_visits() -> Vec<Visit> {
        vec![
            Visit::new("1", 2.0, 3.0),
            Visit::new("4", 5.0, 6.0),
            Visit::new("3", 8.0, 9.0),
            Visit::new("2", 10.0, 12.0),
            Visit::new("1", 14.0, 20.0),
            Visit::new("2", 21.0, 28.0),
            Visit::new("3", 31.0, 35.0),
            Visit::new("4", 40.0, 45.0),
        ]
    }

    fn mouse2_visits() -> Vec<Visit> {
        vec![
            Visit::new("1", 0.0, 3.0),
            Visit::new("2", 5.0, 6.0),
            Visit::new("3", 8.0, 9.0),
            Visit::new("4", 10.0, 12.0),
            Visit::new("1", 13.0, 18.0),
            Visit::new("4", 22.0, 50.0),
        ]
    }

    #[test]
    fn test_measured_overlap_is_symmetric() {
        for address in ["1", "2", "3", "4"] {
            let ints1 = location_intervals(&mouse1_visits(), address);
            let ints2 = location_intervals(&mouse2_visits(), address);
            assert_eq!(
                measured_overlap(&ints1, &ints2),
                measured_overlap(&ints2, &ints1),
                "asymmetric at address {address}"
            );
        }
    }

    #[test]
    fn test_measured_overlap_values() {
        let m1 = mouse1_visits();
        let m2 = mouse2_visits();

        let at = |address: &str| {
            measured_overlap(
                &location_intervals(&m1, address),
                &location_intervals(&m2, address),
            )
        };

        assert_eq!(at("1"), 1.0 + 18.0 - 14.0);
        assert_eq!(at("2"), 0.0);
        assert_eq!(at("3"), 1.0);
        assert_eq!(at("4"), 5.0);
    }

    #[test]
    fn test_fraction_together() {
        let duration = 100.0;
        let m1 = mouse1_visits();
        let m2 = mouse2_visits();

        let at = |address: &str| {
            fraction_together(
                &location_intervals(&m1, address),
                &location_intervals(&m2, address),
                duration,
            )
        };

        assert_eq!(at("1"), 5.0 / duration);
        assert_eq!(at("2"), 0.0);
        assert_eq!(at("3"), 1.0 / duration);
        assert_eq!(at("4"), 5.0 / duration);
    }

    #[test]
    fn test_expected_fraction_together() {
        let duration = 100.0;
        let duration2 = duration * duration;
        let m1 = mouse1_visits();
        let m2 = mouse2_visits();

        let at = |address: &str| {
            expected_fraction_together(
                &location_intervals(&m1, address),
                &location_intervals(&m2, address),
                duration,
            )
        };

        assert!((at("1") - 56.0 / duration2).abs() < 1e-12);
        assert!((at("2") - 9.0 / duration2).abs() < 1e-12);
        assert!((at("3") - 5.0 / duration2).abs() < 1e-12);
        assert!((at("4") - 6.0 * 30.0 / duration2).abs() < 1e-12);
    }

    #[test]
    fn test_time_together_all_locations() {
        let mouse1 = vec![
            Visit::new("B", 2.0, 3.0),
            Visit::new("A", 5.0, 6.0),
            Visit::new("D", 8.0, 9.0),
            Visit::new("C", 10.0, 12.0),
            Visit::new("B", 14.0, 20.0),
            Visit::new("C", 21.0, 28.0),
            Visit::new("D", 31.0, 35.0),
            Visit::new("A", 40.0, 45.0),
        ];
        let mouse2 = vec![
            Visit::new("B", 0.0, 3.0),
            Visit::new("C", 5.0, 6.0),
            Visit::new("D", 8.0, 9.0),
            Visit::new("A", 10.0, 12.0),
            Visit::new("B", 13.0, 18.0),
            Visit::new("A", 22.0, 50.0),
        ];
        let locations: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let duration = 100.0;

        let (measured, expected) =
            time_together_all_locations(&mouse1, &mouse2, &locations, duration);

        assert!((measured - 11.0 / duration).abs() < 1e-12);
        assert!((expected - 250.0 / (duration * duration)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sequences_yield_zero() {
        let empty = IntervalSeq::new();
        let ints = location_intervals(&mouse1_visits(), "1");

        assert_eq!(measured_overlap(&empty, &ints), 0.0);
        assert_eq!(expected_fraction_together(&empty, &ints, 100.0), 0.0);
    }
}
