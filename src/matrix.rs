//! Pairwise matrix assembly
//!
//! Collects the per-pair co-occurrence numbers into square individual ×
//! individual matrices and sums solitary time across the location
//! vocabulary. Matrices here are symmetric with a zero diagonal; the label
//! order supplied by the caller fixes row/column order.

use crate::cooccurrence::time_together_all_locations;
use crate::solitary::solitary_time;
use crate::types::{PairMatrix, Visit};
use std::collections::HashMap;

/// Measured and expected fraction-of-time-together matrices over all
/// unordered pairs of `individuals`.
///
/// Individuals missing from `visits_by_individual` contribute empty visit
/// logs and therefore zero rows. Both matrices mirror across the diagonal.
pub fn cooccurrence_matrices(
    visits_by_individual: &HashMap<String, Vec<Visit>>,
    individuals: &[String],
    locations: &[String],
    total_duration: f64,
) -> (PairMatrix, PairMatrix) {
    let mut measured = PairMatrix::zeros(individuals);
    let mut expected = PairMatrix::zeros(individuals);
    let empty: Vec<Visit> = Vec::new();

    for (row, a) in individuals.iter().enumerate() {
        let visits_a = visits_by_individual.get(a).unwrap_or(&empty);
        for (col, b) in individuals.iter().enumerate().skip(row + 1) {
            let visits_b = visits_by_individual.get(b).unwrap_or(&empty);
            let (m, e) =
                time_together_all_locations(visits_a, visits_b, locations, total_duration);
            measured.set(row, col, m);
            measured.set(col, row, m);
            expected.set(row, col, e);
            expected.set(col, row, e);
        }
    }
    (measured, expected)
}

/// Per-individual solitary time summed over the location vocabulary
pub fn solitary_summary(
    visits_by_individual: &HashMap<String, Vec<Visit>>,
    individuals: &[String],
    locations: &[String],
) -> HashMap<String, f64> {
    individuals
        .iter()
        .map(|individual| {
            let total: f64 = locations
                .iter()
                .map(|location| solitary_time(individual, visits_by_individual, location))
                .sum();
            (individual.clone(), total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fixture() -> (HashMap<String, Vec<Visit>>, Vec<String>, Vec<String>) {
        let mouse1 = vec![
            Visit::new("1", 2.0, 3.0),
            Visit::new("4", 5.0, 6.0),
            Visit::new("3", 8.0, 9.0),
            Visit::new("2", 10.0, 12.0),
            Visit::new("1", 14.0, 20.0),
            Visit::new("2", 21.0, 28.0),
            Visit::new("3", 31.0, 35.0),
            Visit::new("4", 40.0, 45.0),
        ];
        let mouse2 = vec![
            Visit::new("1", 0.0, 3.0),
            Visit::new("2", 5.0, 6.0),
            Visit::new("3", 8.0, 9.0),
            Visit::new("4", 10.0, 12.0),
            Visit::new("1", 13.0, 18.0),
            Visit::new("4", 22.0, 50.0),
        ];
        let mut data = HashMap::new();
        data.insert("mouse1".to_string(), mouse1);
        data.insert("mouse2".to_string(), mouse2);
        let individuals = vec!["mouse1".to_string(), "mouse2".to_string()];
        let locations: Vec<String> = ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
        (data, individuals, locations)
    }

    #[test]
    fn test_cooccurrence_matrices_values() {
        let (data, individuals, locations) = make_fixture();
        let duration = 100.0;
        let (measured, expected) =
            cooccurrence_matrices(&data, &individuals, &locations, duration);

        assert!((measured.get(0, 1) - 11.0 / duration).abs() < 1e-12);
        assert_eq!(measured.get(0, 1), measured.get(1, 0));
        assert_eq!(measured.get(0, 0), 0.0);
        assert_eq!(measured.get(1, 1), 0.0);

        assert!((expected.get(0, 1) - 250.0 / (duration * duration)).abs() < 1e-12);
        assert_eq!(expected.get(0, 1), expected.get(1, 0));
        assert_eq!(expected.get(0, 0), 0.0);
    }

    #[test]
    fn test_missing_individual_has_zero_row() {
        let (data, mut individuals, locations) = make_fixture();
        individuals.push("mouse9".to_string());
        let (measured, expected) = cooccurrence_matrices(&data, &individuals, &locations, 100.0);

        assert_eq!(measured.get(0, 2), 0.0);
        assert_eq!(measured.get(2, 1), 0.0);
        assert_eq!(expected.get(2, 0), 0.0);
    }

    #[test]
    fn test_solitary_summary_sums_locations() {
        let (data, individuals, locations) = make_fixture();
        let out = solitary_summary(&data, &individuals, &locations);

        // per-address exclusive time with only two occupants:
        // mouse1: 2 + 9 + 4 + 1, mouse2: 3 + 1 + 0 + 25
        assert_eq!(out["mouse1"], 16.0);
        assert_eq!(out["mouse2"], 29.0);
    }

    #[test]
    fn test_no_double_counting_with_two_occupants() {
        // with exactly two occupants, every second of an individual's
        // occupancy is either solitary or shared
        let (data, individuals, locations) = make_fixture();
        let duration = 100.0;
        let (measured, _) = cooccurrence_matrices(&data, &individuals, &locations, duration);
        let solitary = solitary_summary(&data, &individuals, &locations);
        let shared = measured.get(0, 1) * duration;

        for individual in &individuals {
            let total: f64 = data[individual].iter().map(|v| v.end - v.start).sum();
            assert!((total - (solitary[individual] + shared)).abs() < 1e-12);
        }
    }
}
