//! Solitary-time calculation
//!
//! How much of an individual's time in a compartment was spent without any
//! other individual present: strip the individual's interval sequence
//! against every cohabitant in turn and sum what survives. Each pairwise
//! strip only shrinks the claimed intervals, so the order of cohabitants
//! does not change the total.

use crate::intervals::location_intervals;
use crate::overlap::strip_already_claimed;
use crate::types::Visit;
use std::collections::HashMap;

/// Total time `individual` occupied `location` with no other individual
/// simultaneously present. Zero when the individual never visits the
/// location.
pub fn solitary_time(
    individual: &str,
    visits_by_individual: &HashMap<String, Vec<Visit>>,
    location: &str,
) -> f64 {
    let Some(visits) = visits_by_individual.get(individual) else {
        return 0.0;
    };
    let mut exclusive = location_intervals(visits, location);
    for (other, other_visits) in visits_by_individual {
        if other == individual || exclusive.is_empty() {
            continue;
        }
        let claimed = location_intervals(other_visits, location);
        strip_already_claimed(&mut exclusive, &claimed);
    }
    exclusive.total_duration()
}

/// Solitary time at `location` for every individual in the data set
pub fn solitary_times(
    visits_by_individual: &HashMap<String, Vec<Visit>>,
    location: &str,
) -> HashMap<String, f64> {
    visits_by_individual
        .keys()
        .map(|individual| {
            (
                individual.clone(),
                solitary_time(individual, visits_by_individual, location),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fixture() -> HashMap<String, Vec<Visit>> {
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
        let mouse3 = vec![
            Visit::new("1", 2.0, 3.1),
            Visit::new("4", 5.0, 6.0),
            Visit::new("3", 7.0, 10.0),
            Visit::new("2", 11.0, 15.0),
            Visit::new("1", 16.0, 25.0),
            Visit::new("2", 27.0, 35.0),
            Visit::new("3", 38.0, 45.0),
            Visit::new("4", 50.0, 52.0),
        ];
        let mut data = HashMap::new();
        data.insert("mouse1".to_string(), mouse1);
        data.insert("mouse2".to_string(), mouse2);
        data.insert("mouse3".to_string(), mouse3);
        data
    }

    #[test]
    fn test_address_1_solitary_times() {
        let data = make_fixture();
        let out = solitary_times(&data, "1");

        assert_eq!(out["mouse1"], 0.0);
        assert_eq!(out["mouse2"], 3.0);
        // fractional-second boundary: the 0.1 residual at [3, 3.1] plus
        // [20, 25] after both cohabitants' claims are stripped
        assert!((out["mouse3"] - 5.1).abs() < 1e-12);
    }

    #[test]
    fn test_address_2_solitary_times() {
        let data = make_fixture();
        let out = solitary_times(&data, "2");

        assert_eq!(out["mouse1"], 7.0);
        assert_eq!(out["mouse2"], 1.0);
        assert_eq!(out["mouse3"], 10.0);
    }

    #[test]
    fn test_address_3_solitary_times() {
        let data = make_fixture();
        let out = solitary_times(&data, "3");

        assert_eq!(out["mouse1"], 4.0);
        assert_eq!(out["mouse2"], 0.0);
        assert_eq!(out["mouse3"], 9.0);
    }

    #[test]
    fn test_address_4_solitary_times() {
        let data = make_fixture();
        let out = solitary_times(&data, "4");

        assert_eq!(out["mouse1"], 0.0);
        assert_eq!(out["mouse2"], 25.0);
        assert_eq!(out["mouse3"], 2.0);
    }

    #[test]
    fn test_unknown_individual_is_zero() {
        let data = make_fixture();
        assert_eq!(solitary_time("mouse9", &data, "1"), 0.0);
    }

    #[test]
    fn test_single_occupant_keeps_everything() {
        let mut data = HashMap::new();
        data.insert(
            "only".to_string(),
            vec![Visit::new("1", 0.0, 5.0), Visit::new("1", 8.0, 10.0)],
        );
        assert_eq!(solitary_time("only", &data, "1"), 7.0);
    }
}
