//! Apparatus topology
//!
//! Maps ordered antenna pairs to tunnel-crossing direction labels. The
//! engine itself is topology-agnostic; the standard eight-antenna ring (four
//! tunnels, two antennas each) ships as a ready-made configuration and
//! custom layouts plug in through [`Topology`].

use std::collections::HashMap;

/// Antenna-pair lookup used by traversal extraction.
///
/// A direction exists per ordered antenna pair; the label vocabulary is
/// fixed up front so downstream maps can carry every direction even when a
/// stream never crosses it.
pub trait Topology {
    /// Direction label for the ordered pair `(entry, exit)`, if the pair
    /// spans a tunnel.
    fn direction_label(&self, entry: &str, exit: &str) -> Option<&str>;

    /// All direction labels, in a stable order
    fn direction_labels(&self) -> &[String];
}

/// Ring of compartments joined by two-antenna tunnels.
///
/// Each tunnel `(a, b)` yields two directions labelled by antenna
/// concatenation: `"ab"` and `"ba"`.
#[derive(Debug, Clone)]
pub struct RingTopology {
    directions: HashMap<(String, String), String>,
    labels: Vec<String>,
}

impl RingTopology {
    /// The standard eight-antenna apparatus: tunnels (1,2), (3,4), (5,6),
    /// (7,8), directions "12", "21", "34", "43", "56", "65", "78", "87".
    pub fn standard_eight_antenna() -> Self {
        let tunnels: Vec<(String, String)> = [("1", "2"), ("3", "4"), ("5", "6"), ("7", "8")]
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        Self::from_tunnels(&tunnels)
    }

    /// Build a topology from explicit antenna pairs
    pub fn from_tunnels(tunnels: &[(String, String)]) -> Self {
        let mut directions = HashMap::new();
        let mut labels = Vec::new();
        for (a, b) in tunnels {
            for (entry, exit) in [(a, b), (b, a)] {
                let label = format!("{entry}{exit}");
                directions.insert((entry.clone(), exit.clone()), label.clone());
                labels.push(label);
            }
        }
        Self { directions, labels }
    }
}

impl Topology for RingTopology {
    fn direction_label(&self, entry: &str, exit: &str) -> Option<&str> {
        self.directions
            .get(&(entry.to_string(), exit.to_string()))
            .map(String::as_str)
    }

    fn direction_labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_eight_antenna_labels() {
        let topo = RingTopology::standard_eight_antenna();
        assert_eq!(
            topo.direction_labels(),
            &["12", "21", "34", "43", "56", "65", "78", "87"]
        );
    }

    #[test]
    fn test_tunnel_pairs_resolve_both_ways() {
        let topo = RingTopology::standard_eight_antenna();
        assert_eq!(topo.direction_label("1", "2"), Some("12"));
        assert_eq!(topo.direction_label("2", "1"), Some("21"));
        assert_eq!(topo.direction_label("7", "8"), Some("78"));
    }

    #[test]
    fn test_non_tunnel_pairs_have_no_direction() {
        let topo = RingTopology::standard_eight_antenna();
        // same-antenna repeats and cross-compartment hops are not crossings
        assert_eq!(topo.direction_label("1", "1"), None);
        assert_eq!(topo.direction_label("2", "3"), None);
        assert_eq!(topo.direction_label("8", "1"), None);
    }

    #[test]
    fn test_custom_tunnels() {
        let tunnels = vec![("L".to_string(), "R".to_string())];
        let topo = RingTopology::from_tunnels(&tunnels);

        assert_eq!(topo.direction_labels(), &["LR", "RL"]);
        assert_eq!(topo.direction_label("R", "L"), Some("RL"));
        assert_eq!(topo.direction_label("L", "L"), None);
    }
}
