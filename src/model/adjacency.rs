use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Country adjacency table — bidirectional, sorted neighbor lists.
///
/// Fixed geography: built once at world setup and read by the war
/// targeting pass. BTreeMap for deterministic iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborMap {
    adjacency: BTreeMap<u64, Vec<u64>>,
}

impl NeighborMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bidirectional border. Maintains sorted neighbor lists.
    pub fn add_border(&mut self, a: u64, b: u64) {
        assert!(a != b, "add_border: country {a} cannot border itself");
        let a_neighbors = self.adjacency.entry(a).or_default();
        if let Err(pos) = a_neighbors.binary_search(&b) {
            a_neighbors.insert(pos, b);
        }

        let b_neighbors = self.adjacency.entry(b).or_default();
        if let Err(pos) = b_neighbors.binary_search(&a) {
            b_neighbors.insert(pos, a);
        }
    }

    /// Sorted neighbors of a country.
    pub fn neighbors(&self, country: u64) -> &[u64] {
        self.adjacency.get(&country).map_or(&[], |v| v.as_slice())
    }

    pub fn are_neighbors(&self, a: u64, b: u64) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbors| neighbors.binary_search(&b).is_ok())
    }

    /// Number of countries with at least one border.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders_are_bidirectional() {
        let mut map = NeighborMap::new();
        map.add_border(1, 2);
        assert!(map.are_neighbors(1, 2));
        assert!(map.are_neighbors(2, 1));
        assert!(!map.are_neighbors(1, 3));
    }

    #[test]
    fn neighbor_lists_sorted_and_deduped() {
        let mut map = NeighborMap::new();
        map.add_border(1, 5);
        map.add_border(1, 3);
        map.add_border(1, 5);
        assert_eq!(map.neighbors(1), &[3, 5]);
    }

    #[test]
    fn unknown_country_has_no_neighbors() {
        let map = NeighborMap::new();
        assert!(map.neighbors(42).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot border itself")]
    fn self_border_panics() {
        let mut map = NeighborMap::new();
        map.add_border(1, 1);
    }
}
