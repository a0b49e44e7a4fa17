use serde::{Deserialize, Serialize};

use super::timestamp::GameDate;

/// A war between two countries. Inactive records stay in the ledger
/// as history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct War {
    pub aggressor: u64,
    pub defender: u64,
    pub started: GameDate,
    pub active: bool,
}

impl War {
    pub fn new(aggressor: u64, defender: u64, started: GameDate) -> Self {
        assert!(
            aggressor != defender,
            "war: country {aggressor} cannot declare war on itself"
        );
        Self {
            aggressor,
            defender,
            started,
            active: true,
        }
    }

    /// Whether the given country is on either side of this war.
    pub fn involves(&self, country: u64) -> bool {
        self.aggressor == country || self.defender == country
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involves_both_sides() {
        let war = War::new(1, 2, GameDate::from_year(0));
        assert!(war.involves(1));
        assert!(war.involves(2));
        assert!(!war.involves(3));
        assert!(war.active);
    }

    #[test]
    #[should_panic(expected = "cannot declare war on itself")]
    fn self_war_panics() {
        War::new(4, 4, GameDate::from_year(0));
    }
}
