use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the arms market surface: catalog lookups and stock
/// commands that a correct caller would have pre-validated.
#[derive(Debug, Error, PartialEq)]
pub enum MarketError {
    #[error("unknown arms definition: {0}")]
    UnknownDefinition(u64),
    #[error("cannot merge stocks of different definitions ({0} vs {1})")]
    DefinitionMismatch(u64, u64),
    #[error("invalid quantity {requested} (held: {held})")]
    InvalidQuantity { requested: u32, held: u32 },
}

/// Broad category of tradable hardware. Finer classification goes
/// through free-form subcategory tags on the definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmsCategory {
    SmallArms,
    Artillery,
    Armor,
    AirDefense,
    CombatAircraft,
    Helicopters,
    NavalVessels,
    Missiles,
    Electronics,
    Ammunition,
}

/// Category-specific quality attributes, each 0–100.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    pub firepower: u8,
    pub reliability: u8,
    pub mobility: u8,
    pub technology: u8,
}

impl QualityProfile {
    pub fn new(firepower: u8, reliability: u8, mobility: u8, technology: u8) -> Self {
        let profile = Self {
            firepower,
            reliability,
            mobility,
            technology,
        };
        for value in [firepower, reliability, mobility, technology] {
            assert!(value <= 100, "quality attribute out of range: {value}");
        }
        profile
    }

    /// Flat quality score across all attributes, 0–100.
    pub fn average(&self) -> f64 {
        (self.firepower as f64
            + self.reliability as f64
            + self.mobility as f64
            + self.technology as f64)
            / 4.0
    }

    /// Value multiplier derived from average quality, in [0.5, 1.5].
    pub fn multiplier(&self) -> f64 {
        0.5 + self.average() / 100.0
    }
}

/// Immutable definition of a tradable item. Loaded once at startup;
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmsDefinition {
    pub id: u64,
    pub name: String,
    pub category: ArmsCategory,
    /// Free-form subcategory tags, e.g. "anti-tank", "guided".
    pub tags: BTreeSet<String>,
    pub manufacturer: String,
    /// Base price per unit, in thousands.
    pub base_price: f64,
    pub quality: QualityProfile,
    /// Shipping weight per unit, in tonnes, where it matters.
    pub unit_weight: Option<f64>,
    /// Minimum facility tech level needed to produce or service this.
    pub required_tech_level: Option<u8>,
}

/// Read-only lookup of arms definitions.
///
/// Explicitly constructed and passed by reference to whatever needs
/// lookups, so tests can run against small fixture catalogs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmsCatalog {
    definitions: BTreeMap<u64, ArmsDefinition>,
}

impl ArmsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition at startup. Duplicate ids are a data bug.
    pub fn insert(&mut self, definition: ArmsDefinition) {
        let previous = self.definitions.insert(definition.id, definition);
        assert!(
            previous.is_none(),
            "catalog: duplicate definition id {}",
            previous.unwrap().id
        );
    }

    pub fn get(&self, id: u64) -> Option<&ArmsDefinition> {
        self.definitions.get(&id)
    }

    /// Lookup that treats absence as a caller bug (e.g. constructing a
    /// stock against a definition that was never loaded).
    pub fn definition(&self, id: u64) -> Result<&ArmsDefinition, MarketError> {
        self.definitions
            .get(&id)
            .ok_or(MarketError::UnknownDefinition(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArmsDefinition> {
        self.definitions.values()
    }

    pub fn in_category(&self, category: ArmsCategory) -> Vec<&ArmsDefinition> {
        self.definitions
            .values()
            .filter(|d| d.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn rifle(id: u64) -> ArmsDefinition {
        ArmsDefinition {
            id,
            name: "KR-7 battle rifle".to_string(),
            category: ArmsCategory::SmallArms,
            tags: ["infantry".to_string(), "7.62mm".to_string()].into(),
            manufacturer: "Koval Arms".to_string(),
            base_price: 1.2,
            quality: QualityProfile::new(60, 80, 70, 50),
            unit_weight: Some(0.004),
            required_tech_level: None,
        }
    }

    #[test]
    fn quality_multiplier_range() {
        let zero = QualityProfile::new(0, 0, 0, 0);
        let top = QualityProfile::new(100, 100, 100, 100);
        assert_eq!(zero.multiplier(), 0.5);
        assert_eq!(top.multiplier(), 1.5);
        // Average 70 lands at 1.2.
        let good = QualityProfile::new(70, 70, 70, 70);
        assert!((good.multiplier() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn lookup_hits_and_misses() {
        let mut catalog = ArmsCatalog::new();
        catalog.insert(rifle(1));
        assert!(catalog.get(1).is_some());
        assert!(catalog.get(2).is_none());
        assert_eq!(
            catalog.definition(2).unwrap_err(),
            MarketError::UnknownDefinition(2)
        );
    }

    #[test]
    fn category_filter() {
        let mut catalog = ArmsCatalog::new();
        catalog.insert(rifle(1));
        let mut tank = rifle(2);
        tank.category = ArmsCategory::Armor;
        catalog.insert(tank);
        assert_eq!(catalog.in_category(ArmsCategory::SmallArms).len(), 1);
        assert_eq!(catalog.in_category(ArmsCategory::Missiles).len(), 0);
    }

    #[test]
    #[should_panic(expected = "duplicate definition id")]
    fn duplicate_id_panics() {
        let mut catalog = ArmsCatalog::new();
        catalog.insert(rifle(1));
        catalog.insert(rifle(1));
    }

    #[test]
    #[should_panic(expected = "quality attribute out of range")]
    fn quality_over_100_panics() {
        QualityProfile::new(101, 0, 0, 0);
    }
}
