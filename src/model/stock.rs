use serde::{Deserialize, Serialize};

use super::catalog::{ArmsCatalog, MarketError};
use super::timestamp::GameDate;

/// Physical condition of a stock item: strict six-step ordered scale.
/// Condition only ever moves one step at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
    Salvage,
}

impl Condition {
    /// Value multiplier applied to base price.
    pub fn multiplier(self) -> f64 {
        match self {
            Condition::New => 1.2,
            Condition::Excellent => 1.0,
            Condition::Good => 0.8,
            Condition::Fair => 0.6,
            Condition::Poor => 0.4,
            Condition::Salvage => 0.2,
        }
    }

    /// One step worse, or `None` at the bottom of the scale.
    pub fn worse(self) -> Option<Condition> {
        match self {
            Condition::New => Some(Condition::Excellent),
            Condition::Excellent => Some(Condition::Good),
            Condition::Good => Some(Condition::Fair),
            Condition::Fair => Some(Condition::Poor),
            Condition::Poor => Some(Condition::Salvage),
            Condition::Salvage => None,
        }
    }

    /// One step better, or `None` at the top of the scale.
    pub fn better(self) -> Option<Condition> {
        match self {
            Condition::New => None,
            Condition::Excellent => Some(Condition::New),
            Condition::Good => Some(Condition::Excellent),
            Condition::Fair => Some(Condition::Good),
            Condition::Poor => Some(Condition::Fair),
            Condition::Salvage => Some(Condition::Poor),
        }
    }
}

/// How a stock stack was acquired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    FactoryOrder,
    Surplus,
    BlackMarket,
    Captured,
    Salvaged,
}

/// A player-owned stack of one catalog item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmsStock {
    pub id: u64,
    pub definition_id: u64,
    pub quantity: u32,
    /// Price paid per unit, in thousands.
    pub purchase_price: f64,
    pub condition: Condition,
    pub provenance: Provenance,
    pub acquired: GameDate,
    pub modified: GameDate,
}

impl ArmsStock {
    /// Create a stack against a known catalog definition. Fails if the
    /// definition was never loaded.
    pub fn new(
        id: u64,
        catalog: &ArmsCatalog,
        definition_id: u64,
        quantity: u32,
        purchase_price: f64,
        condition: Condition,
        provenance: Provenance,
        acquired: GameDate,
    ) -> Result<Self, MarketError> {
        catalog.definition(definition_id)?;
        Ok(Self {
            id,
            definition_id,
            quantity,
            purchase_price,
            condition,
            provenance,
            acquired,
            modified: acquired,
        })
    }

    /// Current market value of the whole stack:
    /// base price × quantity × condition multiplier × quality multiplier.
    ///
    /// # Panics
    /// Panics if the stack's definition is missing from the catalog —
    /// the stack was constructed against it.
    pub fn current_market_value(&self, catalog: &ArmsCatalog) -> f64 {
        let definition = catalog.definition(self.definition_id).unwrap_or_else(|_| {
            panic!(
                "stock {}: definition {} missing from catalog",
                self.id, self.definition_id
            )
        });
        definition.base_price
            * self.quantity as f64
            * self.condition.multiplier()
            * definition.quality.multiplier()
    }

    /// Market value minus what was paid for the remaining units.
    pub fn potential_profit(&self, catalog: &ArmsCatalog) -> f64 {
        self.current_market_value(catalog) - self.quantity as f64 * self.purchase_price
    }

    /// Sell up to `quantity` units at the stack's current per-unit market
    /// value. Over-asks are clamped to what is held. Returns proceeds.
    ///
    /// The per-unit price is the whole stack's value divided by its
    /// quantity, so partial sales realize whatever the stack is worth at
    /// its current condition, not the original purchase price.
    pub fn sell(&mut self, quantity: u32, catalog: &ArmsCatalog) -> f64 {
        if self.quantity == 0 || quantity == 0 {
            return 0.0;
        }
        let sold = quantity.min(self.quantity);
        let price_per_unit = self.current_market_value(catalog) / self.quantity as f64;
        self.quantity -= sold;
        sold as f64 * price_per_unit
    }

    /// Split off `quantity` units into a new sibling stack carrying the
    /// same price, condition, and provenance. The sibling takes `new_id`.
    pub fn split(&mut self, quantity: u32, new_id: u64) -> Result<ArmsStock, MarketError> {
        if quantity == 0 || quantity >= self.quantity {
            return Err(MarketError::InvalidQuantity {
                requested: quantity,
                held: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(ArmsStock {
            id: new_id,
            quantity,
            ..self.clone()
        })
    }

    /// Absorb another stack of the same definition. Purchase price
    /// becomes the quantity-weighted average; condition becomes the
    /// worse of the two.
    pub fn merge(&mut self, other: &ArmsStock) -> Result<(), MarketError> {
        if other.definition_id != self.definition_id {
            return Err(MarketError::DefinitionMismatch(
                self.definition_id,
                other.definition_id,
            ));
        }
        let total = self.quantity + other.quantity;
        if total > 0 {
            self.purchase_price = (self.quantity as f64 * self.purchase_price
                + other.quantity as f64 * other.purchase_price)
                / total as f64;
        }
        self.quantity = total;
        // Condition ordering runs New < ... < Salvage, so max is worse.
        self.condition = self.condition.max(other.condition);
        Ok(())
    }

    /// Degrade one condition step. Returns false (no-op) at Salvage.
    pub fn degrade_condition(&mut self) -> bool {
        match self.condition.worse() {
            Some(next) => {
                self.condition = next;
                true
            }
            None => false,
        }
    }

    /// Improve one condition step. Returns false (no-op) at New.
    pub fn improve_condition(&mut self) -> bool {
        match self.condition.better() {
            Some(next) => {
                self.condition = next;
                true
            }
            None => false,
        }
    }

    /// Whether this stack can satisfy a requirement: non-empty, carries
    /// every requested tag, and meets the minimum average quality.
    pub fn can_fulfill_requirement(
        &self,
        tags: &[&str],
        min_quality: f64,
        catalog: &ArmsCatalog,
    ) -> bool {
        if self.quantity == 0 {
            return false;
        }
        let Some(definition) = catalog.get(self.definition_id) else {
            return false;
        };
        tags.iter().all(|tag| definition.tags.contains(*tag))
            && definition.quality.average() >= min_quality
    }
}
