use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Political stance driving macro behavior. Only `Expansionist`
/// countries seek war targets during initialization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Expansionist,
    Defensive,
    Neutral,
    Isolationist,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Democracy,
    Monarchy,
    MilitaryJunta,
    OneParty,
    Theocracy,
}

/// Military service branch. Industrial capability is rated per branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Army,
    Navy,
    AirForce,
}

pub const BRANCHES: [Branch; 3] = [Branch::Army, Branch::Navy, Branch::AirForce];

/// Industrial ratings for a single branch, both on the shared 1–5 scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchIndustry {
    pub production: u8,
    pub technology: u8,
}

impl BranchIndustry {
    pub fn new(production: u8, technology: u8) -> Self {
        debug_assert!((1..=5).contains(&production), "production out of range");
        debug_assert!((1..=5).contains(&technology), "technology out of range");
        Self {
            production,
            technology,
        }
    }
}

/// Starting attributes fixed at world creation. Gameplay never mutates
/// these; dynamic values live in [`CountryState`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Defense budget tier, 1–5.
    pub budget_tier: u8,
    /// Corruption level, 1–5 (higher is more corrupt).
    pub corruption: u8,
    /// International visibility / scrutiny, 1–5.
    pub visibility: u8,
    /// Procurement standards, 1–5 (higher demands better goods).
    pub standards: u8,
    pub regime: Regime,
    pub stance: Stance,
    pub army: BranchIndustry,
    pub navy: BranchIndustry,
    pub air_force: BranchIndustry,
}

/// Dynamic country state mutated during play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryState {
    /// Current budget tier, 1–5. Starts at the profile tier and may
    /// shift with economic events.
    pub budget: u8,
    /// Liquid treasury funds, in millions.
    pub funds: f64,
    /// Internal stability, 0.0–1.0.
    pub stability: f64,
    pub at_war: bool,
    /// Countries this one is currently at war with.
    pub enemies: BTreeSet<u64>,
}

/// A nation-state participating in the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u64,
    pub name: String,
    pub profile: CountryProfile,
    pub state: CountryState,
}

impl Country {
    pub fn new(id: u64, name: impl Into<String>, profile: CountryProfile) -> Self {
        let state = CountryState {
            budget: profile.budget_tier,
            funds: profile.budget_tier as f64 * 1000.0,
            stability: 0.7,
            at_war: false,
            enemies: BTreeSet::new(),
        };
        Self {
            id,
            name: name.into(),
            profile,
            state,
        }
    }

    fn branches(&self) -> [BranchIndustry; 3] {
        [self.profile.army, self.profile.navy, self.profile.air_force]
    }

    /// Mean production rating across the three branches.
    pub fn avg_production(&self) -> f64 {
        let sum: u32 = self.branches().iter().map(|b| b.production as u32).sum();
        sum as f64 / 3.0
    }

    /// Mean technology rating across the three branches.
    pub fn avg_technology(&self) -> f64 {
        let sum: u32 = self.branches().iter().map(|b| b.technology as u32).sum();
        sum as f64 / 3.0
    }

    /// Derived military power. Recomputed from current attributes on
    /// every call so it can never go stale against a mutated budget.
    /// Shared by war targeting and any display layer; do not duplicate
    /// the formula elsewhere.
    pub fn military_power(&self) -> f64 {
        self.state.budget as f64 * 2.0 + self.avg_production() + self.avg_technology()
    }

    pub fn industry(&self, branch: Branch) -> BranchIndustry {
        match branch {
            Branch::Army => self.profile.army,
            Branch::Navy => self.profile.navy,
            Branch::AirForce => self.profile.air_force,
        }
    }

    pub fn is_expansionist(&self) -> bool {
        self.profile.stance == Stance::Expansionist
    }
}
