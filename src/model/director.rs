use serde::{Deserialize, Serialize};

use super::facility::Complexity;
use super::timestamp::GameDate;

/// Months after a blind hire before personality traits surface.
pub const TRAIT_REVEAL_MONTHS: u32 = 12;

/// Personality traits a director can carry (1–3 per director).
/// Each maps to a fixed effect fragment; see [`DirectorTrait::effects`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorTrait {
    /// Squeezes budgets hard, at some cost in pace.
    Stingy,
    /// Supplier connections discount project launches.
    Networked,
    /// Slow and careful; smooths out monthly swings.
    Meticulous,
    /// Chases risky ideas with a real chance of a breakthrough month.
    Maverick,
    /// Drives the lab hard; faster but burns more cash monthly.
    Workhorse,
    /// Trims running costs.
    Frugal,
    /// Tracks progress well enough to project completion dates.
    Forecaster,
    /// Decades in the field: steadier months and reliable projections.
    Veteran,
    /// Bets big on long shots.
    Gambler,
    /// Pushes the facility beyond its nominal tech gate.
    Visionary,
}

pub const TRAIT_CATALOG: [DirectorTrait; 10] = [
    DirectorTrait::Stingy,
    DirectorTrait::Networked,
    DirectorTrait::Meticulous,
    DirectorTrait::Maverick,
    DirectorTrait::Workhorse,
    DirectorTrait::Frugal,
    DirectorTrait::Forecaster,
    DirectorTrait::Veteran,
    DirectorTrait::Gambler,
    DirectorTrait::Visionary,
];

/// One trait's contribution. `None` means "this trait says nothing
/// about that field" and leaves the fold untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EffectFragment {
    pub cost_modifier: Option<f64>,
    pub launch_cost_modifier: Option<f64>,
    pub monthly_cost_modifier: Option<f64>,
    pub time_modifier: Option<f64>,
    pub unpredictability_modifier: Option<f64>,
    pub breakthrough_chance: Option<f64>,
    pub can_estimate_time: Option<bool>,
    pub ignores_tech_gate: Option<bool>,
}

impl DirectorTrait {
    /// Fixed effect table. Numbers are balance data, not tuned here.
    pub fn effects(self) -> EffectFragment {
        match self {
            DirectorTrait::Stingy => EffectFragment {
                cost_modifier: Some(0.7),
                time_modifier: Some(1.15),
                ..Default::default()
            },
            DirectorTrait::Networked => EffectFragment {
                launch_cost_modifier: Some(0.85),
                ..Default::default()
            },
            DirectorTrait::Meticulous => EffectFragment {
                time_modifier: Some(1.25),
                unpredictability_modifier: Some(0.6),
                ..Default::default()
            },
            DirectorTrait::Maverick => EffectFragment {
                breakthrough_chance: Some(0.10),
                unpredictability_modifier: Some(1.4),
                ..Default::default()
            },
            DirectorTrait::Workhorse => EffectFragment {
                time_modifier: Some(0.85),
                monthly_cost_modifier: Some(1.1),
                ..Default::default()
            },
            DirectorTrait::Frugal => EffectFragment {
                monthly_cost_modifier: Some(0.8),
                ..Default::default()
            },
            DirectorTrait::Forecaster => EffectFragment {
                can_estimate_time: Some(true),
                ..Default::default()
            },
            DirectorTrait::Veteran => EffectFragment {
                unpredictability_modifier: Some(0.75),
                can_estimate_time: Some(true),
                ..Default::default()
            },
            DirectorTrait::Gambler => EffectFragment {
                breakthrough_chance: Some(0.15),
                cost_modifier: Some(1.1),
                ..Default::default()
            },
            DirectorTrait::Visionary => EffectFragment {
                ignores_tech_gate: Some(true),
                cost_modifier: Some(1.2),
                ..Default::default()
            },
        }
    }
}

/// Combined effects of a director's full trait set.
///
/// Folding law: numeric fields contributed by more than one trait are
/// multiplied together; capability flags are last-write-wins in trait
/// order. The combination rule lives only in [`fold_effects`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraitEffects {
    pub cost_modifier: f64,
    pub launch_cost_modifier: f64,
    pub monthly_cost_modifier: f64,
    pub time_modifier: f64,
    pub unpredictability_modifier: f64,
    pub breakthrough_chance: f64,
    pub can_estimate_time: bool,
    pub ignores_tech_gate: bool,
}

impl Default for TraitEffects {
    fn default() -> Self {
        Self {
            cost_modifier: 1.0,
            launch_cost_modifier: 1.0,
            monthly_cost_modifier: 1.0,
            time_modifier: 1.0,
            unpredictability_modifier: 1.0,
            breakthrough_chance: 0.0,
            can_estimate_time: false,
            ignores_tech_gate: false,
        }
    }
}

fn fold_numeric(acc: &mut Option<f64>, fragment: Option<f64>) {
    if let Some(value) = fragment {
        *acc = Some(match *acc {
            Some(existing) => existing * value,
            None => value,
        });
    }
}

/// Fold an ordered list of fragments into combined effects.
pub fn fold_effects(fragments: impl IntoIterator<Item = EffectFragment>) -> TraitEffects {
    let mut cost = None;
    let mut launch = None;
    let mut monthly = None;
    let mut time = None;
    let mut unpredictability = None;
    let mut breakthrough = None;
    let mut estimate = None;
    let mut tech_gate = None;

    for fragment in fragments {
        fold_numeric(&mut cost, fragment.cost_modifier);
        fold_numeric(&mut launch, fragment.launch_cost_modifier);
        fold_numeric(&mut monthly, fragment.monthly_cost_modifier);
        fold_numeric(&mut time, fragment.time_modifier);
        fold_numeric(&mut unpredictability, fragment.unpredictability_modifier);
        fold_numeric(&mut breakthrough, fragment.breakthrough_chance);
        if fragment.can_estimate_time.is_some() {
            estimate = fragment.can_estimate_time;
        }
        if fragment.ignores_tech_gate.is_some() {
            tech_gate = fragment.ignores_tech_gate;
        }
    }

    TraitEffects {
        cost_modifier: cost.unwrap_or(1.0),
        launch_cost_modifier: launch.unwrap_or(1.0),
        monthly_cost_modifier: monthly.unwrap_or(1.0),
        time_modifier: time.unwrap_or(1.0),
        unpredictability_modifier: unpredictability.unwrap_or(1.0),
        breakthrough_chance: breakthrough.unwrap_or(0.0),
        can_estimate_time: estimate.unwrap_or(false),
        ignores_tech_gate: tech_gate.unwrap_or(false),
    }
}

/// Star ratings, 1–5 each.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRatings {
    pub talent: u8,
    pub morality: u8,
    pub expertise: u8,
    pub management: u8,
}

impl StarRatings {
    pub fn new(talent: u8, morality: u8, expertise: u8, management: u8) -> Self {
        for value in [talent, morality, expertise, management] {
            debug_assert!((1..=5).contains(&value), "star rating out of range: {value}");
        }
        Self {
            talent,
            morality,
            expertise,
            management,
        }
    }
}

/// Hiring terms. Blind hires are cheaper but traits stay hidden for
/// the first year of employment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HireTier {
    /// Full background check: traits known at signing.
    Vetted,
    /// Discount hire: traits revealed 12 months in.
    Blind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Employment {
    Unemployed,
    Assigned { facility_id: u64 },
}

/// A hire-able research specialist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResearchDirector {
    pub id: u64,
    pub name: String,
    pub nationality: String,
    pub traits: Vec<DirectorTrait>,
    pub stars: StarRatings,
    /// Monthly salary, in thousands.
    pub salary: f64,
    pub employment: Employment,
    pub hire_tier: HireTier,
    pub hired: Option<GameDate>,
    pub traits_revealed: bool,
    pub completed_projects: u32,
}

impl ResearchDirector {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        nationality: impl Into<String>,
        traits: Vec<DirectorTrait>,
        stars: StarRatings,
        salary: f64,
    ) -> Self {
        assert!(
            (1..=3).contains(&traits.len()),
            "director must carry 1-3 traits, got {}",
            traits.len()
        );
        Self {
            id,
            name: name.into(),
            nationality: nationality.into(),
            traits,
            stars,
            salary,
            employment: Employment::Unemployed,
            hire_tier: HireTier::Vetted,
            hired: None,
            traits_revealed: true,
            completed_projects: 0,
        }
    }

    /// Record the hire. Blind hires start with traits hidden; the
    /// research system reveals them after [`TRAIT_REVEAL_MONTHS`].
    pub fn mark_hired(&mut self, tier: HireTier, date: GameDate) {
        self.hire_tier = tier;
        self.hired = Some(date);
        self.traits_revealed = tier == HireTier::Vetted;
    }

    pub fn is_available(&self) -> bool {
        self.employment == Employment::Unemployed
    }

    /// Fold the trait set into one combined effect record.
    pub fn trait_effects(&self) -> TraitEffects {
        fold_effects(self.traits.iter().map(|t| t.effects()))
    }

    /// Launch cost for a project with the given base cost:
    /// `floor(base × cost × launch_cost)`.
    pub fn project_cost(&self, base_cost: f64) -> f64 {
        let effects = self.trait_effects();
        (base_cost * effects.cost_modifier * effects.launch_cost_modifier).floor()
    }

    /// Monthly running cost: `floor(base × monthly × management)`.
    ///
    /// Management stars above the project's complexity tier shave 20%
    /// per surplus star; stars below add 30% per missing star.
    pub fn monthly_cost(&self, base_monthly: f64, complexity: Complexity) -> f64 {
        let effects = self.trait_effects();
        let management = self.stars.management as i32;
        let tier = complexity.tier() as i32;
        let management_modifier = if management >= tier {
            1.0 - 0.2 * (management - tier) as f64
        } else {
            1.0 + 0.3 * (tier - management) as f64
        }
        .max(0.0);
        (base_monthly * effects.monthly_cost_modifier * management_modifier).floor()
    }

    /// Expected project duration in months:
    /// `ceil(base × time × (1 − (talent−3)×0.1))`.
    pub fn project_time(&self, base_months: u32) -> u32 {
        let effects = self.trait_effects();
        let talent_modifier = 1.0 - (self.stars.talent as f64 - 3.0) * 0.1;
        (base_months as f64 * effects.time_modifier * talent_modifier).ceil() as u32
    }
}
