use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::*;
use crate::scenario::Scenario;
use crate::sim::{
    ResearchSystem, Signal, SignalKind, SimConfig, SimSystem, TickContext, WarSystem, run,
};

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run a single system tick on the given turn. Returns emitted signals.
pub fn tick_system(
    world: &mut World,
    system: &mut dyn SimSystem,
    turn: u32,
    seed: u64,
) -> Vec<Signal> {
    tick_system_at(world, system, GameDate::from_turn(turn), seed)
}

/// Run a single system tick at a specific date. Returns emitted signals.
pub fn tick_system_at(
    world: &mut World,
    system: &mut dyn SimSystem,
    date: GameDate,
    seed: u64,
) -> Vec<Signal> {
    world.current_date = date;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        signals: &mut signals,
        inbox: &[],
    };
    system.tick(&mut ctx);
    signals
}

/// Run a system's handle_signals with the given inbox. Returns newly emitted signals.
pub fn deliver_signals(
    world: &mut World,
    system: &mut dyn SimSystem,
    inbox: &[Signal],
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        signals: &mut signals,
        inbox,
    };
    system.handle_signals(&mut ctx);
    signals
}

/// Run multiple months using the standard simulation loop.
pub fn run_months(world: &mut World, systems: &mut [Box<dyn SimSystem>], months: u32, seed: u64) {
    let start = world.current_date;
    run(world, systems, SimConfig::new(start, months, seed));
}

// ---------------------------------------------------------------------------
// System set constructors
// ---------------------------------------------------------------------------

/// All systems in canonical tick order.
pub fn all_systems() -> Vec<Box<dyn SimSystem>> {
    vec![Box::new(WarSystem::new()), Box::new(ResearchSystem::new())]
}

// ---------------------------------------------------------------------------
// Signal helpers
// ---------------------------------------------------------------------------

pub fn has_signal(signals: &[Signal], predicate: impl Fn(&SignalKind) -> bool) -> bool {
    signals.iter().any(|s| predicate(&s.kind))
}

pub fn count_signals(signals: &[Signal], predicate: impl Fn(&SignalKind) -> bool) -> usize {
    signals.iter().filter(|s| predicate(&s.kind)).count()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert two floats are within tolerance, with a readable failure message.
pub fn assert_approx(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{msg}: expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Assert two worlds reached identical observable state — same
/// countries, wars, directors, facilities, and stocks. Used for
/// same-seed determinism checks.
pub fn assert_deterministic(a: &World, b: &World) {
    assert_eq!(a.current_date, b.current_date, "dates diverged");
    assert_eq!(a.countries, b.countries, "countries diverged");
    assert_eq!(a.wars, b.wars, "wars diverged");
    assert_eq!(a.directors, b.directors, "directors diverged");
    assert_eq!(a.facilities, b.facilities, "facilities diverged");
    assert_eq!(a.stocks, b.stocks, "stocks diverged");
}

// ---------------------------------------------------------------------------
// Catalog fixtures
// ---------------------------------------------------------------------------

/// Small fixture catalog: a rifle (id 1), a tank (id 2), and a
/// guided missile (id 3).
pub fn fixture_catalog() -> ArmsCatalog {
    let mut catalog = ArmsCatalog::new();
    catalog.insert(ArmsDefinition {
        id: 1,
        name: "KR-7 battle rifle".to_string(),
        category: ArmsCategory::SmallArms,
        tags: ["infantry".to_string(), "7.62mm".to_string()].into(),
        manufacturer: "Koval Arms".to_string(),
        base_price: 1.2,
        quality: QualityProfile::new(60, 80, 70, 50),
        unit_weight: Some(0.004),
        required_tech_level: None,
    });
    catalog.insert(ArmsDefinition {
        id: 2,
        name: "T-70 main battle tank".to_string(),
        category: ArmsCategory::Armor,
        tags: ["tracked".to_string(), "125mm".to_string()].into(),
        manufacturer: "Uralmash".to_string(),
        base_price: 1800.0,
        quality: QualityProfile::new(70, 70, 70, 70),
        unit_weight: Some(41.5),
        required_tech_level: Some(4),
    });
    catalog.insert(ArmsDefinition {
        id: 3,
        name: "Spear-9 guided missile".to_string(),
        category: ArmsCategory::Missiles,
        tags: ["guided".to_string(), "anti-tank".to_string()].into(),
        manufacturer: "Valtec Dynamics".to_string(),
        base_price: 95.0,
        quality: QualityProfile::new(85, 75, 60, 90),
        unit_weight: Some(0.03),
        required_tech_level: Some(6),
    });
    catalog
}

// ---------------------------------------------------------------------------
// Pre-built scenarios
// ---------------------------------------------------------------------------

pub struct BorderSetup {
    pub world: World,
    pub aggressor: u64,
    pub target: u64,
    pub bystander: u64,
}

/// One expansionist power bordering a weaker neighbor, plus a strong
/// defensive bystander. Useful for war-ledger tests.
pub fn border_scenario() -> BorderSetup {
    let mut s = Scenario::new();
    let aggressor = s
        .country("Velastra")
        .budget_tier(5)
        .stance(Stance::Expansionist)
        .industry(4, 4)
        .id();
    let target = s.country("Orvane").budget_tier(2).industry(2, 2).id();
    let bystander = s
        .country("Kestran")
        .budget_tier(5)
        .stance(Stance::Defensive)
        .industry(5, 5)
        .id();
    s.border(aggressor, target);
    s.border(aggressor, bystander);
    BorderSetup {
        world: s.build(),
        aggressor,
        target,
        bystander,
    }
}

pub struct LabSetup {
    pub world: World,
    pub country: u64,
    pub facility: u64,
    pub director: u64,
}

/// A hired director running a mid-tier missile lab. Useful for
/// research-engine tests.
pub fn lab_scenario(traits: Vec<DirectorTrait>) -> LabSetup {
    let mut s = Scenario::new();
    let country = s.country("Zanheria").id();
    let director = s
        .director("Dr. Okafor")
        .traits(traits)
        .hired(HireTier::Vetted)
        .id();
    let facility = s
        .facility("Site 4", country)
        .kind(FacilityKind::Missiles)
        .tech_level(5)
        .director(director)
        .id();
    LabSetup {
        world: s.build(),
        country,
        facility,
        director,
    }
}

/// A moderately hard, moderately noisy project definition.
pub fn standard_project() -> ProjectSpec {
    ProjectSpec {
        name: "Seeker head refresh".to_string(),
        base_cost: 100_000.0,
        complexity: Complexity::Moderate,
        unpredictability: Unpredictability::Steady,
        required_tech_level: None,
    }
}
