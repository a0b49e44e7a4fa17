use rand::Rng;
use rand::RngCore;

use crate::model::{BranchIndustry, CountryProfile, Regime, Stance, World};

use super::config::WorldGenConfig;
use super::names::generate_unique_country_name;

const REGIMES: [Regime; 5] = [
    Regime::Democracy,
    Regime::Monarchy,
    Regime::MilitaryJunta,
    Regime::OneParty,
    Regime::Theocracy,
];

fn random_tier(rng: &mut dyn RngCore) -> u8 {
    rng.random_range(1..=5)
}

fn random_branch(rng: &mut dyn RngCore) -> BranchIndustry {
    BranchIndustry::new(random_tier(rng), random_tier(rng))
}

fn random_stance(rng: &mut dyn RngCore, config: &WorldGenConfig) -> Stance {
    if rng.random_range(0..100) < config.expansionist_percent {
        return Stance::Expansionist;
    }
    match rng.random_range(0..3) {
        0 => Stance::Defensive,
        1 => Stance::Neutral,
        _ => Stance::Isolationist,
    }
}

/// Generate countries with random profiles and a connected border graph.
pub fn generate_countries(world: &mut World, config: &WorldGenConfig, rng: &mut dyn RngCore) {
    let mut ids = Vec::with_capacity(config.num_countries as usize);
    for _ in 0..config.num_countries {
        let name = generate_unique_country_name(world, rng);
        let profile = CountryProfile {
            budget_tier: random_tier(rng),
            corruption: random_tier(rng),
            visibility: random_tier(rng),
            standards: random_tier(rng),
            regime: REGIMES[rng.random_range(0..REGIMES.len())],
            stance: random_stance(rng, config),
            army: random_branch(rng),
            navy: random_branch(rng),
            air_force: random_branch(rng),
        };
        ids.push(world.add_country(name, profile));
    }

    // Chain keeps the map connected; extras thicken the graph.
    for pair in ids.windows(2) {
        world.add_border(pair[0], pair[1]);
    }
    if ids.len() >= 3 {
        let extras = (ids.len() as f64 * config.extra_border_fraction) as u32;
        for _ in 0..extras {
            let a = ids[rng.random_range(0..ids.len())];
            let b = ids[rng.random_range(0..ids.len())];
            if a != b {
                world.add_border(a, b);
            }
        }
    }
}
