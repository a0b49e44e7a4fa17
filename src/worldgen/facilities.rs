use rand::Rng;
use rand::RngCore;

use crate::model::{FacilityKind, World};

use super::config::WorldGenConfig;
use super::names::generate_facility_name;

const KINDS: [FacilityKind; 11] = [
    FacilityKind::SmallArms,
    FacilityKind::Artillery,
    FacilityKind::Armor,
    FacilityKind::Aerospace,
    FacilityKind::Rotorcraft,
    FacilityKind::Naval,
    FacilityKind::Missiles,
    FacilityKind::Electronics,
    FacilityKind::Optics,
    FacilityKind::Propulsion,
    FacilityKind::Munitions,
];

/// Scatter research facilities across the generated countries.
/// Starting tech levels sit in the lower-middle band so upgrades stay
/// meaningful.
pub fn generate_facilities(world: &mut World, config: &WorldGenConfig, rng: &mut dyn RngCore) {
    debug_assert!(
        !world.countries.is_empty(),
        "facilities step requires countries to exist"
    );
    let country_ids: Vec<u64> = world.countries.keys().copied().collect();

    for _ in 0..config.num_facilities {
        let name = generate_facility_name(rng);
        let location = country_ids[rng.random_range(0..country_ids.len())];
        let kind = KINDS[rng.random_range(0..KINDS.len())];
        let tech_level = rng.random_range(1..=6);
        world.add_facility(name, location, kind, tech_level);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::ArmsCatalog;
    use crate::worldgen::countries::generate_countries;

    #[test]
    fn facilities_start_idle_in_known_countries() {
        let mut world = World::new(ArmsCatalog::new());
        let config = WorldGenConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        generate_countries(&mut world, &config, &mut rng);
        generate_facilities(&mut world, &config, &mut rng);

        assert_eq!(world.facilities.len(), config.num_facilities as usize);
        for facility in world.facilities.values() {
            assert!(world.countries.contains_key(&facility.location));
            assert!(facility.is_idle());
            assert!((1..=6).contains(&facility.tech_level));
        }
    }
}
