use rand::Rng;
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::model::StarRatings;
use crate::model::director::TRAIT_CATALOG;
use crate::model::World;

use super::config::WorldGenConfig;
use super::names::generate_director_name;

fn random_star(rng: &mut dyn RngCore) -> u8 {
    rng.random_range(1..=5)
}

/// Generate the starting pool of hire-able directors.
///
/// Each carries 1–3 distinct traits and a salary scaled off talent and
/// expertise. Nationalities are drawn from the generated countries.
pub fn generate_directors(world: &mut World, config: &WorldGenConfig, rng: &mut dyn RngCore) {
    debug_assert!(
        !world.countries.is_empty(),
        "directors step requires countries to exist"
    );
    let nationalities: Vec<String> = world.countries.values().map(|c| c.name.clone()).collect();

    for _ in 0..config.num_directors {
        let name = generate_director_name(rng);
        let nationality = nationalities[rng.random_range(0..nationalities.len())].clone();

        let mut pool = TRAIT_CATALOG.to_vec();
        pool.shuffle(rng);
        pool.truncate(rng.random_range(1..=3));

        let stars = StarRatings::new(
            random_star(rng),
            random_star(rng),
            random_star(rng),
            random_star(rng),
        );
        let salary = 20.0 + (stars.talent + stars.expertise) as f64 * 5.0;

        world.add_director(name, nationality, pool, stars, salary);
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
    fn directors_carry_one_to_three_distinct_traits() {
        let mut world = World::new(ArmsCatalog::new());
        let config = WorldGenConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        generate_countries(&mut world, &config, &mut rng);
        generate_directors(&mut world, &config, &mut rng);

        assert_eq!(world.directors.len(), config.num_directors as usize);
        for director in world.directors.values() {
            assert!((1..=3).contains(&director.traits.len()));
            let mut deduped = director.traits.clone();
            deduped.dedup();
            assert_eq!(deduped.len(), director.traits.len());
            assert!(director.is_available());
            assert!(director.hired.is_none());
        }
    }
}
