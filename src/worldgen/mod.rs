pub mod catalog;
pub mod config;
pub mod countries;
pub mod directors;
pub mod facilities;
pub mod names;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{ArmsCatalog, World};

pub use config::WorldGenConfig;

/// Generate a complete starting world: a stocked arms catalog,
/// countries with borders, a director hiring pool, and idle research
/// facilities. Host-loaded definitions in the passed catalog are kept;
/// the fixed roster is added alongside them.
pub fn generate_world(config: &WorldGenConfig, catalog: ArmsCatalog) -> World {
    let mut world = World::new(catalog);
    let mut rng = SmallRng::seed_from_u64(config.seed);

    catalog::stock_catalog(&mut world);
    countries::generate_countries(&mut world, config, &mut rng);
    directors::generate_directors(&mut world, config, &mut rng);
    facilities::generate_facilities(&mut world, config, &mut rng);

    world
}
