pub mod flush;
pub mod model;
pub mod scenario;
pub mod sim;
pub mod testutil;
pub mod worldgen;

pub use model::{
    ArmsCatalog, ArmsDefinition, ArmsStock, Condition, Country, CountryProfile, DirectorTrait,
    GameDate, HireTier, ProjectSpec, ResearchDirector, ResearchFacility, War, World,
};
pub use scenario::Scenario;
pub use sim::{ResearchSystem, SimConfig, SimSystem, WarSystem, run};
