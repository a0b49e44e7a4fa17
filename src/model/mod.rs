pub mod adjacency;
pub mod catalog;
pub mod country;
pub mod director;
pub mod facility;
pub mod stock;
pub mod timestamp;
pub mod war;
pub mod world;

pub use adjacency::NeighborMap;
pub use catalog::{ArmsCatalog, ArmsCategory, ArmsDefinition, MarketError, QualityProfile};
pub use country::{Branch, BranchIndustry, Country, CountryProfile, CountryState, Regime, Stance};
pub use director::{
    DirectorTrait, EffectFragment, Employment, HireTier, ResearchDirector, StarRatings,
    TraitEffects,
};
pub use facility::{
    Activity, ActiveProject, Complexity, FacilityError, FacilityKind, ProgressBand, ProjectSpec,
    ResearchFacility, Unpredictability,
};
pub use stock::{ArmsStock, Condition, Provenance};
pub use timestamp::GameDate;
pub use war::War;
pub use world::{IdGenerator, World};
