use std::collections::BTreeMap;

use rand::{Rng, RngCore};

use super::adjacency::NeighborMap;
use super::catalog::{ArmsCatalog, MarketError};
use super::country::{Country, CountryProfile};
use super::director::{DirectorTrait, HireTier, ResearchDirector, StarRatings};
use super::facility::{FacilityKind, ProjectSpec, ResearchFacility};
use super::stock::{ArmsStock, Condition, Provenance};
use super::timestamp::GameDate;
use super::war::War;

/// Monotonic ID generator shared across all entity types.
/// Guarantees globally unique IDs — no two objects of any type share an ID.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Top-level entity registry. Every entity is owned here and referenced
/// by ID; the single logical thread of control substitutes for locking.
#[derive(Debug)]
pub struct World {
    pub countries: BTreeMap<u64, Country>,
    pub wars: BTreeMap<u64, War>,
    pub directors: BTreeMap<u64, ResearchDirector>,
    pub facilities: BTreeMap<u64, ResearchFacility>,
    pub stocks: BTreeMap<u64, ArmsStock>,
    pub catalog: ArmsCatalog,
    pub neighbors: NeighborMap,
    pub id_gen: IdGenerator,
    pub current_date: GameDate,
    wars_initialized: bool,
}

impl World {
    pub fn new(catalog: ArmsCatalog) -> Self {
        Self {
            countries: BTreeMap::new(),
            wars: BTreeMap::new(),
            directors: BTreeMap::new(),
            facilities: BTreeMap::new(),
            stocks: BTreeMap::new(),
            catalog,
            neighbors: NeighborMap::new(),
            id_gen: IdGenerator::new(),
            current_date: GameDate::from_year(0),
            wars_initialized: false,
        }
    }

    /// Advance the world clock by one month.
    pub fn advance_date(&mut self) {
        self.current_date = self.current_date.next();
    }

    // --- Registry ---

    /// Add a country, assigning it a unique ID. Returns the assigned ID.
    pub fn add_country(&mut self, name: impl Into<String>, profile: CountryProfile) -> u64 {
        let id = self.id_gen.next_id();
        self.countries.insert(id, Country::new(id, name, profile));
        id
    }

    /// Record a land border between two countries.
    ///
    /// # Panics
    /// Panics if either country does not exist.
    pub fn add_border(&mut self, a: u64, b: u64) {
        assert!(
            self.countries.contains_key(&a),
            "add_border: country {a} not found"
        );
        assert!(
            self.countries.contains_key(&b),
            "add_border: country {b} not found"
        );
        self.neighbors.add_border(a, b);
    }

    pub fn add_director(
        &mut self,
        name: impl Into<String>,
        nationality: impl Into<String>,
        traits: Vec<DirectorTrait>,
        stars: StarRatings,
        salary: f64,
    ) -> u64 {
        let id = self.id_gen.next_id();
        self.directors.insert(
            id,
            ResearchDirector::new(id, name, nationality, traits, stars, salary),
        );
        id
    }

    /// # Panics
    /// Panics if the location country does not exist.
    pub fn add_facility(
        &mut self,
        name: impl Into<String>,
        location: u64,
        kind: FacilityKind,
        tech_level: u8,
    ) -> u64 {
        assert!(
            self.countries.contains_key(&location),
            "add_facility: country {location} not found"
        );
        let id = self.id_gen.next_id();
        self.facilities
            .insert(id, ResearchFacility::new(id, name, location, kind, tech_level));
        id
    }

    /// Panicking lookup for callers holding an ID they created.
    pub fn country(&self, id: u64) -> &Country {
        self.countries
            .get(&id)
            .unwrap_or_else(|| panic!("country {id} not found"))
    }

    pub fn facility(&self, id: u64) -> &ResearchFacility {
        self.facilities
            .get(&id)
            .unwrap_or_else(|| panic!("facility {id} not found"))
    }

    pub fn director(&self, id: u64) -> &ResearchDirector {
        self.directors
            .get(&id)
            .unwrap_or_else(|| panic!("director {id} not found"))
    }

    pub fn stock(&self, id: u64) -> &ArmsStock {
        self.stocks
            .get(&id)
            .unwrap_or_else(|| panic!("stock {id} not found"))
    }

    // --- War ledger ---

    /// One-shot war seeding pass over the whole map.
    ///
    /// Every expansionist country not already at war computes its
    /// military power and looks at its neighbors; of those that are at
    /// peace and strictly weaker, one is picked uniformly at random as
    /// the defender. A country with no weaker available neighbor simply
    /// gets no war, and no country ends up on two fronts. Returns the
    /// IDs of the wars declared, in aggressor-ID order.
    ///
    /// # Panics
    /// Panics if called more than once.
    pub fn initialize_wars(&mut self, rng: &mut dyn RngCore) -> Vec<u64> {
        assert!(!self.wars_initialized, "initialize_wars: already ran");
        self.wars_initialized = true;

        let mut declared = Vec::new();
        let country_ids: Vec<u64> = self.countries.keys().copied().collect();
        for aggressor_id in country_ids {
            let aggressor = &self.countries[&aggressor_id];
            if !aggressor.is_expansionist() || aggressor.state.at_war {
                continue;
            }
            let power = aggressor.military_power();
            let candidates: Vec<u64> = self
                .neighbors
                .neighbors(aggressor_id)
                .iter()
                .copied()
                .filter(|neighbor| {
                    self.countries
                        .get(neighbor)
                        .is_some_and(|c| !c.state.at_war && c.military_power() < power)
                })
                .collect();
            if candidates.is_empty() {
                continue;
            }
            let defender = candidates[rng.random_range(0..candidates.len())];
            declared.push(self.declare_war(aggressor_id, defender));
        }
        declared
    }

    /// Unconditionally open a war and mark both sides as at-war.
    /// Returns the new war's ID.
    ///
    /// # Panics
    /// Panics if either country does not exist or aggressor == defender.
    pub fn declare_war(&mut self, aggressor: u64, defender: u64) -> u64 {
        assert!(
            self.countries.contains_key(&aggressor),
            "declare_war: country {aggressor} not found"
        );
        assert!(
            self.countries.contains_key(&defender),
            "declare_war: country {defender} not found"
        );
        let id = self.id_gen.next_id();
        self.wars
            .insert(id, War::new(aggressor, defender, self.current_date));

        let a = self.countries.get_mut(&aggressor).unwrap();
        a.state.at_war = true;
        a.state.enemies.insert(defender);
        let d = self.countries.get_mut(&defender).unwrap();
        d.state.at_war = true;
        d.state.enemies.insert(aggressor);
        id
    }

    /// End the active war matching this exact aggressor/defender pair.
    /// Returns false if no such war is active.
    ///
    /// Known limitation: both countries' at-war flags are cleared
    /// without checking for other active wars involving them, so a
    /// country fighting on two fronts that ends one is marked at peace.
    /// The initialization pass never creates multi-front wars, so this
    /// only bites wars declared manually.
    pub fn end_war(&mut self, aggressor: u64, defender: u64) -> bool {
        let Some(war) = self
            .wars
            .values_mut()
            .find(|w| w.active && w.aggressor == aggressor && w.defender == defender)
        else {
            return false;
        };
        war.active = false;

        if let Some(a) = self.countries.get_mut(&aggressor) {
            a.state.at_war = false;
            a.state.enemies.remove(&defender);
        }
        if let Some(d) = self.countries.get_mut(&defender) {
            d.state.at_war = false;
            d.state.enemies.remove(&aggressor);
        }
        true
    }

    pub fn is_at_war(&self, country: u64) -> bool {
        self.countries
            .get(&country)
            .is_some_and(|c| c.state.at_war)
    }

    /// Active wars where the country is on either side.
    pub fn wars_for_country(&self, country: u64) -> Vec<&War> {
        self.wars
            .values()
            .filter(|w| w.active && w.involves(country))
            .collect()
    }

    pub fn active_wars(&self) -> Vec<&War> {
        self.wars.values().filter(|w| w.active).collect()
    }

    /// All wars, active and historical.
    pub fn all_wars(&self) -> impl Iterator<Item = &War> {
        self.wars.values()
    }

    // --- Research commands ---

    /// Record the hire of a director. Returns false if already hired.
    pub fn hire_director(&mut self, director_id: u64, tier: HireTier) -> bool {
        let date = self.current_date;
        let director = self
            .directors
            .get_mut(&director_id)
            .unwrap_or_else(|| panic!("director {director_id} not found"));
        if director.hired.is_some() {
            return false;
        }
        director.mark_hired(tier, date);
        true
    }

    /// Attach a hired, unemployed director to a facility.
    pub fn assign_director(&mut self, director_id: u64, facility_id: u64) -> bool {
        let director = self
            .directors
            .get_mut(&director_id)
            .unwrap_or_else(|| panic!("director {director_id} not found"));
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .unwrap_or_else(|| panic!("facility {facility_id} not found"));
        if director.hired.is_none() {
            return false;
        }
        facility.assign_director(director)
    }

    /// Detach a facility's director, if it has one and is not
    /// mid-project.
    pub fn remove_director(&mut self, facility_id: u64) -> bool {
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .unwrap_or_else(|| panic!("facility {facility_id} not found"));
        let Some(director_id) = facility.director_id else {
            return false;
        };
        let director = self
            .directors
            .get_mut(&director_id)
            .unwrap_or_else(|| panic!("director {director_id} not found"));
        facility.remove_director(director)
    }

    /// Launch a project at a facility, using its assigned director's
    /// trait effects for costing. Returns false when preconditions fail.
    pub fn start_project(&mut self, facility_id: u64, project: ProjectSpec) -> bool {
        let date = self.current_date;
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .unwrap_or_else(|| panic!("facility {facility_id} not found"));
        let Some(director_id) = facility.director_id else {
            return false;
        };
        let director = self
            .directors
            .get(&director_id)
            .unwrap_or_else(|| panic!("director {director_id} not found"));
        facility.start_project(project, director, date)
    }

    /// One month of research at a facility. Returns the released
    /// monthly cost on completion, 0.0 otherwise.
    ///
    /// # Panics
    /// Panics if the facility is researching without a director — the
    /// assignment invariants make that unreachable.
    pub fn advance_research(&mut self, facility_id: u64, rng: &mut dyn RngCore) -> f64 {
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .unwrap_or_else(|| panic!("facility {facility_id} not found"));
        let Some(director_id) = facility.director_id else {
            assert!(
                !matches!(facility.activity, super::facility::Activity::Researching(_)),
                "facility {facility_id} researching without a director"
            );
            return 0.0;
        };
        let director = self
            .directors
            .get_mut(&director_id)
            .unwrap_or_else(|| panic!("director {director_id} not found"));
        facility.advance_research(director, rng)
    }

    // --- Arms market ---

    /// Buy a stack of hardware against a catalog definition. Returns
    /// the new stock's ID.
    pub fn purchase_stock(
        &mut self,
        definition_id: u64,
        quantity: u32,
        price_per_unit: f64,
        condition: Condition,
        provenance: Provenance,
    ) -> Result<u64, MarketError> {
        let id = self.id_gen.next_id();
        let stock = ArmsStock::new(
            id,
            &self.catalog,
            definition_id,
            quantity,
            price_per_unit,
            condition,
            provenance,
            self.current_date,
        )?;
        self.stocks.insert(id, stock);
        Ok(id)
    }

    /// Sell units from a stack at its current market value. The stack
    /// is removed from the registry when it empties. Returns proceeds.
    ///
    /// # Panics
    /// Panics if the stock does not exist.
    pub fn sell_stock(&mut self, stock_id: u64, quantity: u32) -> f64 {
        let date = self.current_date;
        let stock = self
            .stocks
            .get_mut(&stock_id)
            .unwrap_or_else(|| panic!("stock {stock_id} not found"));
        let proceeds = stock.sell(quantity, &self.catalog);
        stock.modified = date;
        if stock.quantity == 0 {
            self.stocks.remove(&stock_id);
        }
        proceeds
    }

    /// Split a stack in two. Returns the new sibling's ID.
    pub fn split_stock(&mut self, stock_id: u64, quantity: u32) -> Result<u64, MarketError> {
        let date = self.current_date;
        let new_id = self.id_gen.next_id();
        let stock = self
            .stocks
            .get_mut(&stock_id)
            .unwrap_or_else(|| panic!("stock {stock_id} not found"));
        let mut sibling = stock.split(quantity, new_id)?;
        stock.modified = date;
        sibling.modified = date;
        self.stocks.insert(new_id, sibling);
        Ok(new_id)
    }

    /// Merge `from` into `into` and drop the emptied `from` stack.
    pub fn merge_stocks(&mut self, into: u64, from: u64) -> Result<(), MarketError> {
        assert!(into != from, "merge_stocks: cannot merge stock {into} into itself");
        let date = self.current_date;
        let source = self
            .stocks
            .get(&from)
            .unwrap_or_else(|| panic!("stock {from} not found"))
            .clone();
        let target = self
            .stocks
            .get_mut(&into)
            .unwrap_or_else(|| panic!("stock {into} not found"));
        target.merge(&source)?;
        target.modified = date;
        self.stocks.remove(&from);
        Ok(())
    }

    pub fn degrade_stock(&mut self, stock_id: u64) -> bool {
        let date = self.current_date;
        let stock = self
            .stocks
            .get_mut(&stock_id)
            .unwrap_or_else(|| panic!("stock {stock_id} not found"));
        let changed = stock.degrade_condition();
        if changed {
            stock.modified = date;
        }
        changed
    }

    pub fn improve_stock(&mut self, stock_id: u64) -> bool {
        let date = self.current_date;
        let stock = self
            .stocks
            .get_mut(&stock_id)
            .unwrap_or_else(|| panic!("stock {stock_id} not found"));
        let changed = stock.improve_condition();
        if changed {
            stock.modified = date;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::country::{BranchIndustry, Regime, Stance};

    fn profile(budget: u8, stance: Stance) -> CountryProfile {
        CountryProfile {
            budget_tier: budget,
            corruption: 2,
            visibility: 3,
            standards: 3,
            regime: Regime::OneParty,
            stance,
            army: BranchIndustry::new(budget, budget),
            navy: BranchIndustry::new(budget, budget),
            air_force: BranchIndustry::new(budget, budget),
        }
    }

    fn world_with_map() -> (World, u64, u64, u64) {
        let mut world = World::new(ArmsCatalog::new());
        let strong = world.add_country("Velastra", profile(5, Stance::Expansionist));
        let weak = world.add_country("Orvane", profile(2, Stance::Neutral));
        let peer = world.add_country("Kestran", profile(5, Stance::Defensive));
        world.add_border(strong, weak);
        world.add_border(strong, peer);
        (world, strong, weak, peer)
    }

    #[test]
    fn init_targets_only_weaker_neighbors() {
        let (mut world, strong, weak, peer) = world_with_map();
        let mut rng = SmallRng::seed_from_u64(1);
        let declared = world.initialize_wars(&mut rng);
        assert_eq!(declared.len(), 1);
        let war = &world.wars[&declared[0]];
        assert_eq!(war.aggressor, strong);
        assert_eq!(war.defender, weak);
        assert!(
            world.country(war.aggressor).military_power()
                > world.country(war.defender).military_power()
        );
        assert!(!world.is_at_war(peer));
    }

    #[test]
    fn init_single_front_invariant() {
        let mut world = World::new(ArmsCatalog::new());
        // Two expansionist powers flank one weak country; only the
        // first to move gets the target.
        let a = world.add_country("A", profile(5, Stance::Expansionist));
        let b = world.add_country("B", profile(5, Stance::Expansionist));
        let target = world.add_country("T", profile(1, Stance::Neutral));
        world.add_border(a, target);
        world.add_border(b, target);
        let mut rng = SmallRng::seed_from_u64(2);
        let declared = world.initialize_wars(&mut rng);
        assert_eq!(declared.len(), 1);
        for country in [a, b, target] {
            assert!(world.wars_for_country(country).len() <= 1);
        }
    }

    #[test]
    fn init_leaves_matchless_aggressors_at_peace() {
        let mut world = World::new(ArmsCatalog::new());
        let lone = world.add_country("Lone", profile(5, Stance::Expansionist));
        // No borders at all.
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(world.initialize_wars(&mut rng).is_empty());
        assert!(!world.is_at_war(lone));
    }

    #[test]
    #[should_panic(expected = "already ran")]
    fn init_runs_once() {
        let (mut world, ..) = world_with_map();
        let mut rng = SmallRng::seed_from_u64(1);
        world.initialize_wars(&mut rng);
        world.initialize_wars(&mut rng);
    }

    #[test]
    fn declare_and_end_war() {
        let (mut world, strong, weak, _) = world_with_map();
        world.declare_war(strong, weak);
        assert!(world.is_at_war(strong));
        assert!(world.is_at_war(weak));
        assert_eq!(world.active_wars().len(), 1);

        assert!(world.end_war(strong, weak));
        assert!(!world.is_at_war(strong));
        assert!(!world.is_at_war(weak));
        assert!(world.active_wars().is_empty());
        // Ledger keeps history.
        assert_eq!(world.all_wars().count(), 1);
        // Ending again finds nothing.
        assert!(!world.end_war(strong, weak));
        // Pair order matters for the match.
        world.declare_war(strong, weak);
        assert!(!world.end_war(weak, strong));
    }

    #[test]
    fn end_war_clears_flags_without_multifront_check() {
        let (mut world, strong, weak, peer) = world_with_map();
        world.declare_war(strong, weak);
        world.declare_war(strong, peer);
        // Ending one front marks the aggressor at peace despite the
        // other active war. Documented behavior, not an oversight here.
        world.end_war(strong, weak);
        assert!(!world.is_at_war(strong));
        assert_eq!(world.wars_for_country(strong).len(), 1);
    }

    #[test]
    fn market_purchase_sell_lifecycle() {
        let mut catalog = ArmsCatalog::new();
        catalog.insert(crate::model::catalog::tests::rifle(1));
        let mut world = World::new(catalog);
        let id = world
            .purchase_stock(1, 10, 1.0, Condition::Good, Provenance::Surplus)
            .unwrap();
        world.advance_date();
        let proceeds = world.sell_stock(id, 10);
        assert!(proceeds > 0.0);
        // Fully sold stacks leave the registry.
        assert!(!world.stocks.contains_key(&id));
    }

    #[test]
    fn market_split_and_merge() {
        let mut catalog = ArmsCatalog::new();
        catalog.insert(crate::model::catalog::tests::rifle(1));
        let mut world = World::new(catalog);
        let id = world
            .purchase_stock(1, 10, 1.0, Condition::Good, Provenance::Surplus)
            .unwrap();
        let half = world.split_stock(id, 4).unwrap();
        assert_eq!(world.stock(id).quantity, 6);
        assert_eq!(world.stock(half).quantity, 4);
        world.merge_stocks(id, half).unwrap();
        assert_eq!(world.stock(id).quantity, 10);
        assert!(!world.stocks.contains_key(&half));
    }

    #[test]
    fn purchase_unknown_definition_rejected() {
        let mut world = World::new(ArmsCatalog::new());
        assert_eq!(
            world
                .purchase_stock(9, 1, 1.0, Condition::New, Provenance::FactoryOrder)
                .unwrap_err(),
            MarketError::UnknownDefinition(9)
        );
    }

    #[test]
    fn hire_assign_and_research_flow() {
        let mut world = World::new(ArmsCatalog::new());
        let country = world.add_country("Zanheria", profile(3, Stance::Neutral));
        let facility = world.add_facility("Site 4", country, FacilityKind::Missiles, 4);
        let director = world.add_director(
            "Dr. Okafor",
            "Zanheria",
            vec![DirectorTrait::Frugal],
            StarRatings::new(3, 3, 3, 3),
            40.0,
        );
        // Unhired directors cannot be assigned.
        assert!(!world.assign_director(director, facility));
        assert!(world.hire_director(director, HireTier::Vetted));
        assert!(!world.hire_director(director, HireTier::Vetted));
        assert!(world.assign_director(director, facility));

        let project = ProjectSpec {
            name: "Guidance package".to_string(),
            base_cost: 50_000.0,
            complexity: crate::model::facility::Complexity::Trivial,
            unpredictability: crate::model::facility::Unpredictability::Routine,
            required_tech_level: None,
        };
        assert!(world.start_project(facility, project));
        let mut rng = SmallRng::seed_from_u64(4);
        let mut released = 0.0;
        for _ in 0..12 {
            released += world.advance_research(facility, &mut rng);
        }
        assert!(released > 0.0);
        assert_eq!(world.director(director).completed_projects, 1);
        // Idle again: director can now be detached.
        assert!(world.remove_director(facility));
    }
}
