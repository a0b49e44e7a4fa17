use crate::model::*;

// -- Builder-style ref types --

/// Typed reference to a country in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::country`] (creation) or [`Scenario::country_mut`] (mutation).
/// Call [`.id()`](CountryRef::id) to terminate the chain and extract the entity ID.
pub struct CountryRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> CountryRef<'a> {
    fn entry(&mut self) -> &mut Country {
        self.scenario.world.countries.get_mut(&self.id).unwrap()
    }

    /// Set the budget tier, keeping the live budget in step so the
    /// scenario starts from a consistent state.
    pub fn budget_tier(mut self, v: u8) -> Self {
        let c = self.entry();
        c.profile.budget_tier = v;
        c.state.budget = v;
        c.state.funds = v as f64 * 1000.0;
        self
    }
    pub fn stance(mut self, v: Stance) -> Self { self.entry().profile.stance = v; self }
    pub fn regime(mut self, v: Regime) -> Self { self.entry().profile.regime = v; self }
    pub fn corruption(mut self, v: u8) -> Self { self.entry().profile.corruption = v; self }
    pub fn visibility(mut self, v: u8) -> Self { self.entry().profile.visibility = v; self }
    pub fn standards(mut self, v: u8) -> Self { self.entry().profile.standards = v; self }
    pub fn army(mut self, production: u8, technology: u8) -> Self {
        self.entry().profile.army = BranchIndustry::new(production, technology);
        self
    }
    pub fn navy(mut self, production: u8, technology: u8) -> Self {
        self.entry().profile.navy = BranchIndustry::new(production, technology);
        self
    }
    pub fn air_force(mut self, production: u8, technology: u8) -> Self {
        self.entry().profile.air_force = BranchIndustry::new(production, technology);
        self
    }
    /// Set all three branches to the same ratings.
    pub fn industry(self, production: u8, technology: u8) -> Self {
        self.army(production, technology)
            .navy(production, technology)
            .air_force(production, technology)
    }
    pub fn stability(mut self, v: f64) -> Self { self.entry().state.stability = v; self }
    pub fn funds(mut self, v: f64) -> Self { self.entry().state.funds = v; self }

    /// Escape hatch: apply an arbitrary closure to the country.
    pub fn with(mut self, f: impl FnOnce(&mut Country)) -> Self { f(self.entry()); self }

    /// Terminate the chain and return the entity ID.
    pub fn id(self) -> u64 { self.id }
}

/// Typed reference to a research director in a [`Scenario`].
pub struct DirectorRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> DirectorRef<'a> {
    fn entry(&mut self) -> &mut ResearchDirector {
        self.scenario.world.directors.get_mut(&self.id).unwrap()
    }

    pub fn traits(mut self, v: Vec<DirectorTrait>) -> Self {
        assert!((1..=3).contains(&v.len()), "director must carry 1-3 traits");
        self.entry().traits = v;
        self
    }
    pub fn stars(mut self, talent: u8, morality: u8, expertise: u8, management: u8) -> Self {
        self.entry().stars = StarRatings::new(talent, morality, expertise, management);
        self
    }
    pub fn salary(mut self, v: f64) -> Self { self.entry().salary = v; self }
    pub fn nationality(mut self, v: &str) -> Self { self.entry().nationality = v.to_string(); self }

    /// Mark the director hired under the given tier at the scenario's
    /// current date.
    pub fn hired(mut self, tier: HireTier) -> Self {
        let date = self.scenario.world.current_date;
        self.entry().mark_hired(tier, date);
        self
    }

    /// Escape hatch: apply an arbitrary closure to the director.
    pub fn with(mut self, f: impl FnOnce(&mut ResearchDirector)) -> Self { f(self.entry()); self }

    /// Terminate the chain and return the entity ID.
    pub fn id(self) -> u64 { self.id }
}

/// Typed reference to a research facility in a [`Scenario`].
pub struct FacilityRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> FacilityRef<'a> {
    fn entry(&mut self) -> &mut ResearchFacility {
        self.scenario.world.facilities.get_mut(&self.id).unwrap()
    }

    pub fn kind(mut self, v: FacilityKind) -> Self { self.entry().kind = v; self }
    pub fn tech_level(mut self, v: u8) -> Self { self.entry().tech_level = v; self }

    /// Assign an already-hired director to this facility.
    ///
    /// # Panics
    /// Panics if the director is unhired or employed elsewhere — a
    /// scenario wiring bug.
    pub fn director(self, director_id: u64) -> Self {
        let facility_id = self.id;
        assert!(
            self.scenario.world.assign_director(director_id, facility_id),
            "scenario: director {director_id} cannot be assigned to facility {facility_id}"
        );
        self
    }

    /// Escape hatch: apply an arbitrary closure to the facility.
    pub fn with(mut self, f: impl FnOnce(&mut ResearchFacility)) -> Self { f(self.entry()); self }

    /// Terminate the chain and return the entity ID.
    pub fn id(self) -> u64 { self.id }
}

/// Fluent builder for constructing World state.
///
/// Creation methods fill in balanced defaults so tests only state what
/// they care about; chained setters and `with` closures mean adding new
/// struct fields never breaks callers.
///
/// Used by tests for deterministic scenario setup, and by the worldgen
/// layer as its assembly surface.
pub struct Scenario {
    world: World,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Create a new scenario with an empty catalog, starting at Y0.M1.
    pub fn new() -> Self {
        Self::with_catalog(ArmsCatalog::new())
    }

    /// Create a new scenario against a prepared catalog.
    pub fn with_catalog(catalog: ArmsCatalog) -> Self {
        Self {
            world: World::new(catalog),
        }
    }

    /// Create a new scenario starting at the given date.
    pub fn at_date(date: GameDate) -> Self {
        let mut scenario = Self::new();
        scenario.world.current_date = date;
        scenario
    }

    // -- Entity creation --

    /// Add a country with a balanced mid-tier profile (budget 3,
    /// neutral stance, ratings 3 across the board).
    pub fn country(&mut self, name: &str) -> CountryRef<'_> {
        let profile = CountryProfile {
            budget_tier: 3,
            corruption: 3,
            visibility: 3,
            standards: 3,
            regime: Regime::Democracy,
            stance: Stance::Neutral,
            army: BranchIndustry::new(3, 3),
            navy: BranchIndustry::new(3, 3),
            air_force: BranchIndustry::new(3, 3),
        };
        let id = self.world.add_country(name, profile);
        CountryRef { scenario: self, id }
    }

    /// Re-open a chained reference to an existing country.
    pub fn country_mut(&mut self, id: u64) -> CountryRef<'_> {
        assert!(
            self.world.countries.contains_key(&id),
            "country {id} not found"
        );
        CountryRef { scenario: self, id }
    }

    /// Record a land border between two countries.
    pub fn border(&mut self, a: u64, b: u64) -> &mut Self {
        self.world.add_border(a, b);
        self
    }

    /// Add an unhired director with one neutral trait and 3-star
    /// ratings.
    pub fn director(&mut self, name: &str) -> DirectorRef<'_> {
        let id = self.world.add_director(
            name,
            "Stateless",
            vec![DirectorTrait::Frugal],
            StarRatings::new(3, 3, 3, 3),
            40.0,
        );
        DirectorRef { scenario: self, id }
    }

    pub fn director_mut(&mut self, id: u64) -> DirectorRef<'_> {
        assert!(
            self.world.directors.contains_key(&id),
            "director {id} not found"
        );
        DirectorRef { scenario: self, id }
    }

    /// Add a small-arms facility at tech level 3 in the given country.
    pub fn facility(&mut self, name: &str, location: u64) -> FacilityRef<'_> {
        let id = self
            .world
            .add_facility(name, location, FacilityKind::SmallArms, 3);
        FacilityRef { scenario: self, id }
    }

    pub fn facility_mut(&mut self, id: u64) -> FacilityRef<'_> {
        assert!(
            self.world.facilities.contains_key(&id),
            "facility {id} not found"
        );
        FacilityRef { scenario: self, id }
    }

    /// Load a definition into the scenario's catalog.
    pub fn definition(&mut self, definition: ArmsDefinition) -> &mut Self {
        self.world.catalog.insert(definition);
        self
    }

    /// Buy a stock stack against the catalog.
    ///
    /// # Panics
    /// Panics if the definition is unknown — a scenario wiring bug.
    pub fn stock(
        &mut self,
        definition_id: u64,
        quantity: u32,
        price_per_unit: f64,
        condition: Condition,
    ) -> u64 {
        self.world
            .purchase_stock(
                definition_id,
                quantity,
                price_per_unit,
                condition,
                Provenance::FactoryOrder,
            )
            .unwrap_or_else(|e| panic!("scenario: purchase failed: {e}"))
    }

    // -- Access --

    pub fn world(&mut self) -> &mut World {
        &mut self.world
    }

    /// Consume the builder and return the finished world.
    pub fn build(self) -> World {
        self.world
    }
}
