use super::context::TickContext;
use super::signal::{Signal, SignalKind};
use super::system::{SimSystem, TickFrequency};

/// Seeds the war ledger on the first tick of a run.
///
/// Targeting happens once: expansionist countries pick a weaker,
/// available neighbor at game start. After that the ledger only moves
/// through explicit declare/end commands from the hosting application,
/// so subsequent ticks are no-ops.
pub struct WarSystem {
    initialized: bool,
}

impl WarSystem {
    pub fn new() -> Self {
        Self { initialized: false }
    }
}

impl Default for WarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSystem for WarSystem {
    fn name(&self) -> &str {
        "wars"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Monthly
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let declared = ctx.world.initialize_wars(ctx.rng);
        let date = ctx.world.current_date;
        for war_id in declared {
            let war = &ctx.world.wars[&war_id];
            tracing::info!(
                aggressor = war.aggressor,
                defender = war.defender,
                "war declared at game start"
            );
            ctx.signals.push(Signal {
                date,
                kind: SignalKind::WarDeclared {
                    war_id,
                    aggressor: war.aggressor,
                    defender: war.defender,
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::{
        ArmsCatalog, BranchIndustry, CountryProfile, Regime, Stance, World,
    };
    use crate::sim::runner::dispatch_systems;
    use crate::model::GameDate;

    fn profile(budget: u8, stance: Stance) -> CountryProfile {
        CountryProfile {
            budget_tier: budget,
            corruption: 2,
            visibility: 3,
            standards: 3,
            regime: Regime::MilitaryJunta,
            stance,
            army: BranchIndustry::new(budget, budget),
            navy: BranchIndustry::new(budget, budget),
            air_force: BranchIndustry::new(budget, budget),
        }
    }

    #[test]
    fn first_tick_declares_and_signals() {
        let mut world = World::new(ArmsCatalog::new());
        let strong = world.add_country("Velastra", profile(5, Stance::Expansionist));
        let weak = world.add_country("Orvane", profile(1, Stance::Neutral));
        world.add_border(strong, weak);

        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(WarSystem::new())];
        let mut rng = SmallRng::seed_from_u64(8);

        let signals = dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::from_year(0));
        assert_eq!(signals.len(), 1);
        assert!(matches!(
            signals[0].kind,
            SignalKind::WarDeclared { aggressor, defender, .. }
                if aggressor == strong && defender == weak
        ));
        assert!(world.is_at_war(strong));

        // Later ticks do not re-run targeting.
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::new(0, 2));
        assert!(signals.is_empty());
        assert_eq!(world.active_wars().len(), 1);
    }

    #[test]
    fn peaceful_map_stays_quiet() {
        let mut world = World::new(ArmsCatalog::new());
        let a = world.add_country("A", profile(3, Stance::Defensive));
        let b = world.add_country("B", profile(2, Stance::Neutral));
        world.add_border(a, b);

        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(WarSystem::new())];
        let mut rng = SmallRng::seed_from_u64(8);
        let signals = dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::from_year(0));
        assert!(signals.is_empty());
        assert!(world.active_wars().is_empty());
    }
}
