use super::context::TickContext;
use super::signal::{Signal, SignalKind};
use super::system::{SimSystem, TickFrequency};
use crate::model::Activity;
use crate::model::director::{HireTier, TRAIT_REVEAL_MONTHS};

/// Drives every facility's long-running operation one month forward and
/// reveals blind-hired directors' traits when their first year is up.
pub struct ResearchSystem;

impl ResearchSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResearchSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSystem for ResearchSystem {
    fn name(&self) -> &str {
        "research"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Monthly
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let date = ctx.world.current_date;

        // Snapshot the operation kind first: advancing needs mutable
        // access to both the facility and director maps.
        enum PendingOp {
            Research { project_name: String, director_id: u64 },
            Retool,
            Upgrade,
        }

        let facility_ids: Vec<u64> = ctx.world.facilities.keys().copied().collect();
        for facility_id in facility_ids {
            let facility = &ctx.world.facilities[&facility_id];
            let op = match &facility.activity {
                Activity::Researching(active) => PendingOp::Research {
                    project_name: active.spec.name.clone(),
                    director_id: facility.director_id.unwrap_or_else(|| {
                        panic!("facility {facility_id} researching without a director")
                    }),
                },
                Activity::Retooling { .. } => PendingOp::Retool,
                Activity::Upgrading { .. } => PendingOp::Upgrade,
                Activity::Idle => continue,
            };

            match op {
                PendingOp::Research {
                    project_name,
                    director_id,
                } => {
                    let released = ctx.world.advance_research(facility_id, ctx.rng);
                    if released > 0.0 {
                        tracing::info!(facility_id, project = %project_name, "project completed");
                        ctx.signals.push(Signal {
                            date,
                            kind: SignalKind::ProjectCompleted {
                                facility_id,
                                director_id,
                                project_name,
                                released_monthly_cost: released,
                            },
                        });
                    }
                }
                PendingOp::Retool => {
                    let facility = ctx.world.facilities.get_mut(&facility_id).unwrap();
                    if facility.advance_retooling() {
                        ctx.signals.push(Signal {
                            date,
                            kind: SignalKind::RetoolingCompleted {
                                facility_id,
                                kind: facility.kind,
                            },
                        });
                    }
                }
                PendingOp::Upgrade => {
                    let facility = ctx.world.facilities.get_mut(&facility_id).unwrap();
                    if facility.process_upgrade() {
                        ctx.signals.push(Signal {
                            date,
                            kind: SignalKind::UpgradeCompleted {
                                facility_id,
                                tech_level: facility.tech_level,
                            },
                        });
                    }
                }
            }
        }

        // Blind hires: a year on the payroll surfaces the personality.
        for director in ctx.world.directors.values_mut() {
            if director.traits_revealed || director.hire_tier != HireTier::Blind {
                continue;
            }
            let Some(hired) = director.hired else { continue };
            if date.months_since(hired) >= TRAIT_REVEAL_MONTHS {
                director.traits_revealed = true;
                tracing::info!(director_id = director.id, "director traits revealed");
                ctx.signals.push(Signal {
                    date,
                    kind: SignalKind::TraitsRevealed {
                        director_id: director.id,
                    },
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::{
        ArmsCatalog, Complexity, DirectorTrait, FacilityKind, GameDate, ProjectSpec, StarRatings,
        Unpredictability, World,
    };
    use crate::model::{BranchIndustry, CountryProfile, Regime, Stance};
    use crate::sim::runner::dispatch_systems;

    fn world_with_lab() -> (World, u64, u64) {
        let mut world = World::new(ArmsCatalog::new());
        let country = world.add_country(
            "Zanheria",
            CountryProfile {
                budget_tier: 3,
                corruption: 2,
                visibility: 3,
                standards: 3,
                regime: Regime::Democracy,
                stance: Stance::Neutral,
                army: BranchIndustry::new(3, 3),
                navy: BranchIndustry::new(3, 3),
                air_force: BranchIndustry::new(3, 3),
            },
        );
        let facility = world.add_facility("Site 4", country, FacilityKind::Missiles, 4);
        let director = world.add_director(
            "Dr. Okafor",
            "Zanheria",
            vec![DirectorTrait::Frugal],
            StarRatings::new(3, 3, 3, 3),
            40.0,
        );
        (world, facility, director)
    }

    fn trivial_project() -> ProjectSpec {
        ProjectSpec {
            name: "Fuse redesign".to_string(),
            base_cost: 20_000.0,
            complexity: Complexity::Trivial,
            unpredictability: Unpredictability::Routine,
            required_tech_level: None,
        }
    }

    #[test]
    fn project_completion_emits_signal_once() {
        let (mut world, facility, director) = world_with_lab();
        world.hire_director(director, HireTier::Vetted);
        world.assign_director(director, facility);
        assert!(world.start_project(facility, trivial_project()));

        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(ResearchSystem::new())];
        let mut rng = SmallRng::seed_from_u64(11);
        let mut completions = 0;
        for turn in 0..12 {
            let signals = dispatch_systems(
                &mut world,
                &mut systems,
                &mut rng,
                GameDate::from_turn(turn),
            );
            completions += signals
                .iter()
                .filter(|s| matches!(s.kind, SignalKind::ProjectCompleted { .. }))
                .count();
        }
        assert_eq!(completions, 1);
        assert!(world.facility(facility).is_idle());
        assert_eq!(world.director(director).completed_projects, 1);
    }

    #[test]
    fn retooling_and_upgrade_complete_via_ticks() {
        let (mut world, facility, _) = world_with_lab();
        assert!(
            world
                .facilities
                .get_mut(&facility)
                .unwrap()
                .start_retooling(FacilityKind::Electronics, 2)
        );

        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(ResearchSystem::new())];
        let mut rng = SmallRng::seed_from_u64(12);
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::from_turn(0));
        assert!(signals.is_empty());
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::from_turn(1));
        assert!(matches!(
            signals[0].kind,
            SignalKind::RetoolingCompleted { kind: FacilityKind::Electronics, .. }
        ));
        assert_eq!(world.facility(facility).kind, FacilityKind::Electronics);

        world
            .facilities
            .get_mut(&facility)
            .unwrap()
            .start_upgrade(5, 1, 100.0)
            .unwrap();
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::from_turn(2));
        assert!(matches!(
            signals[0].kind,
            SignalKind::UpgradeCompleted { tech_level: 5, .. }
        ));
        assert_eq!(world.facility(facility).tech_level, 5);
    }

    #[test]
    fn blind_hire_traits_reveal_after_a_year() {
        let (mut world, _, director) = world_with_lab();
        world.current_date = GameDate::new(1, 3);
        world.hire_director(director, HireTier::Blind);
        assert!(!world.director(director).traits_revealed);

        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(ResearchSystem::new())];
        let mut rng = SmallRng::seed_from_u64(13);

        // Eleven months in: still hidden.
        dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::new(2, 2));
        assert!(!world.director(director).traits_revealed);

        // Twelve months in: revealed, with a signal.
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::new(2, 3));
        assert!(world.director(director).traits_revealed);
        assert!(signals.iter().any(|s| matches!(
            s.kind,
            SignalKind::TraitsRevealed { director_id } if director_id == director
        )));

        // No repeat signal on later ticks.
        let signals =
            dispatch_systems(&mut world, &mut systems, &mut rng, GameDate::new(2, 4));
        assert!(signals.is_empty());
    }

    #[test]
    fn vetted_hires_never_signal_reveal() {
        let (mut world, _, director) = world_with_lab();
        world.hire_director(director, HireTier::Vetted);
        let mut systems: Vec<Box<dyn SimSystem>> = vec![Box::new(ResearchSystem::new())];
        let mut rng = SmallRng::seed_from_u64(14);
        for turn in 0..24 {
            let signals = dispatch_systems(
                &mut world,
                &mut systems,
                &mut rng,
                GameDate::from_turn(turn),
            );
            assert!(signals.is_empty());
        }
    }
}
