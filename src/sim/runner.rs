use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::context::TickContext;
use super::signal::Signal;
use super::system::{SimSystem, TickFrequency};
use crate::flush::flush_to_jsonl;
use crate::model::{GameDate, World};

/// Configuration for a simulation run.
pub struct SimConfig {
    pub start: GameDate,
    pub months: u32,
    pub seed: u64,
    /// If set, flush world state every N months.
    pub flush_interval: Option<u32>,
    /// Directory to write flush checkpoints into.
    pub output_dir: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(start: GameDate, months: u32, seed: u64) -> Self {
        Self {
            start,
            months,
            seed,
            flush_interval: None,
            output_dir: None,
        }
    }
}

/// Returns true if a system with the given frequency should fire on this turn.
pub fn should_fire(freq: TickFrequency, date: GameDate) -> bool {
    match freq {
        TickFrequency::Monthly => true,
        TickFrequency::Quarterly => date.month() % 3 == 1,
        TickFrequency::Yearly => date.month() == 1,
    }
}

/// Set `world.current_date` and call each system whose frequency matches.
///
/// Signal delivery is **single-pass, non-cascading**:
///
/// 1. **Phase 1 (tick):** Each system's `tick()` runs in registration order.
///    All signals emitted during this phase are collected into a shared buffer.
/// 2. **Phase 2 (react):** If any signals were emitted, each system's
///    `handle_signals()` is called with the full signal buffer as `ctx.inbox`.
///    Systems may mutate the world and push new signals during this phase,
///    but those new signals are **not** delivered — they are discarded at the
///    end of the dispatch cycle.
///
/// This means a signal emitted in Phase 2 will never trigger further reactions
/// within the same tick. This is intentional: it prevents infinite cascades and
/// keeps each tick's side-effects bounded. If a reaction needs to propagate,
/// it should mutate world state that a later tick's Phase 1 will observe.
///
/// Returns the Phase 1 signal buffer so the hosting application can
/// surface notifications (war alerts, completed projects) to the player.
pub fn dispatch_systems(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    date: GameDate,
) -> Vec<Signal> {
    world.current_date = date;

    // Phase 1: tick systems, collecting signals
    let mut signals = Vec::new();
    for system in systems.iter_mut() {
        if should_fire(system.frequency(), date) {
            let mut ctx = TickContext {
                world,
                rng,
                signals: &mut signals,
                inbox: &[],
            };
            system.tick(&mut ctx);
        }
    }

    // Phase 2: deliver signals for reaction (only if any were emitted)
    if !signals.is_empty() {
        for system in systems.iter_mut() {
            if should_fire(system.frequency(), date) {
                let mut new_signals = Vec::new();
                let mut ctx = TickContext {
                    world,
                    rng,
                    signals: &mut new_signals,
                    inbox: &signals,
                };
                system.handle_signals(&mut ctx);
            }
        }
    }
    signals
}

/// Run the simulation for the configured number of months.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed always
/// produces the same simulation.
pub fn run(world: &mut World, systems: &mut [Box<dyn SimSystem>], config: SimConfig) {
    if systems.is_empty() || config.months == 0 {
        return;
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);

    for offset in 0..config.months {
        let date = GameDate::from_turn(config.start.turn() + offset);
        dispatch_systems(world, systems, &mut rng, date);

        // Flush checkpoint at configured interval
        if let (Some(interval), Some(dir)) = (config.flush_interval, &config.output_dir) {
            let is_last_month = offset == config.months - 1;
            if is_last_month || (offset > 0 && (offset + 1) % interval == 0) {
                let checkpoint_dir = dir.join(format!("turn_{:05}", date.turn()));
                flush_to_jsonl(world, &checkpoint_dir).expect("failed to write flush checkpoint");
            }
        }
    }
}
