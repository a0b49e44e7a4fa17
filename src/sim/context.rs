use rand::RngCore;

use super::signal::Signal;
use crate::model::World;

/// Everything a system gets for one monthly tick.
///
/// Bundled in a struct so new fields (config, budgets) can be added
/// without touching the `SimSystem` trait signature.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    /// Shared run RNG; draw order is part of the deterministic contract.
    pub rng: &'a mut dyn RngCore,
    /// Systems push signals here during tick/handle_signals.
    pub signals: &'a mut Vec<Signal>,
    /// Signals emitted by other systems in the previous pass (read-only).
    pub inbox: &'a [Signal],
}
