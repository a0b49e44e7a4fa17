pub mod context;
pub mod research;
pub mod runner;
pub mod signal;
pub mod system;
pub mod wars;

pub use context::TickContext;
pub use research::ResearchSystem;
pub use runner::{SimConfig, dispatch_systems, run, should_fire};
pub use signal::{Signal, SignalKind};
pub use system::{SimSystem, TickFrequency};
pub use wars::WarSystem;
