use serde::{Deserialize, Serialize};

use crate::model::FacilityKind;
use crate::model::GameDate;

/// A signal emitted by one system and consumed by others (and by the
/// presentation layer, which turns these into player alerts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Turn the signal fired on.
    pub date: GameDate,
    /// What happened.
    pub kind: SignalKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// A war was opened between two countries.
    WarDeclared {
        war_id: u64,
        aggressor: u64,
        defender: u64,
    },

    /// A war was ended by the exact aggressor/defender pair.
    WarEnded { aggressor: u64, defender: u64 },

    /// A research project crossed the 100-progress threshold.
    ProjectCompleted {
        facility_id: u64,
        director_id: u64,
        project_name: String,
        /// Monthly billing no longer owed from next turn.
        released_monthly_cost: f64,
    },

    /// A facility finished converting to a new specialization.
    RetoolingCompleted {
        facility_id: u64,
        kind: FacilityKind,
    },

    /// A facility finished a tech-level upgrade.
    UpgradeCompleted { facility_id: u64, tech_level: u8 },

    /// A blind-hired director's personality traits became known.
    TraitsRevealed { director_id: u64 },
}
