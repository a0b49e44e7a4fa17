use std::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::director::ResearchDirector;
use super::timestamp::GameDate;

pub const MAX_TECH_LEVEL: u8 = 10;

/// Errors from facility commands a correct caller never triggers.
#[derive(Debug, Error, PartialEq)]
pub enum FacilityError {
    #[error("facility is already engaged in a long-running operation")]
    AlreadyEngaged,
    #[error("no director assigned")]
    NoDirector,
    #[error("invalid tech level {requested} (current: {current}, max: {max})", max = MAX_TECH_LEVEL)]
    InvalidTechLevel { current: u8, requested: u8 },
}

/// Facility specialization. Retooling moves between these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    SmallArms,
    Artillery,
    Armor,
    Aerospace,
    Rotorcraft,
    Naval,
    Missiles,
    Electronics,
    Optics,
    Propulsion,
    Munitions,
}

/// Project complexity tier, 1–5. Base monthly progress is deliberately
/// inverse: harder projects crawl.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Trivial,
    Simple,
    Moderate,
    Complex,
    Breakthrough,
}

impl Complexity {
    pub fn tier(self) -> u8 {
        match self {
            Complexity::Trivial => 1,
            Complexity::Simple => 2,
            Complexity::Moderate => 3,
            Complexity::Complex => 4,
            Complexity::Breakthrough => 5,
        }
    }

    /// Base progress points gained per month at this tier.
    pub fn base_monthly_progress(self) -> f64 {
        match self {
            Complexity::Trivial => 40.0,
            Complexity::Simple => 25.0,
            Complexity::Moderate => 15.0,
            Complexity::Complex => 10.0,
            Complexity::Breakthrough => 5.0,
        }
    }
}

/// Project unpredictability tier, 1–5, controlling monthly variance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unpredictability {
    Routine,
    Steady,
    Variable,
    Volatile,
    Chaotic,
}

impl Unpredictability {
    pub fn tier(self) -> u8 {
        match self {
            Unpredictability::Routine => 1,
            Unpredictability::Steady => 2,
            Unpredictability::Variable => 3,
            Unpredictability::Volatile => 4,
            Unpredictability::Chaotic => 5,
        }
    }

    /// Fraction of base progress the monthly draw can swing by.
    pub fn variance_fraction(self) -> f64 {
        match self {
            Unpredictability::Routine => 0.1,
            Unpredictability::Steady => 0.25,
            Unpredictability::Variable => 0.4,
            Unpredictability::Volatile => 0.6,
            Unpredictability::Chaotic => 0.8,
        }
    }
}

/// Definition of a research project before launch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    /// Launch cost before director modifiers, in thousands. Base
    /// monthly cost is one tenth of this.
    pub base_cost: f64,
    pub complexity: Complexity,
    pub unpredictability: Unpredictability,
    /// Facility tech level required to run this project, if gated.
    pub required_tech_level: Option<u8>,
}

impl ProjectSpec {
    pub fn base_monthly_cost(&self) -> f64 {
        self.base_cost / 10.0
    }
}

/// A project in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveProject {
    pub spec: ProjectSpec,
    /// 0–100, monotonically non-decreasing until completion.
    pub progress: f64,
    /// Launch cost actually paid (post director modifiers).
    pub launch_cost: f64,
    /// Monthly cost actually billed (post director modifiers).
    pub monthly_cost: f64,
    pub months_elapsed: u32,
    /// Raw per-month progress deltas, for completion-time estimation.
    pub monthly_deltas: Vec<f64>,
    pub started: GameDate,
}

/// A finished project, kept for the facility's record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedProject {
    pub name: String,
    pub months_taken: u32,
    pub launch_cost: f64,
}

/// Coarse progress bucket exposed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    JustStarted,
    EarlyStages,
    MakingProgress,
    WellUnderway,
    NearlyComplete,
}

impl ProgressBand {
    fn from_progress(progress: f64) -> Self {
        if progress < 10.0 {
            ProgressBand::JustStarted
        } else if progress < 30.0 {
            ProgressBand::EarlyStages
        } else if progress < 60.0 {
            ProgressBand::MakingProgress
        } else if progress < 85.0 {
            ProgressBand::WellUnderway
        } else {
            ProgressBand::NearlyComplete
        }
    }
}

impl fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressBand::JustStarted => "just started",
            ProgressBand::EarlyStages => "early stages",
            ProgressBand::MakingProgress => "making progress",
            ProgressBand::WellUnderway => "well underway",
            ProgressBand::NearlyComplete => "nearly complete",
        };
        f.write_str(label)
    }
}

/// The one long-running operation a facility can be engaged in.
/// Modeled as a single tagged state so "researching while upgrading"
/// is unrepresentable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Activity {
    Idle,
    Researching(ActiveProject),
    Retooling {
        target: FacilityKind,
        months_remaining: u32,
    },
    Upgrading {
        target_level: u8,
        months_remaining: u32,
        monthly_maintenance: f64,
    },
}

/// A research laboratory owned by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResearchFacility {
    pub id: u64,
    pub name: String,
    /// Country the facility operates in.
    pub location: u64,
    pub kind: FacilityKind,
    /// 1–10; gates which projects may run here.
    pub tech_level: u8,
    pub director_id: Option<u64>,
    pub activity: Activity,
    pub completed: Vec<CompletedProject>,
}

impl ResearchFacility {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        location: u64,
        kind: FacilityKind,
        tech_level: u8,
    ) -> Self {
        assert!(
            (1..=MAX_TECH_LEVEL).contains(&tech_level),
            "tech level out of range: {tech_level}"
        );
        Self {
            id,
            name: name.into(),
            location,
            kind,
            tech_level,
            director_id: None,
            activity: Activity::Idle,
            completed: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.activity, Activity::Idle)
    }

    /// Attach a director. Fails if the facility already has one or the
    /// director is employed elsewhere. Keeps both sides of the
    /// availability invariant in step.
    pub fn assign_director(&mut self, director: &mut ResearchDirector) -> bool {
        if self.director_id.is_some() || !director.is_available() {
            return false;
        }
        self.director_id = Some(director.id);
        director.employment = super::director::Employment::Assigned {
            facility_id: self.id,
        };
        true
    }

    /// Detach the current director. Refused mid-project: a running
    /// project needs its director every month.
    pub fn remove_director(&mut self, director: &mut ResearchDirector) -> bool {
        if self.director_id != Some(director.id) {
            return false;
        }
        if matches!(self.activity, Activity::Researching(_)) {
            return false;
        }
        self.director_id = None;
        director.employment = super::director::Employment::Unemployed;
        true
    }

    /// A project can start only when idle, directed, and within the
    /// facility's tech gate (unless the director ignores it).
    pub fn can_start_project(&self, project: &ProjectSpec, director: &ResearchDirector) -> bool {
        if !self.is_idle() || self.director_id != Some(director.id) {
            return false;
        }
        match project.required_tech_level {
            Some(required) => {
                self.tech_level >= required || director.trait_effects().ignores_tech_gate
            }
            None => true,
        }
    }

    /// Launch a project. Returns false (and changes nothing) when the
    /// preconditions fail. Costs are fixed at launch from the
    /// director's current trait effects.
    pub fn start_project(
        &mut self,
        project: ProjectSpec,
        director: &ResearchDirector,
        date: GameDate,
    ) -> bool {
        if !self.can_start_project(&project, director) {
            return false;
        }
        let launch_cost = director.project_cost(project.base_cost);
        let monthly_cost = director.monthly_cost(project.base_monthly_cost(), project.complexity);
        self.activity = Activity::Researching(ActiveProject {
            spec: project,
            progress: 0.0,
            launch_cost,
            monthly_cost,
            months_elapsed: 0,
            monthly_deltas: Vec::new(),
            started: date,
        });
        true
    }

    /// Simulate one month of research. Returns the released monthly
    /// cost when the project completes this month, 0.0 otherwise —
    /// the non-zero return is the only completion signal.
    ///
    /// # Panics
    /// Panics if the given director is not the assigned one.
    pub fn advance_research(
        &mut self,
        director: &mut ResearchDirector,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let Activity::Researching(active) = &mut self.activity else {
            return 0.0;
        };
        assert_eq!(
            self.director_id,
            Some(director.id),
            "advance_research: director {} is not assigned to facility {}",
            director.id,
            self.id
        );

        active.months_elapsed += 1;

        let effects = director.trait_effects();
        let base = active.spec.complexity.base_monthly_progress();
        // Variance capped at 1.0 so the draw can never send progress
        // backwards, even under trait-amplified chaos.
        let variance = (active.spec.unpredictability.variance_fraction()
            * effects.unpredictability_modifier)
            .min(1.0);
        let multiplier = rng.random_range(1.0 - variance..=1.0 + variance);
        let mut delta = base * multiplier;

        if effects.breakthrough_chance > 0.0
            && rng.random_bool(effects.breakthrough_chance.clamp(0.0, 1.0))
        {
            delta *= 2.0;
        }
        delta /= effects.time_modifier;

        active.monthly_deltas.push(delta);
        active.progress = (active.progress + delta).min(100.0);

        if active.progress < 100.0 {
            return 0.0;
        }

        let Activity::Researching(finished) = std::mem::replace(&mut self.activity, Activity::Idle)
        else {
            unreachable!();
        };
        director.completed_projects += 1;
        self.completed.push(CompletedProject {
            name: finished.spec.name,
            months_taken: finished.months_elapsed,
            launch_cost: finished.launch_cost,
        });
        finished.monthly_cost
    }

    /// Begin converting the facility to a new specialization. Refused
    /// while any long-running operation is active.
    pub fn start_retooling(&mut self, target: FacilityKind, months: u32) -> bool {
        if !self.is_idle() || target == self.kind {
            return false;
        }
        assert!(months > 0, "retooling takes at least one month");
        self.activity = Activity::Retooling {
            target,
            months_remaining: months,
        };
        true
    }

    /// Advance retooling by one month. Returns true on the month the
    /// conversion lands.
    pub fn advance_retooling(&mut self) -> bool {
        let Activity::Retooling {
            target,
            months_remaining,
        } = &mut self.activity
        else {
            return false;
        };
        *months_remaining -= 1;
        if *months_remaining > 0 {
            return false;
        }
        self.kind = *target;
        self.activity = Activity::Idle;
        true
    }

    /// Begin a tech-level upgrade. Unlike `start_retooling` this
    /// errors: the UI should never offer it on a busy facility or with
    /// an out-of-range target.
    pub fn start_upgrade(
        &mut self,
        target_level: u8,
        months: u32,
        monthly_maintenance: f64,
    ) -> Result<(), FacilityError> {
        if !self.is_idle() {
            return Err(FacilityError::AlreadyEngaged);
        }
        if target_level <= self.tech_level || target_level > MAX_TECH_LEVEL {
            return Err(FacilityError::InvalidTechLevel {
                current: self.tech_level,
                requested: target_level,
            });
        }
        assert!(months > 0, "upgrade takes at least one month");
        self.activity = Activity::Upgrading {
            target_level,
            months_remaining: months,
            monthly_maintenance,
        };
        Ok(())
    }

    /// Advance an upgrade by one month. Returns true on completion.
    pub fn process_upgrade(&mut self) -> bool {
        let Activity::Upgrading {
            target_level,
            months_remaining,
            ..
        } = &mut self.activity
        else {
            return false;
        };
        *months_remaining -= 1;
        if *months_remaining > 0 {
            return false;
        }
        self.tech_level = *target_level;
        self.activity = Activity::Idle;
        true
    }

    /// Coarse progress description, if a project is running.
    pub fn progress_band(&self) -> Option<ProgressBand> {
        match &self.activity {
            Activity::Researching(active) => Some(ProgressBand::from_progress(active.progress)),
            _ => None,
        }
    }

    /// Projected months to completion as a `[min, max]` range.
    ///
    /// Capability-gated, not an error path: `None` unless the director
    /// can estimate, a project is running, and at least two monthly
    /// deltas are recorded. The range widens by ±(unpredictability
    /// tier × 0.2) around the mean-rate projection.
    pub fn time_estimate(&self, director: &ResearchDirector) -> Option<(u32, u32)> {
        if !director.trait_effects().can_estimate_time {
            return None;
        }
        let Activity::Researching(active) = &self.activity else {
            return None;
        };
        if active.monthly_deltas.len() < 2 {
            return None;
        }
        let mean =
            active.monthly_deltas.iter().sum::<f64>() / active.monthly_deltas.len() as f64;
        if mean <= 0.0 {
            return None;
        }
        let remaining = 100.0 - active.progress;
        let months = remaining / mean;
        let spread = active.spec.unpredictability.tier() as f64 * 0.2;
        let min = (months * (1.0 - spread)).max(1.0).ceil() as u32;
        let max = (months * (1.0 + spread)).max(1.0).ceil() as u32;
        Some((min, max))
    }

    /// Monthly outlay from the current activity: project billing while
    /// researching, maintenance while upgrading, nothing otherwise.
    /// Director salary is billed by the host, not included here.
    pub fn total_monthly_cost(&self) -> f64 {
        match &self.activity {
            Activity::Researching(active) => active.monthly_cost,
            Activity::Upgrading {
                monthly_maintenance,
                ..
            } => *monthly_maintenance,
            _ => 0.0,
        }
    }
}
