//! Encounter Outcomes
//!
//! What happened to one individual during one iteration, and running counts
//! of those outcomes.

use serde::{Deserialize, Serialize};

/// Which check produced a lucky hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckyPath {
    /// Hit using the individual's own vision radius (extended-vision mode)
    Vision,
    /// Hit using the population-wide base resolution
    Base,
}

/// Resolved outcome for one individual in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Encounter {
    /// No event in range
    #[default]
    Miss,
    /// In range of at least one unlucky event
    Unlucky,
    /// In range of at least one lucky event and no unlucky event
    Lucky {
        path: LuckyPath,
        /// Result of the talent gate roll, `None` when gating is off.
        /// The doubling applies either way.
        talent_gate: Option<bool>,
    },
}

impl Encounter {
    pub fn is_lucky(&self) -> bool {
        matches!(self, Encounter::Lucky { .. })
    }

    pub fn is_unlucky(&self) -> bool {
        matches!(self, Encounter::Unlucky)
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Encounter::Miss)
    }
}

/// Counts of encounter outcomes, accumulated over individuals and iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncounterTally {
    pub iterations: u64,
    pub unlucky: u64,
    pub lucky_vision: u64,
    pub lucky_base: u64,
    pub misses: u64,
    pub gate_passed: u64,
    pub gate_failed: u64,
}

impl EncounterTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a single individual's outcome
    pub fn record(&mut self, encounter: &Encounter) {
        match encounter {
            Encounter::Miss => self.misses += 1,
            Encounter::Unlucky => self.unlucky += 1,
            Encounter::Lucky { path, talent_gate } => {
                match path {
                    LuckyPath::Vision => self.lucky_vision += 1,
                    LuckyPath::Base => self.lucky_base += 1,
                }
                match talent_gate {
                    Some(true) => self.gate_passed += 1,
                    Some(false) => self.gate_failed += 1,
                    None => {}
                }
            }
        }
    }

    /// Total lucky hits over both paths
    pub fn lucky(&self) -> u64 {
        self.lucky_vision + self.lucky_base
    }

    /// Total outcomes recorded
    pub fn total(&self) -> u64 {
        self.unlucky + self.lucky() + self.misses
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: &EncounterTally) {
        self.iterations += other.iterations;
        self.unlucky += other.unlucky;
        self.lucky_vision += other.lucky_vision;
        self.lucky_base += other.lucky_base;
        self.misses += other.misses;
        self.gate_passed += other.gate_passed;
        self.gate_failed += other.gate_failed;
    }
}
