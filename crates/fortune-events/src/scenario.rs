//! Scenarios
//!
//! Mode flags for a run and the named scenarios built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two boolean switches that change how encounters resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RunModes {
    /// Roll against talent on every lucky hit
    pub talent_gating: bool,
    /// Check lucky events with the individual's own vision before the base radius
    pub extended_vision: bool,
}

impl RunModes {
    pub fn new(talent_gating: bool, extended_vision: bool) -> Self {
        Self {
            talent_gating,
            extended_vision,
        }
    }
}

/// A named experiment: which modes are on and which attribute the
/// outcome is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Neither mode enabled
    Baseline,
    /// Same vision, different talent
    Talent,
    /// Same talent, different vision
    Vision,
    /// Different talent, different vision
    Combined,
}

impl Scenario {
    pub fn modes(&self) -> RunModes {
        match self {
            Scenario::Baseline => RunModes::new(false, false),
            Scenario::Talent => RunModes::new(true, false),
            Scenario::Vision => RunModes::new(false, true),
            Scenario::Combined => RunModes::new(true, true),
        }
    }

    /// The per-individual value the final property is correlated against.
    pub fn attribute(&self, talent: f64, vision: f64) -> f64 {
        match self {
            Scenario::Baseline | Scenario::Talent => talent,
            Scenario::Vision => vision,
            Scenario::Combined => vision * talent,
        }
    }

    /// Axis label for the attribute
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Scenario::Baseline | Scenario::Talent => "talent",
            Scenario::Vision => "vision",
            Scenario::Combined => "vision*talent",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Talent => "talent",
            Scenario::Vision => "vision",
            Scenario::Combined => "combined",
        }
    }

    /// Returns all scenario variants.
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::Baseline,
            Scenario::Talent,
            Scenario::Vision,
            Scenario::Combined,
        ]
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scenario name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScenarioError(pub String);

impl fmt::Display for ParseScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scenario: '{}', expected one of baseline, talent, vision, combined",
            self.0
        )
    }
}

impl std::error::Error for ParseScenarioError {}

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(Scenario::Baseline),
            "talent" => Ok(Scenario::Talent),
            "vision" => Ok(Scenario::Vision),
            "combined" => Ok(Scenario::Combined),
            _ => Err(ParseScenarioError(s.to_string())),
        }
    }
}
