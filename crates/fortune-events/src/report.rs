//! Run Reports
//!
//! Serializable results handed to whatever plots or analyses the outcome.
//! A report carries each individual's fixed attributes next to its final
//! property so consumers can correlate the two without the simulation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;
use crate::outcome::EncounterTally;
use crate::scenario::{RunModes, Scenario};

/// Generates a run ID with the given sequence number.
pub fn generate_run_id(sequence: u64) -> String {
    format!("run_{:04}", sequence)
}

/// One individual's attributes and its property at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    /// Position in initialization order
    pub index: usize,
    pub talent: f64,
    pub vision: f64,
    pub position: Point,
    pub property: f64,
}

/// Distribution summary of final property values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertySummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Fraction of all property held by the richest 10% (at least one individual)
    pub top_decile_share: f64,
    /// Individuals that ended above the starting property
    pub above_initial: usize,
    /// Individuals that ended below the starting property
    pub below_initial: usize,
}

/// Everything produced by a single call to the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
    pub modes: RunModes,
    pub iterations: u64,
    pub initial_property: f64,
    pub individuals: Vec<IndividualRecord>,
    pub summary: PropertySummary,
    pub tally: EncounterTally,
}

impl RunReport {
    /// Final property values in initialization order.
    pub fn properties(&self) -> Vec<f64> {
        self.individuals.iter().map(|r| r.property).collect()
    }
}

/// Repeated runs of one scenario against the same population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub batch_id: Uuid,
    pub scenario: Scenario,
    /// Name of the attribute the correlations were taken against
    pub attribute: String,
    pub iterations: u64,
    pub runs: Vec<RunReport>,
    /// Pearson correlation between attribute and final property, per run.
    /// `None` when either side has zero variance.
    pub correlations: Vec<Option<f64>>,
}

impl ScenarioReport {
    pub fn new(scenario: Scenario, iterations: u64) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            scenario,
            attribute: scenario.attribute_name().to_string(),
            iterations,
            runs: Vec::new(),
            correlations: Vec::new(),
        }
    }

    /// Mean of the defined per-run correlations
    pub fn mean_correlation(&self) -> Option<f64> {
        let defined: Vec<f64> = self.correlations.iter().flatten().copied().collect();
        if defined.is_empty() {
            return None;
        }
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }

    /// Combined tally over every run
    pub fn total_tally(&self) -> EncounterTally {
        let mut total = EncounterTally::new();
        for run in &self.runs {
            total.merge(&run.tally);
        }
        total
    }
}
