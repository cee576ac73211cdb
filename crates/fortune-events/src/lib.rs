//! Shared event types and serialization for the fortune simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the simulation crate and for anything that reads
//! its output (plotting scripts, notebooks, replay tooling).

pub mod event;
pub mod geometry;
pub mod outcome;
pub mod report;
pub mod scenario;

// Re-export geometry types
pub use geometry::Point;

// Re-export event types
pub use event::{EventField, EventKind, FieldRecord, FortuneEvent};

// Re-export outcome types
pub use outcome::{Encounter, EncounterTally, LuckyPath};

// Re-export scenario types
pub use scenario::{ParseScenarioError, RunModes, Scenario};

// Re-export report types
pub use report::{
    generate_run_id, IndividualRecord, PropertySummary, RunReport, ScenarioReport,
};
