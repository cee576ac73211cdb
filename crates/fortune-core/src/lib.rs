//! Luck versus talent simulation engine.
//!
//! A fixed population sits in the unit square while lucky and unlucky
//! point-events rain down each iteration. Landing near an unlucky event
//! halves an individual's property, landing near a lucky one doubles it.
//! The interesting output is how final property relates to talent and
//! vision.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod output;
pub mod scenario;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, SimConfig};
pub use driver::{RunResult, Simulation};
pub use error::{Result, SimError};
pub use scenario::run_scenario;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
