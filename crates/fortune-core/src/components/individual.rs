//! Individual Components
//!
//! Components for population members. Everything except `Property` and
//! `LastEncounter` is fixed once the population is spawned.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use fortune_events::{Encounter, Point};

/// Marker component identifying an entity as a population member
#[derive(Component, Debug, Clone, Default)]
pub struct Individual;

/// Position in initialization order, used to report results in that order
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndividualIndex(pub usize);

/// Skill in `[talent.min, talent.max]`
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Talent(pub f64);

/// Perceptual radius used for unlucky checks and extended-vision lucky checks
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vision(pub f64);

/// Fixed location in the unit square
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Point);

/// Accumulated wealth, the only value the simulation mutates
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Property(pub f64);

/// Outcome resolved for this individual in the current iteration
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LastEncounter(pub Encounter);

/// Plain description of an individual, used to spawn a population with
/// exact attributes instead of sampled ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndividualProfile {
    pub talent: f64,
    pub vision: f64,
    pub position: Point,
}

impl IndividualProfile {
    pub fn new(talent: f64, vision: f64, position: Point) -> Self {
        Self {
            talent,
            vision,
            position,
        }
    }
}
