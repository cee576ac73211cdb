//! Encounter Resolver
//!
//! Decides, per individual and iteration, whether an unlucky or lucky event
//! was in range. Checks run in priority order and the first match wins:
//!
//! 1. any unlucky event within the individual's vision
//! 2. (extended vision only) any lucky event within the individual's vision
//! 3. any lucky event within the base resolution
//!
//! A hit means squared distance strictly below the squared radius, so an
//! event exactly on the circle does not count.

use bevy_ecs::prelude::*;
use rand::Rng;

use fortune_events::{Encounter, EventField, LuckyPath, Point, RunModes};

use crate::components::individual::{Individual, LastEncounter, Position, Talent, Vision};
use crate::systems::event_field::CurrentField;
use crate::SimRng;

/// Population-wide radius for the base lucky check
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BaseResolution(pub f64);

/// Modes in effect for the current run
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveModes(pub RunModes);

/// Circle test with an exclusive boundary
pub fn in_range(position: &Point, event: &Point, radius: f64) -> bool {
    position.distance_squared(event) < radius * radius
}

/// True if any event lies in range; one hit is enough
pub fn meets_any(position: &Point, events: &[Point], radius: f64) -> bool {
    events.iter().any(|event| in_range(position, event, radius))
}

/// Resolve one individual's encounter against the field.
///
/// `gate_roll` is the individual's uniform draw for this iteration and is
/// only consulted when talent gating is on. Whether the roll lands under the
/// talent is recorded on the outcome but a lucky hit doubles property on
/// both sides of the gate.
pub fn resolve_encounter(
    position: &Point,
    vision: f64,
    talent: f64,
    field: &EventField,
    base_resolution: f64,
    modes: RunModes,
    gate_roll: Option<f64>,
) -> Encounter {
    if meets_any(position, &field.unlucky, vision) {
        return Encounter::Unlucky;
    }

    let talent_gate = if modes.talent_gating {
        gate_roll.map(|roll| roll < talent)
    } else {
        None
    };

    if modes.extended_vision && meets_any(position, &field.lucky, vision) {
        return Encounter::Lucky {
            path: LuckyPath::Vision,
            talent_gate,
        };
    }

    if meets_any(position, &field.lucky, base_resolution) {
        return Encounter::Lucky {
            path: LuckyPath::Base,
            talent_gate,
        };
    }

    Encounter::Miss
}

/// System resolving every individual against the current field.
///
/// With talent gating on, each individual draws one gate roll per
/// iteration whether or not it ends up hitting anything.
pub fn resolve_encounters(
    field: Res<CurrentField>,
    modes: Res<ActiveModes>,
    resolution: Res<BaseResolution>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(&Position, &Vision, &Talent, &mut LastEncounter), With<Individual>>,
) {
    let modes = modes.0;

    for (position, vision, talent, mut last) in query.iter_mut() {
        let gate_roll = if modes.talent_gating {
            Some(rng.0.gen::<f64>())
        } else {
            None
        };

        last.0 = resolve_encounter(
            &position.0,
            vision.0,
            talent.0,
            &field.0,
            resolution.0,
            modes,
            gate_roll,
        );
    }
}
