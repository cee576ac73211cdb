//! Property Update Rule
//!
//! Unlucky halves, lucky doubles, a miss leaves property alone. Property
//! starts positive and only ever meets these factors, so it stays positive.

use bevy_ecs::prelude::*;

use fortune_events::Encounter;

use crate::components::individual::{Individual, LastEncounter, Property};

/// New property after one encounter
pub fn apply_encounter(property: f64, encounter: &Encounter) -> f64 {
    match encounter {
        Encounter::Unlucky => property / 2.0,
        Encounter::Lucky { .. } => property * 2.0,
        Encounter::Miss => property,
    }
}

/// System applying each individual's resolved encounter to its own property
pub fn apply_property_updates(
    mut query: Query<(&LastEncounter, &mut Property), With<Individual>>,
) {
    for (last, mut property) in query.iter_mut() {
        property.0 = apply_encounter(property.0, &last.0);
    }
}
