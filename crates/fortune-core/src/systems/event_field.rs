//! Event Field Generator
//!
//! Draws a fresh set of lucky and unlucky event positions every iteration.
//! Fields can also be scripted, which replays exact positions instead of
//! drawing them.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use std::collections::VecDeque;

use fortune_events::EventField;

use crate::setup::sampling::uniform_points;
use crate::SimRng;

/// Number of events drawn per iteration
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCounts {
    pub lucky: usize,
    pub unlucky: usize,
}

/// The field active for the current iteration
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentField(pub EventField);

/// Where each iteration's field comes from
#[derive(Resource, Debug, Clone, Default)]
pub enum FieldSource {
    /// Independent uniform draws from `SimRng`
    #[default]
    Random,
    /// Pre-built fields consumed one per iteration. An exhausted queue
    /// yields empty fields.
    Scripted(VecDeque<EventField>),
}

impl FieldSource {
    pub fn scripted(fields: impl IntoIterator<Item = EventField>) -> Self {
        FieldSource::Scripted(fields.into_iter().collect())
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self, FieldSource::Scripted(_))
    }
}

/// Draw a fresh field: lucky positions first, then unlucky.
pub fn sample_event_field(counts: &EventCounts, rng: &mut SmallRng) -> EventField {
    let lucky = uniform_points(rng, counts.lucky);
    let unlucky = uniform_points(rng, counts.unlucky);
    EventField::new(lucky, unlucky)
}

/// System replacing the current field at the start of each iteration
pub fn generate_event_field(
    counts: Res<EventCounts>,
    mut source: ResMut<FieldSource>,
    mut rng: ResMut<SimRng>,
    mut current: ResMut<CurrentField>,
) {
    current.0 = match &mut *source {
        FieldSource::Random => sample_event_field(&counts, &mut rng.0),
        FieldSource::Scripted(queue) => queue.pop_front().unwrap_or_default(),
    };
}
