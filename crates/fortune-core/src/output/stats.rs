//! Statistics
//!
//! Encounter tallies collected while a run is in progress, plus summary
//! statistics over the final property vector.

use bevy_ecs::prelude::*;

use fortune_events::{EncounterTally, PropertySummary};

use crate::components::individual::{Individual, LastEncounter};

/// Resource accumulating encounter outcomes for the current run
#[derive(Resource, Debug, Default)]
pub struct RunTally(pub EncounterTally);

impl RunTally {
    pub fn reset(&mut self) {
        self.0 = EncounterTally::new();
    }
}

/// System counting this iteration's outcomes. Runs last in the iteration.
pub fn tally_encounters(
    mut tally: ResMut<RunTally>,
    query: Query<&LastEncounter, With<Individual>>,
) {
    tally.0.iterations += 1;
    for last in query.iter() {
        tally.0.record(&last.0);
    }
}

/// Summarize a property vector. `initial` is the starting property, used
/// for the above/below counts.
pub fn summarize_properties(properties: &[f64], initial: f64) -> PropertySummary {
    if properties.is_empty() {
        return PropertySummary::default();
    }

    let mut sorted = properties.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let total: f64 = sorted.iter().sum();
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let decile = (count / 10).max(1);
    let top: f64 = sorted.iter().rev().take(decile).sum();

    PropertySummary {
        count,
        mean: total / count as f64,
        median,
        min: sorted[0],
        max: sorted[count - 1],
        top_decile_share: if total > 0.0 { top / total } else { 0.0 },
        above_initial: sorted.iter().filter(|&&p| p > initial).count(),
        below_initial: sorted.iter().filter(|&&p| p < initial).count(),
    }
}

/// Pearson correlation coefficient. `None` for mismatched or too-short
/// inputs, or when either side has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
