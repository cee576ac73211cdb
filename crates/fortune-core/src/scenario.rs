//! Scenario Runner
//!
//! Repeats one scenario several times against the same population and
//! correlates each run's outcome with the scenario's attribute.

use fortune_events::{Scenario, ScenarioReport};

use crate::driver::Simulation;
use crate::events::FieldLogger;
use crate::output::report::build_run_report;
use crate::output::stats::pearson_correlation;

/// Run `scenario` `runs` times for `iterations` iterations each
pub fn run_scenario(
    sim: &mut Simulation,
    scenario: Scenario,
    runs: usize,
    iterations: u64,
    logger: &mut FieldLogger,
) -> ScenarioReport {
    let mut report = ScenarioReport::new(scenario, iterations);

    let attributes: Vec<f64> = sim
        .population()
        .iter()
        .map(|s| scenario.attribute(s.talent, s.vision))
        .collect();

    for _ in 0..runs {
        let result = sim.run_logged(iterations, scenario.modes(), logger);
        let correlation = pearson_correlation(&attributes, &result.properties);

        match correlation {
            Some(r) => tracing::info!(
                "{} {}: correlation with {} = {:.4}",
                scenario,
                result.run_id,
                scenario.attribute_name(),
                r
            ),
            None => tracing::info!(
                "{} {}: correlation with {} undefined",
                scenario,
                result.run_id,
                scenario.attribute_name()
            ),
        }

        report.correlations.push(correlation);
        report.runs.push(build_run_report(sim, &result, Some(scenario)));
    }

    report
}
