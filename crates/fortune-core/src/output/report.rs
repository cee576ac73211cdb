//! Report Output
//!
//! Turns run results into serializable reports and writes them as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use fortune_events::{IndividualRecord, RunReport, Scenario, ScenarioReport};

use crate::components::individual::IndividualProfile;
use crate::driver::{RunResult, Simulation};
use crate::output::stats::summarize_properties;

/// Pair every individual's attributes with its final property
pub fn build_run_report(
    sim: &Simulation,
    result: &RunResult,
    scenario: Option<Scenario>,
) -> RunReport {
    let individuals = sim
        .population()
        .iter()
        .zip(&result.properties)
        .enumerate()
        .map(|(index, (profile, &property))| IndividualRecord {
            index,
            talent: profile.talent,
            vision: profile.vision,
            position: profile.position,
            property,
        })
        .collect();

    RunReport {
        run_id: result.run_id.clone(),
        scenario,
        modes: result.modes,
        iterations: result.iterations,
        initial_property: sim.initial_property(),
        individuals,
        summary: summarize_properties(&result.properties, sim.initial_property()),
        tally: result.tally,
    }
}

/// Write any serializable value as pretty JSON
fn write_json<T: serde::Serialize>(value: &T, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write a run report to `<dir>/<run_id>.json`
pub fn write_report_to_dir(report: &RunReport, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", report.run_id));
    write_json(report, &path)?;
    Ok(path)
}

/// Write a scenario report to `<dir>/scenario_<name>.json`
pub fn write_scenario_report(
    report: &ScenarioReport,
    dir: impl AsRef<Path>,
) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("scenario_{}.json", report.scenario));
    write_json(report, &path)?;
    Ok(path)
}

/// Write the initial population to `<dir>/initial_population.json`
pub fn write_population(
    population: &[IndividualProfile],
    dir: impl AsRef<Path>,
) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join("initial_population.json");
    write_json(&population, &path)?;
    Ok(path)
}
