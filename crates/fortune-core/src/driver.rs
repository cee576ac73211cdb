//! Simulation Driver
//!
//! Owns the ECS world holding one population and runs it for a number of
//! iterations. Every run starts from the initial property value, so calling
//! `run` repeatedly on the same population never accumulates across calls.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use fortune_events::{generate_run_id, EncounterTally, EventField, FieldRecord, Point, RunModes};

use crate::components::individual::{IndividualIndex, IndividualProfile, LastEncounter, Property};
use crate::config::{ConfigError, SimConfig};
use crate::events::FieldLogger;
use crate::output::stats::{tally_encounters, RunTally};
use crate::setup::{sample_population, spawn_population};
use crate::systems::{
    apply_property_updates, generate_event_field, resolve_encounters, ActiveModes,
    BaseResolution, CurrentField, EventCounts, FieldSource,
};
use crate::SimRng;

/// Result of one call to the driver
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub run_id: String,
    pub modes: RunModes,
    pub iterations: u64,
    /// Final property per individual, in initialization order
    pub properties: Vec<f64>,
    pub tally: EncounterTally,
}

/// A population plus the schedule that advances it one iteration at a time
pub struct Simulation {
    world: World,
    schedule: Schedule,
    population: Vec<IndividualProfile>,
    initial_property: f64,
    progress_interval: u64,
    next_run: u64,
}

impl Simulation {
    /// Validate the config, sample a population from its seed and spawn it.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, config.simulation.seed)
    }

    /// Like `new` but with an explicit seed.
    pub fn with_seed(config: &SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let population = sample_population(config, &mut rng);

        Ok(Self::build(config, population, rng))
    }

    /// Spawn an exact population instead of sampling one. The config's
    /// population size is ignored; everything else still applies.
    pub fn from_population(
        config: &SimConfig,
        population: Vec<IndividualProfile>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if population.is_empty() {
            return Err(ConfigError::invalid("population", "must contain at least one individual"));
        }
        if let Some(profile) = population
            .iter()
            .find(|s| !(s.vision.is_finite() && s.vision > 0.0))
        {
            return Err(ConfigError::invalid(
                "population.vision",
                format!("must be a finite value above zero, got {}", profile.vision),
            ));
        }

        Ok(Self::build(config, population, SmallRng::seed_from_u64(seed)))
    }

    fn build(config: &SimConfig, population: Vec<IndividualProfile>, rng: SmallRng) -> Self {
        let mut world = World::new();

        world.insert_resource(SimRng(rng));
        world.insert_resource(EventCounts {
            lucky: config.events.lucky,
            unlucky: config.events.unlucky,
        });
        world.insert_resource(BaseResolution(config.vision.resolution));
        world.insert_resource(ActiveModes::default());
        world.insert_resource(CurrentField::default());
        world.insert_resource(FieldSource::Random);
        world.insert_resource(RunTally::default());

        spawn_population(&mut world, &population, config.population.initial_property);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                generate_event_field,
                resolve_encounters,
                apply_property_updates,
                tally_encounters,
            )
                .chain(),
        );

        tracing::info!(
            individuals = population.len(),
            lucky = config.events.lucky,
            unlucky = config.events.unlucky,
            "Population initialized"
        );

        Self {
            world,
            schedule,
            population,
            initial_property: config.population.initial_property,
            progress_interval: config.simulation.progress_interval,
            next_run: 1,
        }
    }

    /// Number of individuals
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn initial_property(&self) -> f64 {
        self.initial_property
    }

    /// Fixed attributes of every individual, in initialization order
    pub fn population(&self) -> &[IndividualProfile] {
        &self.population
    }

    pub fn talents(&self) -> Vec<f64> {
        self.population.iter().map(|s| s.talent).collect()
    }

    pub fn visions(&self) -> Vec<f64> {
        self.population.iter().map(|s| s.vision).collect()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.population.iter().map(|s| s.position).collect()
    }

    /// Run with freshly drawn event fields every iteration.
    pub fn run(&mut self, iterations: u64, modes: RunModes) -> RunResult {
        self.execute(iterations, modes, FieldSource::Random, &mut FieldLogger::null())
    }

    /// Like `run`, writing every iteration's field to `logger`.
    pub fn run_logged(
        &mut self,
        iterations: u64,
        modes: RunModes,
        logger: &mut FieldLogger,
    ) -> RunResult {
        self.execute(iterations, modes, FieldSource::Random, logger)
    }

    /// Run one iteration per supplied field instead of drawing fields.
    /// Talent gate rolls still come from the seeded generator.
    pub fn run_scripted(&mut self, fields: Vec<EventField>, modes: RunModes) -> RunResult {
        let iterations = fields.len() as u64;
        self.execute(
            iterations,
            modes,
            FieldSource::scripted(fields),
            &mut FieldLogger::null(),
        )
    }

    fn execute(
        &mut self,
        iterations: u64,
        modes: RunModes,
        source: FieldSource,
        logger: &mut FieldLogger,
    ) -> RunResult {
        let run_id = generate_run_id(self.next_run);
        self.next_run += 1;

        self.reset(modes, source);
        tracing::info!(
            run_id = %run_id,
            iterations,
            talent_gating = modes.talent_gating,
            extended_vision = modes.extended_vision,
            "Starting run"
        );

        for iteration in 0..iterations {
            self.schedule.run(&mut self.world);

            if logger.is_active() {
                let record =
                    FieldRecord::new(&run_id, iteration, &self.world.resource::<CurrentField>().0);
                if let Err(e) = logger.log(&record) {
                    tracing::warn!("Could not log event field at iteration {}: {}", iteration, e);
                }
            }

            let done = iteration + 1;
            if self.progress_interval > 0 && done % self.progress_interval == 0 {
                let tally = self.world.resource::<RunTally>().0;
                tracing::info!(
                    "[{}] iteration {} / {} (unlucky: {}, lucky: {})",
                    run_id,
                    done,
                    iterations,
                    tally.unlucky,
                    tally.lucky()
                );
            }
        }

        if let Err(e) = logger.flush() {
            tracing::warn!("Could not flush event field log: {}", e);
        }

        let properties = self.collect_properties();
        let tally = self.world.resource::<RunTally>().0;
        tracing::info!(run_id = %run_id, "Run complete");

        RunResult {
            run_id,
            modes,
            iterations,
            properties,
            tally,
        }
    }

    /// Put the world back to its pre-run state for a new run.
    fn reset(&mut self, modes: RunModes, source: FieldSource) {
        let initial = self.initial_property;

        let mut query = self.world.query::<(&mut Property, &mut LastEncounter)>();
        for (mut property, mut last) in query.iter_mut(&mut self.world) {
            property.0 = initial;
            *last = LastEncounter::default();
        }

        self.world.insert_resource(ActiveModes(modes));
        self.world.insert_resource(source);
        self.world.insert_resource(CurrentField::default());
        self.world.resource_mut::<RunTally>().reset();
    }

    fn collect_properties(&mut self) -> Vec<f64> {
        let mut query = self.world.query::<(&IndividualIndex, &Property)>();
        let mut indexed: Vec<(usize, f64)> = query
            .iter(&self.world)
            .map(|(index, property)| (index.0, property.0))
            .collect();
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, property)| property).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune_events::EventKind;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.population.size = 50;
        config.events.lucky = 20;
        config.events.unlucky = 20;
        config.vision.resolution = 0.05;
        config
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = small_config();
        config.population.size = 0;
        assert!(Simulation::new(&config).is_err());
    }

    #[test]
    fn test_from_population_rejects_bad_vision() {
        let config = small_config();
        let population = vec![IndividualProfile::new(0.5, 0.0, Point::new(0.5, 0.5))];
        assert!(Simulation::from_population(&config, population, 1).is_err());
        assert!(Simulation::from_population(&config, Vec::new(), 1).is_err());
    }

    #[test]
    fn test_run_returns_one_value_per_individual() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        let result = sim.run(10, RunModes::default());

        assert_eq!(result.properties.len(), 50);
        assert_eq!(result.iterations, 10);
        assert_eq!(result.tally.iterations, 10);
        assert_eq!(result.tally.total(), 500);
        assert!(result.properties.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_runs_do_not_accumulate() {
        let config = small_config();
        let population = vec![IndividualProfile::new(0.6, 0.1, Point::new(0.5, 0.5))];
        let mut sim = Simulation::from_population(&config, population, 3).unwrap();

        let lucky = EventField::single(EventKind::Lucky, Point::new(0.5, 0.5));
        let first = sim.run_scripted(vec![lucky.clone(), lucky.clone()], RunModes::default());
        let second = sim.run_scripted(vec![lucky.clone(), lucky], RunModes::default());

        assert_eq!(first.properties, vec![40.0]);
        assert_eq!(second.properties, vec![40.0]);
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn test_population_attributes_unchanged_by_runs() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        let talents = sim.talents();
        let visions = sim.visions();
        let positions = sim.positions();

        sim.run(5, RunModes::new(true, true));

        assert_eq!(sim.talents(), talents);
        assert_eq!(sim.visions(), visions);
        assert_eq!(sim.positions(), positions);
    }

    #[test]
    fn test_properties_in_initialization_order() {
        let config = small_config();
        let population = vec![
            IndividualProfile::new(0.6, 0.01, Point::new(0.1, 0.1)),
            IndividualProfile::new(0.6, 0.01, Point::new(0.9, 0.9)),
            IndividualProfile::new(0.6, 0.01, Point::new(0.5, 0.5)),
        ];
        let mut sim = Simulation::from_population(&config, population, 1).unwrap();

        let mut field = EventField::single(EventKind::Unlucky, Point::new(0.1, 0.1));
        field.lucky.push(Point::new(0.5, 0.5));

        let result = sim.run_scripted(vec![field], RunModes::default());
        assert_eq!(result.properties, vec![5.0, 10.0, 20.0]);
    }
}
