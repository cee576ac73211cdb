//! Population Initializer
//!
//! Draws talent, vision and position for every individual and spawns them
//! into the ECS world. Out-of-range draws are clamped, not redrawn, so the
//! resulting distributions pile up at the bounds.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

use crate::components::individual::{
    Individual, IndividualIndex, IndividualProfile, LastEncounter, Position, Property, Talent, Vision,
};
use crate::config::{SimConfig, TalentConfig, VisionConfig};
use crate::setup::sampling::{normal, uniform_point};

/// Draw one talent value
pub fn sample_talent(config: &TalentConfig, rng: &mut SmallRng) -> f64 {
    normal(rng, config.mean, config.std_dev).clamp(config.min, config.max)
}

/// Draw one vision radius
pub fn sample_vision(config: &VisionConfig, rng: &mut SmallRng) -> f64 {
    normal(rng, config.resolution, config.std_dev()).clamp(config.min(), config.max())
}

/// Draw attributes for the whole population.
///
/// Talents are drawn for everyone first, then visions, then positions.
pub fn sample_population(config: &SimConfig, rng: &mut SmallRng) -> Vec<IndividualProfile> {
    let size = config.population.size;

    let talents: Vec<f64> = (0..size).map(|_| sample_talent(&config.talent, rng)).collect();
    let visions: Vec<f64> = (0..size).map(|_| sample_vision(&config.vision, rng)).collect();
    let positions: Vec<_> = (0..size).map(|_| uniform_point(rng)).collect();

    talents
        .into_iter()
        .zip(visions)
        .zip(positions)
        .map(|((talent, vision), position)| IndividualProfile::new(talent, vision, position))
        .collect()
}

/// Spawn one entity per profile, in order
pub fn spawn_population(
    world: &mut World,
    profiles: &[IndividualProfile],
    initial_property: f64,
) -> Vec<Entity> {
    let mut spawned_entities = Vec::with_capacity(profiles.len());

    for (i, profile) in profiles.iter().enumerate() {
        let entity = world
            .spawn((
                Individual,
                IndividualIndex(i),
                Talent(profile.talent),
                Vision(profile.vision),
                Position(profile.position),
                Property(initial_property),
                LastEncounter::default(),
            ))
            .id();

        spawned_entities.push(entity);
    }

    spawned_entities
}

/// Summary stats for a population. `talent_bounds` are the clamp bounds,
/// used to count clamped draws.
pub fn summarize_population(
    population: &[IndividualProfile],
    talent_bounds: (f64, f64),
) -> PopulationSummary {
    let mut summary = PopulationSummary {
        total: 0,
        talent_mean: 0.0,
        talent_min: f64::INFINITY,
        talent_max: f64::NEG_INFINITY,
        vision_mean: 0.0,
        vision_min: f64::INFINITY,
        vision_max: f64::NEG_INFINITY,
        talent_at_bounds: 0,
    };

    for profile in population {
        summary.total += 1;
        summary.talent_mean += profile.talent;
        summary.talent_min = summary.talent_min.min(profile.talent);
        summary.talent_max = summary.talent_max.max(profile.talent);
        summary.vision_mean += profile.vision;
        summary.vision_min = summary.vision_min.min(profile.vision);
        summary.vision_max = summary.vision_max.max(profile.vision);
        if profile.talent == talent_bounds.0 || profile.talent == talent_bounds.1 {
            summary.talent_at_bounds += 1;
        }
    }

    if summary.total > 0 {
        summary.talent_mean /= summary.total as f64;
        summary.vision_mean /= summary.total as f64;
    }

    summary
}

/// Summary of a population's fixed attributes
#[derive(Debug, Clone)]
pub struct PopulationSummary {
    pub total: usize,
    pub talent_mean: f64,
    pub talent_min: f64,
    pub talent_max: f64,
    pub vision_mean: f64,
    pub vision_min: f64,
    pub vision_max: f64,
    /// Individuals whose talent draw was clamped onto a bound
    pub talent_at_bounds: usize,
}

impl std::fmt::Display for PopulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total individuals: {}", self.total)?;
        writeln!(
            f,
            "Talent: mean {:.3}, range [{:.3}, {:.3}], {} clamped",
            self.talent_mean, self.talent_min, self.talent_max, self.talent_at_bounds
        )?;
        writeln!(
            f,
            "Vision: mean {:.4}, range [{:.4}, {:.4}]",
            self.vision_mean, self.vision_min, self.vision_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune_events::Point;
    use rand::SeedableRng;

    #[test]
    fn test_talent_clamped() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let config = TalentConfig::default();
        for _ in 0..5000 {
            let t = sample_talent(&config, &mut rng);
            assert!((0.01..=0.99).contains(&t));
        }
    }

    #[test]
    fn test_clamp_creates_point_mass() {
        let mut rng = SmallRng::seed_from_u64(12345);
        // Wide distribution so most draws fall outside the bounds
        let config = TalentConfig {
            mean: 0.5,
            std_dev: 5.0,
            min: 0.01,
            max: 0.99,
        };

        let draws: Vec<f64> = (0..1000).map(|_| sample_talent(&config, &mut rng)).collect();
        let at_min = draws.iter().filter(|&&t| t == 0.01).count();
        let at_max = draws.iter().filter(|&&t| t == 0.99).count();

        assert!(at_min > 100, "expected many draws clamped to min, got {}", at_min);
        assert!(at_max > 100, "expected many draws clamped to max, got {}", at_max);
    }

    #[test]
    fn test_vision_clamped() {
        let mut rng = SmallRng::seed_from_u64(4242);
        let config = VisionConfig {
            std_dev_divisor: 0.5,
            ..VisionConfig::default()
        };
        for _ in 0..5000 {
            let v = sample_vision(&config, &mut rng);
            assert!(v >= config.min() && v <= config.max());
        }
    }

    #[test]
    fn test_sample_population_size() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut config = SimConfig::default();
        config.population.size = 37;

        let profiles = sample_population(&config, &mut rng);
        assert_eq!(profiles.len(), 37);
        assert!(profiles.iter().all(|s| s.position.in_unit_square()));
    }

    #[test]
    fn test_spawn_population() {
        let mut world = World::new();
        let profiles = vec![
            IndividualProfile::new(0.5, 0.01, Point::new(0.1, 0.1)),
            IndividualProfile::new(0.99, 0.02, Point::new(0.9, 0.9)),
        ];

        let entities = spawn_population(&mut world, &profiles, 10.0);
        assert_eq!(entities.len(), 2);

        let second = world.get::<IndividualIndex>(entities[1]).unwrap();
        assert_eq!(second.0, 1);
        let property = world.get::<Property>(entities[0]).unwrap();
        assert_eq!(property.0, 10.0);

        let summary = summarize_population(&profiles, (0.01, 0.99));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.talent_at_bounds, 1);
        assert!((summary.vision_mean - 0.015).abs() < 1e-12);
    }
}
