//! Property-based tests for sampling bounds and property positivity.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use fortune_core::config::{TalentConfig, VisionConfig};
use fortune_core::setup::{sample_talent, sample_vision};
use fortune_core::{SimConfig, Simulation};
use fortune_events::RunModes;

proptest! {
    #[test]
    fn talent_always_within_bounds(seed in any::<u64>(), mean in -1.0f64..2.0, std_dev in 0.0f64..2.0) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = TalentConfig { mean, std_dev, ..TalentConfig::default() };
        for _ in 0..100 {
            let t = sample_talent(&config, &mut rng);
            prop_assert!((0.01..=0.99).contains(&t));
        }
    }

    #[test]
    fn vision_always_within_bounds(seed in any::<u64>(), resolution in 0.001f64..0.2) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = VisionConfig { resolution, ..VisionConfig::default() };
        for _ in 0..100 {
            let v = sample_vision(&config, &mut rng);
            prop_assert!(v >= resolution / 10.0 - 1e-15 && v <= resolution * 2.0 + 1e-15);
        }
    }

    #[test]
    fn property_stays_positive(
        seed in any::<u64>(),
        talent_gating in any::<bool>(),
        extended_vision in any::<bool>(),
    ) {
        let mut config = SimConfig::default();
        config.population.size = 30;
        config.events.lucky = 40;
        config.events.unlucky = 40;
        config.vision.resolution = 0.1;

        let mut sim = Simulation::with_seed(&config, seed).unwrap();
        let result = sim.run(30, RunModes::new(talent_gating, extended_vision));
        prop_assert_eq!(result.properties.len(), 30);
        prop_assert!(result.properties.iter().all(|&p| p > 0.0));
    }
}
