//! Sampling
//!
//! The random draws the simulation consumes: normal values, unit-interval
//! values, and points in the unit square. Every draw comes from the seeded
//! `SmallRng` so a run is reproducible from its seed.

use rand::rngs::SmallRng;
use rand::Rng;

use fortune_events::Point;

/// Draw from N(mean, std_dev) using the Box-Muller transform
pub fn normal(rng: &mut SmallRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + std_dev * z
}

/// Uniform draw in `[0, 1)`
pub fn unit(rng: &mut SmallRng) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point in the unit square
pub fn uniform_point(rng: &mut SmallRng) -> Point {
    let x = rng.gen::<f64>();
    let y = rng.gen::<f64>();
    Point::new(x, y)
}

/// `count` independent uniform points
pub fn uniform_points(rng: &mut SmallRng, count: usize) -> Vec<Point> {
    (0..count).map(|_| uniform_point(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_normal_moments() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let samples: Vec<f64> = (0..20_000).map(|_| normal(&mut rng, 0.6, 0.1)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!((mean - 0.6).abs() < 0.01, "mean was {}", mean);
        assert!((var.sqrt() - 0.1).abs() < 0.01, "std dev was {}", var.sqrt());
    }

    #[test]
    fn test_zero_std_dev_returns_mean() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(normal(&mut rng, 0.25, 0.0), 0.25);
        }
    }

    #[test]
    fn test_points_in_unit_square() {
        let mut rng = SmallRng::seed_from_u64(99);
        let points = uniform_points(&mut rng, 500);
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| p.in_unit_square()));
    }

    #[test]
    fn test_unit_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = unit(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }
}
