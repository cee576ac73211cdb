//! Configuration System
//!
//! Loads simulation parameters from a TOML file so scenarios can be tuned
//! without recompiling. Every section falls back to the classic constants
//! when absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_CONFIG_PATH: &str = "fortune.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub talent: TalentConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub events: EventConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Population size and starting wealth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    pub initial_property: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            initial_property: 10.0,
        }
    }
}

/// Talent distribution: normal, clamped after sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentConfig {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for TalentConfig {
    fn default() -> Self {
        Self {
            mean: 0.6,
            std_dev: 0.1,
            min: 0.01,
            max: 0.99,
        }
    }
}

/// Vision distribution, derived from the base resolution.
///
/// Vision ~ N(resolution, resolution / std_dev_divisor), clamped to
/// `[resolution * min_factor, resolution * max_factor]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Base resolution radius, also used for the base lucky check
    pub resolution: f64,
    pub std_dev_divisor: f64,
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            resolution: 0.01,
            std_dev_divisor: 5.0,
            min_factor: 0.1,
            max_factor: 2.0,
        }
    }
}

impl VisionConfig {
    pub fn std_dev(&self) -> f64 {
        self.resolution / self.std_dev_divisor
    }

    pub fn min(&self) -> f64 {
        self.resolution * self.min_factor
    }

    pub fn max(&self) -> f64 {
        self.resolution * self.max_factor
    }
}

/// Events drawn per iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub lucky: usize,
    pub unlucky: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            lucky: 250,
            unlucky: 250,
        }
    }
}

/// Driver parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub iterations: u64,
    pub runs: usize,
    pub seed: u64,
    /// Iterations between progress log lines
    pub progress_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 80,
            runs: 6,
            seed: 42,
            progress_interval: 20,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a path if it exists, or use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject parameters that would make the simulation degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::invalid("population.size", "must be at least 1"));
        }
        if !is_positive(self.population.initial_property) {
            return Err(ConfigError::invalid(
                "population.initial_property",
                "must be a finite value above zero",
            ));
        }

        let talent = &self.talent;
        if !talent.mean.is_finite() {
            return Err(ConfigError::invalid("talent.mean", "must be finite"));
        }
        if !talent.std_dev.is_finite() || talent.std_dev < 0.0 {
            return Err(ConfigError::invalid("talent.std_dev", "must be finite and non-negative"));
        }
        if !(0.0..=1.0).contains(&talent.min) || !(0.0..=1.0).contains(&talent.max) {
            return Err(ConfigError::invalid("talent", "bounds must lie within [0, 1]"));
        }
        if talent.min > talent.max {
            return Err(ConfigError::invalid("talent", "min must not exceed max"));
        }

        let vision = &self.vision;
        if !is_positive(vision.resolution) {
            return Err(ConfigError::invalid(
                "vision.resolution",
                "must be a finite value above zero",
            ));
        }
        if !is_positive(vision.std_dev_divisor) {
            return Err(ConfigError::invalid(
                "vision.std_dev_divisor",
                "must be a finite value above zero",
            ));
        }
        if !is_positive(vision.min_factor) {
            return Err(ConfigError::invalid(
                "vision.min_factor",
                "must be a finite value above zero",
            ));
        }
        if !vision.max_factor.is_finite() || vision.min_factor > vision.max_factor {
            return Err(ConfigError::invalid("vision", "min_factor must not exceed max_factor"));
        }

        if self.simulation.iterations == 0 {
            return Err(ConfigError::invalid("simulation.iterations", "must be at least 1"));
        }
        if self.simulation.runs == 0 {
            return Err(ConfigError::invalid("simulation.runs", "must be at least 1"));
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.population.size, 1000);
        assert_eq!(config.population.initial_property, 10.0);
        assert_eq!(config.events.lucky, 250);
        assert_eq!(config.events.unlucky, 250);
        assert_eq!(config.simulation.iterations, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_vision_bounds_derived_from_resolution() {
        let vision = VisionConfig::default();
        assert!((vision.std_dev() - 0.002).abs() < 1e-12);
        assert!((vision.min() - 0.001).abs() < 1e-12);
        assert!((vision.max() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [population]
            size = 50

            [events]
            lucky = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.population.size, 50);
        assert_eq!(config.population.initial_property, 10.0);
        assert_eq!(config.events.lucky, 10);
        assert_eq!(config.events.unlucky, 250);
        assert_eq!(config.talent, TalentConfig::default());
    }

    #[test]
    fn test_zero_population_rejected() {
        let err = SimConfig::from_toml_str("[population]\nsize = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "population.size"));
    }

    #[test]
    fn test_bad_resolution_rejected() {
        let mut config = SimConfig::default();
        config.vision.resolution = 0.0;
        assert!(config.validate().is_err());

        config.vision.resolution = -0.01;
        assert!(config.validate().is_err());

        config.vision.resolution = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_talent_bounds_rejected() {
        let mut config = SimConfig::default();
        config.talent.min = 0.9;
        config.talent.max = 0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_event_counts_allowed() {
        let mut config = SimConfig::default();
        config.events.lucky = 0;
        config.events.unlucky = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_count_is_parse_error() {
        let err = SimConfig::from_toml_str("[events]\nlucky = -5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let mut config = SimConfig::default();
        config.simulation.seed = 7;
        let toml = config.to_toml().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let loaded = SimConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SimConfig::load_or_default("definitely/not/here.toml");
        assert_eq!(config, SimConfig::default());
    }
}
