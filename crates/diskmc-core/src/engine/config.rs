use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("Failed to read config file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameters of a hard-disk simulation.
///
/// Every field has a default matching the canonical 16×16 box of 100 disks, so
/// a TOML file only needs to name the fields it overrides. Construct via
/// [`SimulationConfig::builder`] or [`SimulationConfig::from_toml_path`]; both
/// validate before handing the config to the engine, which treats it as
/// trusted from then on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Box extent along x.
    pub box_width: f64,
    /// Box extent along y.
    pub box_height: f64,
    /// Number of disks placed at construction.
    pub number_particles: usize,
    /// Hard-core interaction distance; for equal disks, the particle diameter.
    pub cutoff: f64,
    /// Radius assigned to every disk.
    pub particle_radius: f64,
    /// RNG seed; derived from the system clock when absent.
    pub seed: Option<u64>,
    /// Trials between step-size recalibrations.
    pub control_window: u64,
    /// Acceptance ratio the step-size controller steers toward.
    pub target_acceptance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            box_width: 16.0,
            box_height: 16.0,
            number_particles: 100,
            cutoff: 1.0,
            particle_radius: 0.5,
            seed: None,
            control_window: 3000,
            target_acceptance: 0.4,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be strictly positive, got {value}"),
                })
            }
        }

        positive("box_width", self.box_width)?;
        positive("box_height", self.box_height)?;
        positive("cutoff", self.cutoff)?;
        positive("particle_radius", self.particle_radius)?;
        if self.number_particles == 0 {
            return Err(ConfigError::Invalid {
                field: "number_particles",
                reason: "at least one particle is required".to_string(),
            });
        }
        if self.control_window == 0 {
            return Err(ConfigError::Invalid {
                field: "control_window",
                reason: "the control window must span at least one trial".to_string(),
            });
        }
        if self.target_acceptance <= 0.0 || self.target_acceptance >= 1.0 {
            return Err(ConfigError::Invalid {
                field: "target_acceptance",
                reason: format!("must lie in (0, 1), got {}", self.target_acceptance),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    box_width: Option<f64>,
    box_height: Option<f64>,
    number_particles: Option<usize>,
    cutoff: Option<f64>,
    particle_radius: Option<f64>,
    seed: Option<u64>,
    control_window: Option<u64>,
    target_acceptance: Option<f64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn box_dimensions(mut self, width: f64, height: f64) -> Self {
        self.box_width = Some(width);
        self.box_height = Some(height);
        self
    }
    pub fn number_particles(mut self, count: usize) -> Self {
        self.number_particles = Some(count);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn particle_radius(mut self, radius: f64) -> Self {
        self.particle_radius = Some(radius);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn control_window(mut self, window: u64) -> Self {
        self.control_window = Some(window);
        self
    }
    pub fn target_acceptance(mut self, ratio: f64) -> Self {
        self.target_acceptance = Some(ratio);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            box_width: self.box_width.unwrap_or(defaults.box_width),
            box_height: self.box_height.unwrap_or(defaults.box_height),
            number_particles: self.number_particles.unwrap_or(defaults.number_particles),
            cutoff: self.cutoff.unwrap_or(defaults.cutoff),
            particle_radius: self.particle_radius.unwrap_or(defaults.particle_radius),
            seed: self.seed,
            control_window: self.control_window.unwrap_or(defaults.control_window),
            target_acceptance: self.target_acceptance.unwrap_or(defaults.target_acceptance),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_applies_overrides_over_defaults() {
        let config = SimulationConfig::builder()
            .box_dimensions(20.0, 10.0)
            .number_particles(42)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.box_width, 20.0);
        assert_eq!(config.box_height, 10.0);
        assert_eq!(config.number_particles, 42);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cutoff, 1.0);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let result = SimulationConfig::builder()
            .box_dimensions(-16.0, 16.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "box_width",
                ..
            })
        ));
    }

    #[test]
    fn zero_particles_are_rejected() {
        let result = SimulationConfig::builder().number_particles(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "number_particles",
                ..
            })
        ));
    }

    #[test]
    fn target_acceptance_outside_unit_interval_is_rejected() {
        let result = SimulationConfig::builder().target_acceptance(1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "target_acceptance",
                ..
            })
        ));
    }

    #[test]
    fn loading_succeeds_with_a_partial_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.toml");
        fs::write(&path, "box_width = 32.0\nbox_height = 32.0\nseed = 99\n").unwrap();

        let config = SimulationConfig::from_toml_path(&path).unwrap();
        assert_eq!(config.box_width, 32.0);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.number_particles, 100);
    }

    #[test]
    fn loading_fails_for_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let result = SimulationConfig::from_toml_path(&path);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn loading_fails_for_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = SimulationConfig::from_toml_path(&path);
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.toml");
        fs::write(&path, "box_widht = 32.0\n").unwrap();
        let result = SimulationConfig::from_toml_path(&path);
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn invalid_values_in_a_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "cutoff = 0.0\n").unwrap();
        let result = SimulationConfig::from_toml_path(&path);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "cutoff", .. })
        ));
    }
}
