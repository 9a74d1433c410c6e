use crate::core::energy::potentials::REFERENCE_TEMPERATURE_K;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Temperature ladder must contain at least one temperature")]
    EmptyLadder,
}

/// Validated configuration for ensemble sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleConfig {
    pub temperature_ladder: Vec<f64>,
    pub replicas_per_temperature: usize,
    pub samples_per_replica: usize,
    pub measurement_stride: usize,
    pub trials_per_residue: usize,
    /// Base seed for the per-replica random sources; `None` draws one from
    /// the process entropy source.
    pub seed: Option<u64>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            temperature_ladder: vec![REFERENCE_TEMPERATURE_K],
            replicas_per_temperature: 1,
            samples_per_replica: 100,
            measurement_stride: 10,
            trials_per_residue: 100,
            seed: None,
        }
    }
}

impl EnsembleConfig {
    pub fn builder() -> EnsembleConfigBuilder {
        EnsembleConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct EnsembleConfigBuilder {
    temperature_ladder: Option<Vec<f64>>,
    replicas_per_temperature: Option<usize>,
    samples_per_replica: Option<usize>,
    measurement_stride: Option<usize>,
    trials_per_residue: Option<usize>,
    seed: Option<u64>,
}

impl EnsembleConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature_kelvin(mut self, temperature: f64) -> Self {
        self.temperature_ladder = Some(vec![temperature]);
        self
    }
    pub fn temperature_ladder(mut self, ladder: Vec<f64>) -> Self {
        self.temperature_ladder = Some(ladder);
        self
    }
    pub fn replicas_per_temperature(mut self, replicas: usize) -> Self {
        self.replicas_per_temperature = Some(replicas);
        self
    }
    pub fn samples_per_replica(mut self, samples: usize) -> Self {
        self.samples_per_replica = Some(samples);
        self
    }
    pub fn measurement_stride(mut self, stride: usize) -> Self {
        self.measurement_stride = Some(stride);
        self
    }
    pub fn trials_per_residue(mut self, trials: usize) -> Self {
        self.trials_per_residue = Some(trials);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<EnsembleConfig, ConfigError> {
        let defaults = EnsembleConfig::default();
        let config = EnsembleConfig {
            temperature_ladder: self
                .temperature_ladder
                .unwrap_or(defaults.temperature_ladder),
            replicas_per_temperature: self
                .replicas_per_temperature
                .unwrap_or(defaults.replicas_per_temperature),
            samples_per_replica: self
                .samples_per_replica
                .unwrap_or(defaults.samples_per_replica),
            measurement_stride: self
                .measurement_stride
                .unwrap_or(defaults.measurement_stride),
            trials_per_residue: self
                .trials_per_residue
                .unwrap_or(defaults.trials_per_residue),
            seed: self.seed,
        };

        if config.temperature_ladder.is_empty() {
            return Err(ConfigError::EmptyLadder);
        }
        for &temperature in &config.temperature_ladder {
            if !(temperature > 0.0) {
                return Err(ConfigError::NonPositive {
                    name: "temperature_kelvin",
                    value: temperature,
                });
            }
        }
        check_positive("replicas_per_temperature", config.replicas_per_temperature)?;
        check_positive("samples_per_replica", config.samples_per_replica)?;
        check_positive("measurement_stride", config.measurement_stride)?;
        check_positive("trials_per_residue", config.trials_per_residue)?;

        Ok(config)
    }
}

fn check_positive(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositive {
            name,
            value: 0.0,
        });
    }
    Ok(())
}

/// Configuration for calibration runs against an external scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationConfig {
    pub temperature_kelvin: f64,
    pub samples_per_sequence: usize,
    pub trials_per_residue: usize,
    pub seed: Option<u64>,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            temperature_kelvin: REFERENCE_TEMPERATURE_K,
            samples_per_sequence: 50,
            trials_per_residue: 100,
            seed: None,
        }
    }
}
