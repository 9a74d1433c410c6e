use super::calibration::InsufficientDataError;
use super::config::ConfigError;
use super::ports::ExternalScorerError;
use crate::core::models::residue::UnsupportedResidueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Residue(#[from] UnsupportedResidueError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "Replica {replica_index} at {temperature} K failed after {measurements_completed} measurement(s): {source}"
    )]
    Replica {
        temperature: f64,
        replica_index: usize,
        measurements_completed: usize,
        source: Box<EngineError>,
    },

    #[error("Calibration failed: {0}")]
    Calibration(#[from] InsufficientDataError),

    #[error("External scorer failed: {0}")]
    ExternalScorer(#[from] ExternalScorerError),
}
