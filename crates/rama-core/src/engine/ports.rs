use super::ensemble::TemperatureEnsemble;
use super::replica::ReplicaResult;
use crate::core::models::sequence::Sequence;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ExternalScorerError {
    pub message: String,
}

impl ExternalScorerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The verdict of an external optimizer on one sequence: a scalar fitness
/// plus an opaque structural summary the core never interprets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalScore {
    pub fitness: f64,
    pub summary: String,
}

/// Port for the external "quantum-inspired" optimizer.
///
/// The core consumes it as an opaque scoring function; its availability and
/// lifecycle are the host's concern, which is why the dependency points
/// inward through this trait instead of outward through a client.
pub trait ExternalScorer {
    fn score(&self, sequence: &Sequence) -> Result<ExternalScore, ExternalScorerError>;
}

/// Port for the persistence collaborator.
///
/// Receives fully-formed value records as they complete; all storage schema
/// concerns live behind this boundary, and the sampling core performs no
/// I/O of its own.
pub trait EnsembleSink {
    fn record_replica(&mut self, result: &ReplicaResult);
    fn record_ensemble(&mut self, ensemble: &TemperatureEnsemble);
}
