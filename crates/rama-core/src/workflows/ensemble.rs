use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;
use crate::core::params::torsion::TorsionEnergyMap;
use crate::engine::config::EnsembleConfig;
use crate::engine::ensemble::{EnsembleAggregator, TemperatureEnsemble};
use crate::engine::error::EngineError;
use crate::engine::ports::EnsembleSink;
use crate::engine::progress::ProgressReporter;
use serde::Serialize;
use tracing::{info, instrument};

/// The complete ensemble summary for one sequence, ready for serialization
/// by external reporting or persistence collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleReport {
    pub sequence: String,
    pub temperatures: Vec<TemperatureEnsemble>,
}

/// Runs the full ensemble estimation with the builtin reference tables.
#[instrument(skip_all, name = "ensemble_workflow", fields(n = sequence.len()))]
pub fn run(
    sequence: &Sequence,
    config: &EnsembleConfig,
    reporter: &ProgressReporter,
) -> Result<EnsembleReport, EngineError> {
    let propensities = PropensityTable::default();
    let torsion_map = TorsionEnergyMap::default();
    run_with_tables(sequence, config, &propensities, &torsion_map, reporter, None)
}

/// Runs the full ensemble estimation with caller-supplied reference tables
/// and an optional persistence sink.
pub fn run_with_tables(
    sequence: &Sequence,
    config: &EnsembleConfig,
    propensities: &PropensityTable,
    torsion_map: &TorsionEnergyMap,
    reporter: &ProgressReporter,
    sink: Option<&mut dyn EnsembleSink>,
) -> Result<EnsembleReport, EngineError> {
    info!(
        temperatures = config.temperature_ladder.len(),
        replicas = config.replicas_per_temperature,
        samples = config.samples_per_replica,
        "Starting ensemble estimation."
    );

    let aggregator = EnsembleAggregator::default();
    let temperatures = aggregator.run_ladder(
        sequence,
        config,
        propensities,
        torsion_map,
        reporter,
        sink,
    );

    let usable = temperatures.iter().filter(|t| t.statistics.is_some()).count();
    info!(
        rungs = temperatures.len(),
        usable, "Ensemble estimation complete."
    );

    Ok(EnsembleReport {
        sequence: sequence.to_string(),
        temperatures,
    })
}
