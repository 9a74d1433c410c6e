use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;
use crate::core::params::torsion::TorsionEnergyMap;
use crate::engine::calibration::{self, CalibrationFit};
use crate::engine::config::CalibrationConfig;
use crate::engine::error::EngineError;
use crate::engine::ports::ExternalScorer;
use crate::engine::progress::ProgressReporter;
use crate::engine::replica::ReplicaRunner;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

/// Calibrates the internal energy scale against an external scoring system.
///
/// For every sequence: one replica provides the internal energy (the best
/// energy seen, the quantity comparable to an optimizer's minimum) and the
/// injected port provides the external scalar fitness; an ordinary
/// least-squares fit maps one scale onto the other.
#[instrument(skip_all, name = "calibration_workflow", fields(sequences = sequences.len()))]
pub fn run(
    sequences: &[Sequence],
    config: &CalibrationConfig,
    scorer: &dyn ExternalScorer,
) -> Result<CalibrationFit, EngineError> {
    let propensities = PropensityTable::default();
    let torsion_map = TorsionEnergyMap::default();
    let reporter = ProgressReporter::new();
    let base_seed = config.seed.unwrap_or_else(rand::random);

    let mut pairs = Vec::with_capacity(sequences.len());
    for (index, sequence) in sequences.iter().enumerate() {
        let mut runner = ReplicaRunner::new(
            &propensities,
            &torsion_map,
            config.temperature_kelvin,
            index,
            config.trials_per_residue,
        );
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
        let result = runner.run(
            sequence,
            config.samples_per_sequence,
            config.samples_per_sequence,
            &mut rng,
            &reporter,
        )?;

        let external = scorer.score(sequence)?;
        pairs.push((result.best_energy, external.fitness));
    }

    let fit = calibration::fit(&pairs)?;
    info!(
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        "Calibration fit complete."
    );
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calibration::InsufficientDataError;
    use crate::engine::ports::{ExternalScore, ExternalScorerError};

    /// A stand-in optimizer whose fitness is an affine function of chain
    /// length, which correlates with the internal energy through the
    /// per-residue baseline.
    struct LengthScorer;

    impl ExternalScorer for LengthScorer {
        fn score(&self, sequence: &Sequence) -> Result<ExternalScore, ExternalScorerError> {
            Ok(ExternalScore {
                fitness: -3.0 * sequence.len() as f64 + 4.0,
                summary: format!("n={}", sequence.len()),
            })
        }
    }

    struct FailingScorer;

    impl ExternalScorer for FailingScorer {
        fn score(&self, _sequence: &Sequence) -> Result<ExternalScore, ExternalScorerError> {
            Err(ExternalScorerError::new("optimizer backend unavailable"))
        }
    }

    fn test_config() -> CalibrationConfig {
        CalibrationConfig {
            samples_per_sequence: 5,
            trials_per_residue: 20,
            seed: Some(3),
            ..CalibrationConfig::default()
        }
    }

    #[test]
    fn produces_a_finite_fit_over_varied_sequences() {
        let sequences: Vec<Sequence> = ["AAAA", "AAAAAAAA", "AAAAAAAAAAAA", "AAAAAAAAAAAAAAAA"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let fit = run(&sequences, &test_config(), &LengthScorer).unwrap();
        assert!(fit.slope.is_finite());
        assert!(fit.intercept.is_finite());
        assert!(fit.rmse.is_finite());
        // Longer chains mean lower internal energy and lower fitness, so
        // the two scales are positively related.
        assert!(fit.slope > 0.0);
    }

    #[test]
    fn too_few_sequences_fail_with_pair_count() {
        let sequences: Vec<Sequence> = vec!["AAAA".parse().unwrap()];
        let err = run(&sequences, &test_config(), &LengthScorer).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Calibration(InsufficientDataError::TooFewPairs(1))
        ));
    }

    #[test]
    fn external_scorer_failures_propagate() {
        let sequences: Vec<Sequence> =
            vec!["AAAA".parse().unwrap(), "AAAAAAAA".parse().unwrap()];
        let err = run(&sequences, &test_config(), &FailingScorer).unwrap_err();
        assert!(matches!(err, EngineError::ExternalScorer(_)));
    }
}
