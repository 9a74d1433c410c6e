use super::config::EnsembleConfig;
use super::ports::EnsembleSink;
use super::progress::{Progress, ProgressReporter};
use super::replica::{ReplicaResult, ReplicaRunner};
use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;
use crate::core::params::torsion::TorsionEnergyMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mean and population standard deviation of one aggregated field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub mean: f64,
    pub std: f64,
}

fn field_stats(values: &[f64]) -> FieldStats {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    FieldStats {
        mean,
        std: variance.sqrt(),
    }
}

/// Cross-replica statistics at one temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleStatistics {
    pub beta: FieldStats,
    pub helix: FieldStats,
    pub coil: FieldStats,
    pub energy: FieldStats,
    pub torsion_divergence: f64,
}

/// The aggregation outcome for one temperature rung.
///
/// `statistics` is `None` when no replica at this temperature succeeded —
/// an explicit "no data" marker, deliberately distinct from a genuine
/// all-zero measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureEnsemble {
    pub temperature: f64,
    pub replica_count: usize,
    pub statistics: Option<EnsembleStatistics>,
}

/// Dispersion metric over pooled (phi, psi) samples.
///
/// The default is a normalized-variance proxy, not a validated divergence
/// against an experimental reference distribution; hosts with a reference
/// can inject their own metric.
pub trait TorsionDivergence {
    fn evaluate(&self, samples: &[(f64, f64)]) -> f64;
}

/// Circular-variance proxy: mean over phi and psi of one minus the mean
/// resultant vector length. 0 for a delta distribution, approaching 1 for
/// uniform scatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizedVariance;

impl TorsionDivergence for NormalizedVariance {
    fn evaluate(&self, samples: &[(f64, f64)]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let count = samples.len() as f64;
        let mut sums = [0.0f64; 4]; // cos/sin of phi, cos/sin of psi
        for &(phi, psi) in samples {
            sums[0] += phi.to_radians().cos();
            sums[1] += phi.to_radians().sin();
            sums[2] += psi.to_radians().cos();
            sums[3] += psi.to_radians().sin();
        }
        let resultant_phi = ((sums[0] / count).powi(2) + (sums[1] / count).powi(2)).sqrt();
        let resultant_psi = ((sums[2] / count).powi(2) + (sums[3] / count).powi(2)).sqrt();
        ((1.0 - resultant_phi) + (1.0 - resultant_psi)) / 2.0
    }
}

/// Combines same-temperature replicas into [`EnsembleStatistics`] and
/// orchestrates the full temperature ladder.
pub struct EnsembleAggregator {
    divergence: Box<dyn TorsionDivergence + Send + Sync>,
}

impl Default for EnsembleAggregator {
    fn default() -> Self {
        Self::new(Box::new(NormalizedVariance))
    }
}

impl EnsembleAggregator {
    pub fn new(divergence: Box<dyn TorsionDivergence + Send + Sync>) -> Self {
        Self { divergence }
    }

    /// Aggregates the successful replicas of one temperature. The slice is
    /// treated as an unordered multiset: no field depends on replica order.
    pub fn aggregate(&self, temperature: f64, results: &[ReplicaResult]) -> TemperatureEnsemble {
        if results.is_empty() {
            return TemperatureEnsemble {
                temperature,
                replica_count: 0,
                statistics: None,
            };
        }

        let sheet: Vec<f64> = results.iter().map(|r| r.mean_profile.sheet_fraction).collect();
        let helix: Vec<f64> = results.iter().map(|r| r.mean_profile.helix_fraction).collect();
        let coil: Vec<f64> = results.iter().map(|r| r.mean_profile.coil_fraction()).collect();
        let energy: Vec<f64> = results.iter().map(|r| r.mean_energy).collect();

        let pooled: Vec<(f64, f64)> = results
            .iter()
            .flat_map(|r| r.torsion_samples.iter().copied())
            .collect();

        TemperatureEnsemble {
            temperature,
            replica_count: results.len(),
            statistics: Some(EnsembleStatistics {
                beta: field_stats(&sheet),
                helix: field_stats(&helix),
                coil: field_stats(&coil),
                energy: field_stats(&energy),
                torsion_divergence: self.divergence.evaluate(&pooled),
            }),
        }
    }

    /// Runs the full (temperature, replica) grid and aggregates per rung.
    ///
    /// Replicas are embarrassingly parallel; each gets an independently
    /// derived seed so results stay reproducible and uncorrelated. A failed
    /// replica is logged and excluded; a rung where every replica failed is
    /// reported as "no data" rather than defaulting to zeros.
    #[instrument(skip_all, name = "temperature_ladder", fields(rungs = config.temperature_ladder.len()))]
    pub fn run_ladder(
        &self,
        sequence: &Sequence,
        config: &EnsembleConfig,
        propensities: &PropensityTable,
        torsion_map: &TorsionEnergyMap,
        reporter: &ProgressReporter,
        mut sink: Option<&mut dyn EnsembleSink>,
    ) -> Vec<TemperatureEnsemble> {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        reporter.report(Progress::LadderStart {
            temperatures: config.temperature_ladder.len(),
        });

        let mut ensembles = Vec::with_capacity(config.temperature_ladder.len());
        for (temperature_index, &temperature) in config.temperature_ladder.iter().enumerate() {
            let replica_indices: Vec<usize> = (0..config.replicas_per_temperature).collect();

            #[cfg(feature = "parallel")]
            let iterator = replica_indices.par_iter();
            #[cfg(not(feature = "parallel"))]
            let iterator = replica_indices.iter();

            let outcomes: Vec<_> = iterator
                .map(|&replica_index| {
                    let seed = replica_seed(base_seed, temperature_index, replica_index);
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut runner = ReplicaRunner::new(
                        propensities,
                        torsion_map,
                        temperature,
                        replica_index,
                        config.trials_per_residue,
                    );
                    runner.run(
                        sequence,
                        config.samples_per_replica,
                        config.measurement_stride,
                        &mut rng,
                        reporter,
                    )
                })
                .collect();

            let mut successes = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                match outcome {
                    Ok(result) => {
                        if let Some(sink) = sink.as_deref_mut() {
                            sink.record_replica(&result);
                        }
                        successes.push(result);
                    }
                    Err(error) => {
                        warn!(temperature, error = %error, "Replica failed; excluding it from aggregation.");
                    }
                }
            }

            let ensemble = self.aggregate(temperature, &successes);
            if let Some(sink) = sink.as_deref_mut() {
                sink.record_ensemble(&ensemble);
            }
            ensembles.push(ensemble);
        }

        reporter.report(Progress::LadderFinish);
        ensembles
    }
}

/// Splitmix-style mixing of the base seed with the grid coordinates, so
/// sibling replicas never share an RNG stream.
fn replica_seed(base: u64, temperature_index: usize, replica_index: usize) -> u64 {
    let mut z = base ^ ((temperature_index as u64) << 32) ^ replica_index as u64;
    z = z.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::potentials::REFERENCE_TEMPERATURE_K;
    use crate::core::models::profile::SecondaryStructureProfile;
    use crate::core::models::residue::ResidueType;
    use crate::core::params::propensity::{PropensityTable, ResidueProperties};
    use crate::engine::replica::ReplicaResult;

    fn synthetic_result(replica_id: usize, mean_energy: f64, sheet: f64) -> ReplicaResult {
        let sequence: Sequence = "AAAAA".parse().unwrap();
        let propensities = PropensityTable::default();
        let torsion_map = TorsionEnergyMap::default();
        let mut runner = ReplicaRunner::new(
            &propensities,
            &torsion_map,
            REFERENCE_TEMPERATURE_K,
            replica_id,
            10,
        );
        let mut rng = StdRng::seed_from_u64(replica_id as u64);
        let reporter = ProgressReporter::new();
        let mut result = runner.run(&sequence, 4, 2, &mut rng, &reporter).unwrap();
        result.mean_energy = mean_energy;
        result.mean_profile = SecondaryStructureProfile {
            helix_fraction: 1.0 - sheet,
            sheet_fraction: sheet,
            extended_fraction: 0.0,
            other_fraction: 0.0,
        };
        result
    }

    #[test]
    fn aggregate_of_identical_replicas_has_zero_spread() {
        let aggregator = EnsembleAggregator::default();
        let results = vec![
            synthetic_result(0, -100.0, 0.4),
            synthetic_result(1, -100.0, 0.4),
        ];
        let ensemble = aggregator.aggregate(300.0, &results);
        let stats = ensemble.statistics.unwrap();
        assert_eq!(ensemble.replica_count, 2);
        assert!((stats.energy.mean + 100.0).abs() < 1e-9);
        assert!(stats.energy.std.abs() < 1e-9);
        assert!((stats.beta.mean - 0.4).abs() < 1e-9);
        assert!(stats.beta.std.abs() < 1e-9);
        assert!((stats.helix.mean - 0.6).abs() < 1e-9);
    }

    #[test]
    fn aggregate_is_order_insensitive() {
        let aggregator = EnsembleAggregator::default();
        let a = synthetic_result(0, -90.0, 0.2);
        let b = synthetic_result(1, -110.0, 0.6);
        let forward = aggregator.aggregate(300.0, &[a.clone(), b.clone()]);
        let reversed = aggregator.aggregate(300.0, &[b, a]);
        assert_eq!(forward.statistics, reversed.statistics);
    }

    #[test]
    fn zero_successful_replicas_is_explicit_no_data() {
        let aggregator = EnsembleAggregator::default();
        let ensemble = aggregator.aggregate(320.0, &[]);
        assert_eq!(ensemble.temperature, 320.0);
        assert_eq!(ensemble.replica_count, 0);
        assert!(ensemble.statistics.is_none());
    }

    #[test]
    fn ladder_produces_one_ensemble_per_temperature() {
        let propensities = PropensityTable::default();
        let torsion_map = TorsionEnergyMap::default();
        let sequence: Sequence = "KLVFFAE".parse().unwrap();
        let config = EnsembleConfig::builder()
            .temperature_ladder(vec![290.0, 305.0, 320.0, 335.0])
            .replicas_per_temperature(2)
            .samples_per_replica(10)
            .measurement_stride(5)
            .trials_per_residue(20)
            .seed(77)
            .build()
            .unwrap();
        let aggregator = EnsembleAggregator::default();
        let reporter = ProgressReporter::new();

        let ensembles = aggregator.run_ladder(
            &sequence,
            &config,
            &propensities,
            &torsion_map,
            &reporter,
            None,
        );

        assert_eq!(ensembles.len(), 4);
        for (ensemble, expected) in ensembles.iter().zip([290.0, 305.0, 320.0, 335.0]) {
            assert_eq!(ensemble.temperature, expected);
            assert_eq!(ensemble.replica_count, 2);
            assert!(ensemble.statistics.is_some());
        }
    }

    #[test]
    fn ladder_is_reproducible_for_a_fixed_seed() {
        let propensities = PropensityTable::default();
        let torsion_map = TorsionEnergyMap::default();
        let sequence: Sequence = "GAVLIK".parse().unwrap();
        let config = EnsembleConfig::builder()
            .temperature_ladder(vec![298.15, 320.0])
            .replicas_per_temperature(2)
            .samples_per_replica(6)
            .measurement_stride(3)
            .trials_per_residue(25)
            .seed(1234)
            .build()
            .unwrap();
        let aggregator = EnsembleAggregator::default();
        let reporter = ProgressReporter::new();

        let first = aggregator.run_ladder(
            &sequence,
            &config,
            &propensities,
            &torsion_map,
            &reporter,
            None,
        );
        let second = aggregator.run_ladder(
            &sequence,
            &config,
            &propensities,
            &torsion_map,
            &reporter,
            None,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn failing_replicas_leave_a_no_data_rung_without_aborting_the_ladder() {
        // Leucine is missing from the table, so every replica fails.
        let propensities = PropensityTable::from_entries([(
            ResidueType::Alanine,
            ResidueProperties {
                helix_propensity: 1.4,
                sheet_propensity: 0.8,
                disorder_propensity: 1.0,
                hydrophobicity: 1.8,
            },
        )]);
        let torsion_map = TorsionEnergyMap::default();
        let sequence: Sequence = "AL".parse().unwrap();
        let config = EnsembleConfig::builder()
            .temperature_ladder(vec![290.0, 310.0])
            .replicas_per_temperature(2)
            .samples_per_replica(4)
            .measurement_stride(2)
            .trials_per_residue(5)
            .seed(9)
            .build()
            .unwrap();
        let aggregator = EnsembleAggregator::default();
        let reporter = ProgressReporter::new();

        let ensembles = aggregator.run_ladder(
            &sequence,
            &config,
            &propensities,
            &torsion_map,
            &reporter,
            None,
        );
        assert_eq!(ensembles.len(), 2);
        for ensemble in ensembles {
            assert_eq!(ensemble.replica_count, 0);
            assert!(ensemble.statistics.is_none());
        }
    }

    #[test]
    fn normalized_variance_separates_tight_and_scattered_ensembles() {
        let metric = NormalizedVariance;
        let tight: Vec<(f64, f64)> = (0..50).map(|i| (-60.0 + (i % 3) as f64, -45.0)).collect();
        let scattered: Vec<(f64, f64)> = (0..50)
            .map(|i| ((i as f64 * 73.0) % 360.0 - 180.0, (i as f64 * 131.0) % 360.0 - 180.0))
            .collect();
        let tight_divergence = metric.evaluate(&tight);
        let scattered_divergence = metric.evaluate(&scattered);
        assert!(tight_divergence < 0.05);
        assert!(scattered_divergence > 0.5);
        assert_eq!(metric.evaluate(&[]), 0.0);
    }
}
