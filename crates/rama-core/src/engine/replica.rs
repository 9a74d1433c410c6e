use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::sampler::ConformerSampler;
use super::analyzer::{self, classify};
use crate::core::models::conformer::Conformer;
use crate::core::models::profile::SecondaryStructureProfile;
use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;
use crate::core::params::torsion::TorsionEnergyMap;
use itertools::Itertools;
use rand::Rng;
use serde::Serialize;
use tracing::instrument;

/// Minimum sequence separation for a modeled contact.
const CONTACT_MIN_SEPARATION: usize = 3;
/// Decay length of contact probability with sequence separation, residues.
const CONTACT_DECAY: f64 = 8.0;
/// Boost applied when both partners are hydrophobic.
const HYDROPHOBIC_CONTACT_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaPhase {
    Initializing,
    Sampling,
    Measuring,
    Completed,
    Failed,
}

/// Symmetric per-residue-pair contact probabilities.
///
/// Contacts here are a statistical proxy derived from sheet content and
/// sequence separation — the model has no Cartesian geometry to measure
/// literal contacts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMap {
    n: usize,
    values: Vec<f64>,
}

impl ContactMap {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    pub fn residue_count(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn add_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] += value;
        self.values[j * self.n + i] += value;
    }

    fn scale(&mut self, factor: f64) {
        for value in &mut self.values {
            *value *= factor;
        }
    }
}

/// The aggregate outcome of one replica: running means over all measurement
/// points plus the raw per-measurement traces needed for convergence
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicaResult {
    pub temperature: f64,
    pub replica_id: usize,
    pub sample_count: usize,
    pub mean_profile: SecondaryStructureProfile,
    pub mean_aggregation_propensity: f64,
    pub best_energy: f64,
    pub mean_energy: f64,
    pub std_energy: f64,
    /// Pooled (phi, psi) snapshots, one per residue per measurement point.
    pub torsion_samples: Vec<(f64, f64)>,
    pub contact_map: ContactMap,
    /// Total energy at each measurement point, in measurement order.
    /// Convergence diagnostics must read this, not the final means.
    pub energy_trace: Vec<f64>,
}

/// Drives the sampler for a fixed number of samples at one temperature,
/// taking a measurement every stride-th sample.
///
/// State machine: Initializing -> Sampling <-> Measuring -> Completed, or
/// -> Failed on an error mid-loop, in which case the propagated
/// [`EngineError::Replica`] carries the completed measurement count.
pub struct ReplicaRunner<'a> {
    sampler: ConformerSampler<'a>,
    propensities: &'a PropensityTable,
    temperature: f64,
    replica_id: usize,
    phase: ReplicaPhase,
}

impl<'a> ReplicaRunner<'a> {
    pub fn new(
        propensities: &'a PropensityTable,
        torsion_map: &'a TorsionEnergyMap,
        temperature: f64,
        replica_id: usize,
        trials_per_residue: usize,
    ) -> Self {
        Self {
            sampler: ConformerSampler::new(
                propensities,
                torsion_map,
                temperature,
                trials_per_residue,
            ),
            propensities,
            temperature,
            replica_id,
            phase: ReplicaPhase::Initializing,
        }
    }

    pub fn phase(&self) -> ReplicaPhase {
        self.phase
    }

    #[instrument(
        skip_all,
        name = "replica",
        fields(temperature = self.temperature, replica = self.replica_id)
    )]
    pub fn run(
        &mut self,
        sequence: &Sequence,
        sample_count: usize,
        measurement_stride: usize,
        rng: &mut impl Rng,
        reporter: &ProgressReporter,
    ) -> Result<ReplicaResult, EngineError> {
        reporter.report(Progress::ReplicaStart {
            temperature: self.temperature,
            replica_index: self.replica_id,
            samples: sample_count as u64,
        });

        let n = sequence.len();
        let mut accumulator = MeasurementAccumulator::new(n);
        let mut best_energy = f64::INFINITY;
        let mut last_conformer: Option<Conformer> = None;

        self.phase = ReplicaPhase::Sampling;
        for sample_index in 0..sample_count {
            let conformer = match self.sampler.sample(sequence, rng) {
                Ok(conformer) => conformer,
                Err(source) => return Err(self.fail(accumulator.measurements, source.into())),
            };
            reporter.report(Progress::SampleDrawn);
            best_energy = best_energy.min(conformer.total_energy());

            if (sample_index + 1) % measurement_stride == 0 {
                self.phase = ReplicaPhase::Measuring;
                if let Err(source) = accumulator.measure(&conformer, sequence, self.propensities) {
                    return Err(self.fail(accumulator.measurements, source));
                }
                self.phase = ReplicaPhase::Sampling;
            }
            last_conformer = Some(conformer);
        }

        // A stride longer than the run would leave every scalar field
        // undefined; fall back to one final measurement.
        if accumulator.measurements == 0 {
            if let Some(conformer) = &last_conformer {
                self.phase = ReplicaPhase::Measuring;
                if let Err(source) = accumulator.measure(conformer, sequence, self.propensities) {
                    return Err(self.fail(0, source));
                }
            }
        }

        self.phase = ReplicaPhase::Completed;
        reporter.report(Progress::ReplicaFinish);
        Ok(accumulator.finish(
            self.temperature,
            self.replica_id,
            sample_count,
            best_energy,
        ))
    }

    fn fail(&mut self, measurements_completed: usize, source: EngineError) -> EngineError {
        self.phase = ReplicaPhase::Failed;
        EngineError::Replica {
            temperature: self.temperature,
            replica_index: self.replica_id,
            measurements_completed,
            source: Box::new(source),
        }
    }
}

struct MeasurementAccumulator {
    measurements: usize,
    profile_sums: [f64; 4],
    propensity_sum: f64,
    torsion_samples: Vec<(f64, f64)>,
    contact_sums: ContactMap,
    energy_trace: Vec<f64>,
}

impl MeasurementAccumulator {
    fn new(residue_count: usize) -> Self {
        Self {
            measurements: 0,
            profile_sums: [0.0; 4],
            propensity_sum: 0.0,
            torsion_samples: Vec::new(),
            contact_sums: ContactMap::zeros(residue_count),
            energy_trace: Vec::new(),
        }
    }

    fn measure(
        &mut self,
        conformer: &Conformer,
        sequence: &Sequence,
        propensities: &PropensityTable,
    ) -> Result<(), EngineError> {
        let profile = classify(conformer);
        self.profile_sums[0] += profile.helix_fraction;
        self.profile_sums[1] += profile.sheet_fraction;
        self.profile_sums[2] += profile.extended_fraction;
        self.profile_sums[3] += profile.other_fraction;

        self.propensity_sum +=
            analyzer::aggregation_propensity(conformer, sequence, propensities)?;

        self.torsion_samples
            .extend(conformer.residues().iter().map(|state| (state.phi, state.psi)));

        let mut hydrophobic = Vec::with_capacity(sequence.len());
        for &residue in sequence.residues() {
            hydrophobic.push(propensities.lookup(residue)?.is_hydrophobic());
        }
        for (i, j) in (0..sequence.len()).tuple_combinations() {
            let separation = j - i;
            if separation < CONTACT_MIN_SEPARATION {
                continue;
            }
            let mut probability = profile.sheet_fraction
                * (-((separation - CONTACT_MIN_SEPARATION) as f64) / CONTACT_DECAY).exp();
            if hydrophobic[i] && hydrophobic[j] {
                probability *= HYDROPHOBIC_CONTACT_FACTOR;
            }
            self.contact_sums.add_symmetric(i, j, probability.min(1.0));
        }

        self.energy_trace.push(conformer.total_energy());
        self.measurements += 1;
        Ok(())
    }

    fn finish(
        mut self,
        temperature: f64,
        replica_id: usize,
        sample_count: usize,
        best_energy: f64,
    ) -> ReplicaResult {
        let count = self.measurements.max(1) as f64;
        let mean_energy = self.energy_trace.iter().sum::<f64>() / count;
        let variance = self
            .energy_trace
            .iter()
            .map(|e| (e - mean_energy).powi(2))
            .sum::<f64>()
            / count;
        self.contact_sums.scale(1.0 / count);

        ReplicaResult {
            temperature,
            replica_id,
            sample_count,
            mean_profile: SecondaryStructureProfile {
                helix_fraction: self.profile_sums[0] / count,
                sheet_fraction: self.profile_sums[1] / count,
                extended_fraction: self.profile_sums[2] / count,
                other_fraction: self.profile_sums[3] / count,
            },
            mean_aggregation_propensity: self.propensity_sum / count,
            best_energy,
            mean_energy,
            std_energy: variance.sqrt(),
            torsion_samples: self.torsion_samples,
            contact_map: self.contact_sums,
            energy_trace: self.energy_trace,
        }
    }
}
