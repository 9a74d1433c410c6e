use serde::Serialize;

/// Fixed per-chain stabilization applied exactly once per conformer, in
/// kcal/mol per residue. Rescales the otherwise-relative torsion energy
/// onto an experimentally comparable absolute scale.
pub const CHAIN_BASELINE_PER_RESIDUE: f64 = -8.0;

/// The sampled torsion state of one residue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidueState {
    pub residue_index: usize,
    /// Backbone phi dihedral, degrees in [-180, 180].
    pub phi: f64,
    /// Backbone psi dihedral, degrees in [-180, 180].
    pub psi: f64,
    /// Per-residue torsion energy, kcal/mol. Always finite.
    pub energy: f64,
    /// exp(-energy / kT) at the sampling temperature.
    pub boltzmann_weight: f64,
    /// Whether the residue settled below the validity threshold.
    pub valid: bool,
}

/// One complete set of per-residue torsion angles for a sequence, with the
/// derived total energy.
///
/// Immutable once created: `total_energy` is computed in the constructor as
/// the sum of the residue energies plus the chain baseline term, and the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conformer {
    residues: Vec<ResidueState>,
    total_energy: f64,
}

impl Conformer {
    pub fn new(residues: Vec<ResidueState>) -> Self {
        let residue_sum: f64 = residues.iter().map(|state| state.energy).sum();
        let total_energy = residue_sum + CHAIN_BASELINE_PER_RESIDUE * residues.len() as f64;
        Self {
            residues,
            total_energy,
        }
    }

    pub fn residues(&self) -> &[ResidueState] {
        &self.residues
    }

    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
