use crate::core::models::conformer::Conformer;
use crate::core::models::profile::SecondaryStructureProfile;
use crate::core::models::residue::UnsupportedResidueError;
use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;

/// Per-residue classification window, checked in order. The extended window
/// is a strict subset of the sheet window, so it is tested first to keep
/// all four classes reachable while the partition stays exclusive.
fn classify_residue(phi: f64, psi: f64) -> ResidueClass {
    if (-90.0..=-30.0).contains(&phi) && (-75.0..=-15.0).contains(&psi) {
        ResidueClass::Helix
    } else if (-180.0..=-120.0).contains(&phi) && (120.0..=180.0).contains(&psi) {
        ResidueClass::Extended
    } else if (-180.0..=-90.0).contains(&phi) && (90.0..=180.0).contains(&psi) {
        ResidueClass::Sheet
    } else {
        ResidueClass::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResidueClass {
    Helix,
    Sheet,
    Extended,
    Other,
}

/// Classifies each residue of an existing conformer by its (phi, psi) pair
/// alone; no resampling. Fractions sum to 1.0 for any non-empty conformer;
/// an empty conformer yields the all-zero profile.
pub fn classify(conformer: &Conformer) -> SecondaryStructureProfile {
    let n = conformer.len();
    if n == 0 {
        return SecondaryStructureProfile::zero();
    }

    let mut counts = [0usize; 4];
    for state in conformer.residues() {
        let class = classify_residue(state.phi, state.psi);
        counts[class as usize] += 1;
    }

    let total = n as f64;
    SecondaryStructureProfile {
        helix_fraction: counts[ResidueClass::Helix as usize] as f64 / total,
        sheet_fraction: counts[ResidueClass::Sheet as usize] as f64 / total,
        extended_fraction: counts[ResidueClass::Extended as usize] as f64 / total,
        other_fraction: counts[ResidueClass::Other as usize] as f64 / total,
    }
}

/// Estimates self-association tendency from sheet content and sequence
/// hydrophobicity, clamped to [0, 1].
pub fn aggregation_propensity(
    conformer: &Conformer,
    sequence: &Sequence,
    propensities: &PropensityTable,
) -> Result<f64, UnsupportedResidueError> {
    if conformer.is_empty() || sequence.residues().is_empty() {
        return Ok(0.0);
    }

    let profile = classify(conformer);

    let mut hydrophobic_count = 0usize;
    let mut hydrophobicity_sum = 0.0;
    for &residue in sequence.residues() {
        let properties = propensities.lookup(residue)?;
        if properties.is_hydrophobic() {
            hydrophobic_count += 1;
        }
        hydrophobicity_sum += properties.hydrophobicity;
    }
    let n = sequence.len() as f64;
    let hydrophobic_fraction = hydrophobic_count as f64 / n;
    let mean_hydrophobicity = hydrophobicity_sum / n;

    let score = 0.6 * profile.sheet_fraction
        + 0.3 * hydrophobic_fraction
        + 0.1 * (mean_hydrophobicity / 5.0).max(0.0);
    Ok(score.clamp(0.0, 1.0))
}
