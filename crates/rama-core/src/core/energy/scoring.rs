use super::potentials::{thermal_energy, within_region_penalty};
use crate::core::models::residue::{ResidueType, UnsupportedResidueError};
use crate::core::models::sequence::Sequence;
use crate::core::params::propensity::PropensityTable;
use crate::core::params::torsion::{StructuralClass, TorsionEnergyMap};

/// Energy assigned when no torsion region contains the sampled point,
/// kcal/mol. Keeps the sampler total — this is a numerical fallback, not an
/// error condition.
pub const UNREACHABLE_REGION_PENALTY: f64 = 10.0;

/// Stabilization for an oppositely-charged sequence-adjacent pair, kcal/mol.
pub const SALT_BRIDGE_BONUS: f64 = -2.0;

/// Stabilization for a hydrophobic sequence-adjacent pair, kcal/mol.
pub const HYDROPHOBIC_PAIR_BONUS: f64 = -0.5;

/// Computes per-residue energies from the reference tables at a fixed
/// temperature. Borrows the read-only tables; holds no other state.
pub struct ResidueScorer<'a> {
    propensities: &'a PropensityTable,
    torsion_map: &'a TorsionEnergyMap,
    kt: f64,
}

impl<'a> ResidueScorer<'a> {
    pub fn new(
        propensities: &'a PropensityTable,
        torsion_map: &'a TorsionEnergyMap,
        temperature_kelvin: f64,
    ) -> Self {
        Self {
            propensities,
            torsion_map,
            kt: thermal_energy(temperature_kelvin),
        }
    }

    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Minimum energy over all torsion regions containing (phi, psi):
    /// base offset, minus kT-scaled log of the class-matched propensity,
    /// plus the quadratic within-region penalty. Falls back to the fixed
    /// unreachable-region penalty when no region contains the point.
    pub fn region_energy(
        &self,
        residue: ResidueType,
        phi: f64,
        psi: f64,
    ) -> Result<f64, UnsupportedResidueError> {
        let properties = self.propensities.lookup(residue)?;

        let mut best: Option<f64> = None;
        for region in self.torsion_map.regions() {
            let radius_sq = region.elliptical_radius_sq(phi, psi);
            if radius_sq > 1.0 {
                continue;
            }
            let propensity_factor = match region.class {
                StructuralClass::Helix => properties.helix_propensity,
                StructuralClass::Sheet => properties.sheet_propensity,
                StructuralClass::Extended | StructuralClass::Coil => {
                    properties.disorder_propensity
                }
            };
            let energy = region.base_energy_offset - self.kt * propensity_factor.ln()
                + within_region_penalty(radius_sq);
            best = Some(match best {
                Some(current) if current <= energy => current,
                _ => energy,
            });
        }

        Ok(best.unwrap_or(UNREACHABLE_REGION_PENALTY))
    }

    /// Angle-independent coupling of residue `index` to its sequence
    /// neighbors: a salt-bridge bonus per oppositely-charged adjacent pair
    /// and a hydrophobic bonus per adjacent pair of hydrophobic residues.
    pub fn neighbor_energy(
        &self,
        sequence: &Sequence,
        index: usize,
    ) -> Result<f64, UnsupportedResidueError> {
        let residues = sequence.residues();
        let residue = residues[index];
        let own_properties = self.propensities.lookup(residue)?;

        let mut energy = 0.0;
        let neighbors = [index.checked_sub(1), index.checked_add(1)];
        for neighbor in neighbors.into_iter().flatten() {
            let Some(&other) = residues.get(neighbor) else {
                continue;
            };
            if residue.charge() as i16 * (other.charge() as i16) < 0 {
                energy += SALT_BRIDGE_BONUS;
            }
            let other_properties = self.propensities.lookup(other)?;
            if own_properties.is_hydrophobic() && other_properties.is_hydrophobic() {
                energy += HYDROPHOBIC_PAIR_BONUS;
            }
        }
        Ok(energy)
    }
}
