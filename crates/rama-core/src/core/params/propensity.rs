use crate::core::models::residue::{ResidueType, UnsupportedResidueError};
use serde::Serialize;
use std::collections::HashMap;

/// Empirical per-residue-type parameters driving the energy model.
///
/// Propensities are Chou–Fasman-style scale factors (1.0 = average tendency);
/// hydrophobicity is on the Kyte–Doolittle scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidueProperties {
    pub helix_propensity: f64,
    pub sheet_propensity: f64,
    pub disorder_propensity: f64,
    pub hydrophobicity: f64,
}

impl ResidueProperties {
    pub fn is_hydrophobic(&self) -> bool {
        self.hydrophobicity > 0.0
    }
}

const BUILTIN_PROPERTIES: [(ResidueType, ResidueProperties); 20] = [
    (ResidueType::Alanine, props(1.42, 0.83, 1.05, 1.8)),
    (ResidueType::Arginine, props(0.98, 0.93, 1.10, -4.5)),
    (ResidueType::Asparagine, props(0.67, 0.89, 1.05, -3.5)),
    (ResidueType::AsparticAcid, props(1.01, 0.54, 1.12, -3.5)),
    (ResidueType::Cysteine, props(0.70, 1.19, 0.75, 2.5)),
    (ResidueType::Glutamine, props(1.11, 1.10, 1.15, -3.5)),
    (ResidueType::GlutamicAcid, props(1.51, 0.37, 1.20, -3.5)),
    (ResidueType::Glycine, props(0.57, 0.75, 1.25, -0.4)),
    (ResidueType::Histidine, props(1.00, 0.87, 0.95, -3.2)),
    (ResidueType::Isoleucine, props(1.08, 1.60, 0.70, 4.5)),
    (ResidueType::Leucine, props(1.21, 1.30, 0.80, 3.8)),
    (ResidueType::Lysine, props(1.16, 0.74, 1.20, -3.9)),
    (ResidueType::Methionine, props(1.45, 1.05, 0.85, 1.9)),
    (ResidueType::Phenylalanine, props(1.13, 1.38, 0.75, 2.8)),
    (ResidueType::Proline, props(0.57, 0.55, 1.30, -1.6)),
    (ResidueType::Serine, props(0.77, 0.75, 1.15, -0.8)),
    (ResidueType::Threonine, props(0.83, 1.19, 1.00, -0.7)),
    (ResidueType::Tryptophan, props(1.08, 1.37, 0.70, -0.9)),
    (ResidueType::Tyrosine, props(0.69, 1.47, 0.80, -1.3)),
    (ResidueType::Valine, props(1.06, 1.70, 0.75, 4.2)),
];

const fn props(
    helix_propensity: f64,
    sheet_propensity: f64,
    disorder_propensity: f64,
    hydrophobicity: f64,
) -> ResidueProperties {
    ResidueProperties {
        helix_propensity,
        sheet_propensity,
        disorder_propensity,
        hydrophobicity,
    }
}

/// Immutable lookup table of [`ResidueProperties`] per residue type.
///
/// Lookup of a type absent from the table fails with
/// [`UnsupportedResidueError`] — there is no silent default substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct PropensityTable {
    entries: HashMap<ResidueType, ResidueProperties>,
}

impl Default for PropensityTable {
    fn default() -> Self {
        Self::from_entries(BUILTIN_PROPERTIES)
    }
}

impl PropensityTable {
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ResidueType, ResidueProperties)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(
        &self,
        residue: ResidueType,
    ) -> Result<&ResidueProperties, UnsupportedResidueError> {
        self.entries
            .get(&residue)
            .ok_or_else(|| UnsupportedResidueError::new(residue.three_letter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_all_twenty_types() {
        let table = PropensityTable::default();
        for residue in ResidueType::ALL {
            let properties = table.lookup(residue).unwrap();
            assert!(properties.helix_propensity > 0.0);
            assert!(properties.sheet_propensity > 0.0);
            assert!(properties.disorder_propensity > 0.0);
        }
    }

    #[test]
    fn lookup_on_missing_type_fails_with_offending_code() {
        let table = PropensityTable::from_entries([(
            ResidueType::Alanine,
            props(1.42, 0.83, 1.05, 1.8),
        )]);
        assert!(table.lookup(ResidueType::Alanine).is_ok());
        let err = table.lookup(ResidueType::Tryptophan).unwrap_err();
        assert_eq!(err.code, "TRP");
    }

    #[test]
    fn hydrophobicity_classification_follows_kyte_doolittle_sign() {
        let table = PropensityTable::default();
        assert!(table.lookup(ResidueType::Isoleucine).unwrap().is_hydrophobic());
        assert!(table.lookup(ResidueType::Valine).unwrap().is_hydrophobic());
        assert!(!table.lookup(ResidueType::Lysine).unwrap().is_hydrophobic());
        assert!(!table.lookup(ResidueType::Glycine).unwrap().is_hydrophobic());
    }

    #[test]
    fn glutamate_is_the_strongest_builtin_helix_former() {
        let table = PropensityTable::default();
        let glu = table.lookup(ResidueType::GlutamicAcid).unwrap();
        for residue in ResidueType::ALL {
            assert!(table.lookup(residue).unwrap().helix_propensity <= glu.helix_propensity);
        }
    }
}
