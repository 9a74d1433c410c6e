use serde::Serialize;

/// Secondary-structure composition of a conformer.
///
/// The four classes exhaustively and exclusively partition torsion space at
/// classification time, so the fractions always sum to 1.0 for a non-empty
/// conformer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SecondaryStructureProfile {
    pub helix_fraction: f64,
    pub sheet_fraction: f64,
    pub extended_fraction: f64,
    pub other_fraction: f64,
}

impl SecondaryStructureProfile {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn sum(&self) -> f64 {
        self.helix_fraction + self.sheet_fraction + self.extended_fraction + self.other_fraction
    }

    /// Everything that is neither helix nor sheet.
    pub fn coil_fraction(&self) -> f64 {
        self.extended_fraction + self.other_fraction
    }
}
