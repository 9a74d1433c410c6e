//! The empirical torsion-angle energy model.
//!
//! [`potentials`] holds the pure mathematical pieces (thermal energy,
//! wrapped angular distance, within-region penalty); [`scoring`] combines
//! them with the reference tables into per-residue energies.

pub mod potentials;
pub mod scoring;
