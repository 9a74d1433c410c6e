//! # ramasample
//!
//! A library for estimating plausible backbone conformations and
//! secondary-structure composition of peptide sequences using a simplified
//! empirical torsion-angle energy model with stochastic sampling.
//!
//! The target systems are peptides with no single stable fold (intrinsically
//! disordered sequences), where the scientifically meaningful output is a
//! statistical ensemble — secondary-structure fractions, energy
//! distributions, contact probabilities — rather than one structure. The
//! model never leaves torsion-angle (phi/psi) space: there are no side
//! chains, no Cartesian coordinates, and no atomistic force field.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure
//! a clear separation of concerns, making it modular, testable, and
//! extensible.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Sequence`,
//!   `Conformer`), immutable reference parameter tables (`PropensityTable`,
//!   `TorsionEnergyMap`), and pure energy functions.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates the
//!   sampling process: the per-residue conformer sampler, the
//!   secondary-structure analyzer, the replica state machine, ensemble
//!   aggregation across a temperature ladder, and calibration against
//!   external scoring systems.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute complete
//!   procedures, such as producing the full ensemble report for a sequence.

pub mod core;
pub mod engine;
pub mod workflows;
