//! # Core Module
//!
//! This module provides the fundamental building blocks for torsion-angle
//! ensemble sampling, serving as the stateless computational core of the
//! library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the model:
//!
//! - **Data Models** ([`models`]) - Validated sequences, residue types,
//!   conformers, and secondary-structure profiles
//! - **Reference Parameters** ([`params`]) - Per-residue propensity data and
//!   the named torsion-angle region map
//! - **Energy Model** ([`energy`]) - Pure functions computing per-residue
//!   torsion energies and local neighbor couplings
//!
//! All types here are immutable value records or side-effect-free functions;
//! stateful orchestration lives in the `engine` layer.

pub mod energy;
pub mod models;
pub mod params;
