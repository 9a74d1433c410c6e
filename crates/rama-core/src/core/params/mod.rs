//! Reference parameter tables for the torsion-angle energy model.
//!
//! Both tables are immutable configuration objects constructed once at
//! process start and passed by reference into the sampler and analyzer —
//! never hidden module-level mutable state. Builtin defaults are provided,
//! and alternative parameter sets can be supplied for testing or model
//! exploration.

pub mod propensity;
pub mod torsion;
