//! Data models for sequences, conformers, and derived profiles.
//!
//! Everything in this module is an immutable value record: once constructed,
//! a `Sequence` or `Conformer` is never mutated, and all output records
//! implement `Serialize` for consumption by external reporting and
//! persistence collaborators.

pub mod conformer;
pub mod profile;
pub mod residue;
pub mod sequence;
