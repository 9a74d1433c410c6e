//! # Engine Module
//!
//! This module implements the stateful sampling machinery: drawing
//! conformers, driving replicas, aggregating ensembles across a temperature
//! ladder, and calibrating against external scoring systems.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sampling parameters, temperature
//!   ladder, seeds, and validation
//! - **Sampling** ([`sampler`]) - Per-residue biased stochastic search with
//!   an injected random source
//! - **Analysis** ([`analyzer`]) - Secondary-structure classification and
//!   aggregation propensity, pure over existing conformers
//! - **Replicas** ([`replica`]) - The per-replica sampling/measuring state
//!   machine and its result record
//! - **Ensembles** ([`ensemble`]) - Replica aggregation and temperature
//!   ladder orchestration
//! - **Calibration** ([`calibration`]) - Least-squares mapping between the
//!   internal energy scale and external scalar scores
//! - **Ports** ([`ports`]) - Injected interfaces for the external optimizer
//!   and the persistence collaborator
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod analyzer;
pub mod calibration;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod ports;
pub mod progress;
pub mod replica;
pub mod sampler;
