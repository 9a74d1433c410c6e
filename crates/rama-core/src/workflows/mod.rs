//! # Workflows Module
//!
//! The highest-level, user-facing layer. Each workflow ties the `core` and
//! `engine` layers together into one complete procedure with a single entry
//! point, threading progress reporting and structured logging throughout.
//!
//! - [`ensemble`] - full temperature-ladder ensemble estimation for one
//!   sequence
//! - [`calibrate`] - linear calibration of the internal energy scale
//!   against an external scoring system

pub mod calibrate;
pub mod ensemble;
