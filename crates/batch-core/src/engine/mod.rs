//! Engine module for BatchEngine implementation
//!
//! Runs one job execution at a time per call: job listeners, steps in order,
//! then exit-status finalisation for every step and for the job.

pub mod core;

pub use core::{BatchEngine, ExecutionOutcome};
