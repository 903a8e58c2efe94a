//! Estado de una ejecución (job o step).
//!
//! Dos valores conviven en cada ejecución y no deben confundirse:
//! - `BatchStatus`: código terminal calculado por el runtime.
//! - `ExitStatus`: cadena visible para el usuario, escrita por los artifacts
//!   y resuelta al finalizar (ver `ExitStatus::finalize`).

mod batch_status;
mod exit_status;

pub use batch_status::BatchStatus;
pub use exit_status::{ExitStatus, ExitStatusPhase};
