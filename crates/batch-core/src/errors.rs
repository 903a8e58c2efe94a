//! Errores específicos del runtime batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::ExitStatusPhase;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum BatchRuntimeError {
    /// Escritura del exit status fuera de la fase activa.
    #[error("exit status is not writable in phase {phase:?} ({operation})")]
    ExitStatusFrozen { operation: String, phase: ExitStatusPhase },
    /// `finalize` invocado más de una vez sobre la misma ejecución.
    #[error("exit status already finalized as '{0}'")]
    ExitStatusAlreadyFinalized(String),
    #[error("job definition not found: {0}")] JobNotFound(String),
    #[error("artifact not registered: {0}")] ArtifactNotFound(String),
    #[error("execution not found: {0}")] ExecutionNotFound(u64),
    #[error("invalid job definition: {0}")] InvalidJobDefinition(String),
    #[error("timed out after {0} ms waiting for job execution")] Timeout(u64),
    #[error("internal: {0}")] Internal(String),
}
