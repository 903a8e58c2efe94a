//! Errores de la suite.

use batch_core::BatchRuntimeError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TckError {
    #[error("{message}: expected '{expected}', found '{actual}'")]
    Assertion {
        message: String,
        expected: String,
        actual: String,
    },
    #[error(transparent)]
    Runtime(#[from] BatchRuntimeError),
    #[error("missing step execution for execution {0}")]
    MissingStepExecution(u64),
}
