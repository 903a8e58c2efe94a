use thiserror::Error;

use crate::errors::BatchRuntimeError;
use crate::model::{JobContext, StepContext};

/// Error que un artifact devuelve al runtime. Siempre hace fallar la
/// ejecución que lo contiene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("{0}")] Failed(String),
    #[error(transparent)] Runtime(#[from] BatchRuntimeError),
}

impl ArtifactError {
    pub fn failed(msg: impl Into<String>) -> Self {
        ArtifactError::Failed(msg.into())
    }
}

/// Unidad de trabajo de un step.
///
/// `process` devuelve el valor que el runtime registra como resultado:
/// `Some(v)` pisa el exit status del step, `None` no lo toca.
pub trait Batchlet: Send {
    fn process(&mut self, job: &mut JobContext, step: &mut StepContext) -> Result<Option<String>, ArtifactError>;
}

/// Listener invocado antes y después de la unidad de trabajo de un step.
///
/// `after_step` corre dentro de la fase activa: todavía puede escribir el
/// exit status del step.
pub trait StepListener: Send {
    fn before_step(&mut self, _job: &mut JobContext, _step: &mut StepContext) -> Result<(), ArtifactError> {
        Ok(())
    }

    fn after_step(&mut self, _job: &mut JobContext, _step: &mut StepContext) -> Result<(), ArtifactError> {
        Ok(())
    }
}

/// Listener invocado al inicio y al final del job.
pub trait JobListener: Send {
    fn before_job(&mut self, _job: &mut JobContext) -> Result<(), ArtifactError> {
        Ok(())
    }

    fn after_job(&mut self, _job: &mut JobContext) -> Result<(), ArtifactError> {
        Ok(())
    }
}
