//! Contextos entregados explícitamente a cada invocación de artifact.
//!
//! Un contexto pertenece a una única ejecución y se destruye con ella; no hay
//! estado global. El runtime es quien mueve `batch_status` y quien congela el
//! exit status; los artifacts sólo leen/escriben mientras la fase es activa.
use uuid::Uuid;

use crate::errors::BatchRuntimeError;
use crate::job::JobParameters;
use crate::status::{BatchStatus, ExitStatus};

/// Contexto de una ejecución de job.
#[derive(Debug)]
pub struct JobContext {
    job_name: String,
    instance_id: Uuid,
    execution_id: u64,
    parameters: JobParameters,
    pub(crate) batch_status: BatchStatus,
    pub(crate) exit_status: ExitStatus,
}

impl JobContext {
    pub fn new(job_name: impl Into<String>, instance_id: Uuid, execution_id: u64, parameters: JobParameters) -> Self {
        Self { job_name: job_name.into(),
               instance_id,
               execution_id,
               parameters,
               batch_status: BatchStatus::Starting,
               exit_status: ExitStatus::new() }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn execution_id(&self) -> u64 {
        self.execution_id
    }

    pub fn parameters(&self) -> &JobParameters {
        &self.parameters
    }

    pub fn batch_status(&self) -> BatchStatus {
        self.batch_status
    }

    pub fn exit_status(&self) -> Option<&str> {
        self.exit_status.get()
    }

    pub fn set_exit_status(&mut self, value: Option<String>) -> Result<(), BatchRuntimeError> {
        self.exit_status.set(value)
    }
}

/// Contexto de una ejecución de step.
#[derive(Debug)]
pub struct StepContext {
    step_name: String,
    step_execution_id: u64,
    pub(crate) batch_status: BatchStatus,
    pub(crate) exit_status: ExitStatus,
}

impl StepContext {
    pub fn new(step_name: impl Into<String>, step_execution_id: u64) -> Self {
        Self { step_name: step_name.into(),
               step_execution_id,
               batch_status: BatchStatus::Starting,
               exit_status: ExitStatus::new() }
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn step_execution_id(&self) -> u64 {
        self.step_execution_id
    }

    pub fn batch_status(&self) -> BatchStatus {
        self.batch_status
    }

    pub fn exit_status(&self) -> Option<&str> {
        self.exit_status.get()
    }

    pub fn set_exit_status(&mut self, value: Option<String>) -> Result<(), BatchRuntimeError> {
        self.exit_status.set(value)
    }
}
