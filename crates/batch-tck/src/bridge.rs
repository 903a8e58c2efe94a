//! `JobOperatorBridge`: operador con todos los jobs y artifacts de la suite
//! ya registrados.

use batch_core::{ArtifactRegistry, BatchRuntimeError, JobExecution, JobOperator, JobParameters, RuntimeConfig,
                 StepExecution};
use log::info;

use crate::artifacts::register_all;
use crate::errors::TckError;
use crate::jobs;

pub struct JobOperatorBridge {
    operator: JobOperator,
}

impl JobOperatorBridge {
    /// Bridge configurado desde el entorno (`BATCH_*`).
    pub fn new() -> Result<Self, BatchRuntimeError> {
        Self::with_config(RuntimeConfig::from_env())
    }

    pub fn with_config(config: RuntimeConfig) -> Result<Self, BatchRuntimeError> {
        let mut artifacts = ArtifactRegistry::new();
        register_all(&mut artifacts);
        let mut operator = JobOperator::new(artifacts, config);
        for job in jobs::all()? {
            operator.register_job(job)?;
        }
        Ok(Self { operator })
    }

    pub fn operator(&self) -> &JobOperator {
        &self.operator
    }

    pub fn start_job_and_wait_for_result(&self, job_name: &str, parameters: JobParameters) -> Result<JobExecution, TckError> {
        info!("invoke start_job_and_wait_for_result for '{}' with {:?}", job_name, parameters);
        Ok(self.operator.start_job_and_wait_for_result(job_name, parameters)?)
    }

    pub fn get_step_executions(&self, execution_id: u64) -> Result<Vec<StepExecution>, TckError> {
        Ok(self.operator.get_step_executions(execution_id)?)
    }

    /// Primera (y en estos jobs única) ejecución de step.
    pub fn first_step_execution(&self, execution_id: u64) -> Result<StepExecution, TckError> {
        self.get_step_executions(execution_id)?
            .into_iter()
            .next()
            .ok_or(TckError::MissingStepExecution(execution_id))
    }
}
