//! Jobs de la suite, declarados en código.
//!
//! Todas las propiedades de artifacts se alimentan de parámetros del job con
//! el mismo nombre, de modo que cada caso configura el comportamiento sólo a
//! través de `JobParameters`.

use batch_core::{ArtifactRef, BatchRuntimeError, JobDefinition, StepDefinition};

use crate::artifacts::specialized::{JobContextAfterJobListener, JobExitStatusBatchlet, SetExitStatusAfterJobListener,
                                    SetExitStatusAfterStepListener, StepContextAfterStepListener,
                                    StepExitStatusBatchlet};

pub const STEP_CONTEXT_AFTER_STEP_TEST: &str = "stepContextAfterStepTest";
pub const SET_EXIT_STATUS_AFTER_STEP_TEST: &str = "setExitStatusAfterStepTest";
pub const JOB_CONTEXT_AFTER_JOB_TEST: &str = "jobContextAfterJobTest";
pub const SET_EXIT_STATUS_AFTER_JOB_TEST: &str = "setExitStatusAfterJobTest";

fn step_exit_status_batchlet() -> ArtifactRef {
    ArtifactRef::new(StepExitStatusBatchlet::NAME).job_parameter(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS_PROPERTY)
                                                  .job_parameter(StepExitStatusBatchlet::BATCHLET_RETURN_VALUE_PROPERTY)
}

fn job_exit_status_step() -> StepDefinition {
    StepDefinition::new("step1",
                        ArtifactRef::new(JobExitStatusBatchlet::NAME).job_parameter(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS_PROPERTY))
}

pub fn step_context_after_step_test() -> Result<JobDefinition, BatchRuntimeError> {
    JobDefinition::builder(STEP_CONTEXT_AFTER_STEP_TEST).step(StepDefinition::new("step1", step_exit_status_batchlet())
                                                           .listener(ArtifactRef::new(StepContextAfterStepListener::NAME)
                                                                         .job_parameter(StepContextAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY)))
                                                        .build()
}

pub fn set_exit_status_after_step_test() -> Result<JobDefinition, BatchRuntimeError> {
    let listener = ArtifactRef::new(SetExitStatusAfterStepListener::NAME)
        .job_parameter(SetExitStatusAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY)
        .job_parameter(SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY);
    JobDefinition::builder(SET_EXIT_STATUS_AFTER_STEP_TEST).step(StepDefinition::new("step1", step_exit_status_batchlet()).listener(listener))
                                                           .build()
}

pub fn job_context_after_job_test() -> Result<JobDefinition, BatchRuntimeError> {
    JobDefinition::builder(JOB_CONTEXT_AFTER_JOB_TEST)
        .listener(ArtifactRef::new(JobContextAfterJobListener::NAME).job_parameter(JobContextAfterJobListener::EXPECTED_JOB_EXIT_STATUS_PROPERTY))
        .step(job_exit_status_step())
        .build()
}

pub fn set_exit_status_after_job_test() -> Result<JobDefinition, BatchRuntimeError> {
    let listener = ArtifactRef::new(SetExitStatusAfterJobListener::NAME)
        .job_parameter(SetExitStatusAfterJobListener::EXPECTED_JOB_EXIT_STATUS_PROPERTY)
        .job_parameter(SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY);
    JobDefinition::builder(SET_EXIT_STATUS_AFTER_JOB_TEST).listener(listener)
                                                          .step(job_exit_status_step())
                                                          .build()
}

/// Todas las definiciones de la suite.
pub fn all() -> Result<Vec<JobDefinition>, BatchRuntimeError> {
    Ok(vec![step_context_after_step_test()?,
            set_exit_status_after_step_test()?,
            job_context_after_job_test()?,
            set_exit_status_after_job_test()?])
}
