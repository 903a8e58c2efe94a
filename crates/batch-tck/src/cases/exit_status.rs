//! Casos de conformidad de exit status de step y de job.
//!
//! Cada caso configura los artifacts mediante parámetros del job, lanza la
//! ejecución y compara el exit status congelado. Todos exigen además que el
//! job termine `COMPLETED`: los listeners de verificación hacen fallar el job
//! si ven un exit status inesperado durante la fase activa.

use batch_core::{BatchStatus, JobParameters};
use log::info;

use crate::artifacts::specialized::{JobContextAfterJobListener, JobExitStatusBatchlet, SetExitStatusAfterJobListener,
                                    SetExitStatusAfterStepListener, StepContextAfterStepListener,
                                    StepExitStatusBatchlet as Batchlet};
use crate::assertions::{assert_exit_status, assert_with_message};
use crate::bridge::JobOperatorBridge;
use crate::errors::TckError;
use crate::jobs;

const STEP_EXIT_STATUS_MSG: &str = "The Step Execution's ExitStatus is incorrect";
const JOB_EXIT_STATUS_MSG: &str = "The Job Execution's ExitStatus is incorrect";
const JOB_BATCH_STATUS_MSG: &str = "The Job Execution's BatchStatus is incorrect";

const EXPECTED_STEP: &str = StepContextAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY;
const EXPECTED_JOB: &str = JobContextAfterJobListener::EXPECTED_JOB_EXIT_STATUS_PROPERTY;

/// Un caso ejecutable de la suite.
#[derive(Clone, Copy)]
pub struct TckCase {
    pub name: &'static str,
    pub run: fn(&JobOperatorBridge) -> Result<(), TckError>,
}

impl std::fmt::Debug for TckCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TckCase").field("name", &self.name).finish()
    }
}

pub fn exit_status_cases() -> Vec<TckCase> {
    vec![TckCase { name: "non_null_batchlet_return_value_overrides_null_step_exit_status",
                   run: non_null_batchlet_return_value_overrides_null_step_exit_status },
         TckCase { name: "non_null_batchlet_return_value_overrides_non_null_step_exit_status",
                   run: non_null_batchlet_return_value_overrides_non_null_step_exit_status },
         TckCase { name: "null_batchlet_return_value_does_not_change_non_null_step_exit_status",
                   run: null_batchlet_return_value_does_not_change_non_null_step_exit_status },
         TckCase { name: "null_batchlet_return_value_does_not_change_null_step_exit_status",
                   run: null_batchlet_return_value_does_not_change_null_step_exit_status },
         TckCase { name: "after_step_set_exit_status_to_non_null",
                   run: after_step_set_exit_status_to_non_null },
         TckCase { name: "after_step_set_exit_status_to_null",
                   run: after_step_set_exit_status_to_null },
         TckCase { name: "non_null_job_exit_status",
                   run: non_null_job_exit_status },
         TckCase { name: "null_job_exit_status",
                   run: null_job_exit_status },
         TckCase { name: "after_job_set_exit_status_to_non_null",
                   run: after_job_set_exit_status_to_non_null },
         TckCase { name: "after_job_set_exit_status_to_null",
                   run: after_job_set_exit_status_to_null },]
}

fn params(pairs: &[(&str, &str)]) -> JobParameters {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Lanza un job de un único step y comprueba el exit status del step.
/// `None` como esperado significa "la forma textual del batch status del step".
fn check_step_exit_status(bridge: &JobOperatorBridge,
                          job_name: &str,
                          parameters: JobParameters,
                          expected: Option<&str>)
                          -> Result<(), TckError> {
    let execution = bridge.start_job_and_wait_for_result(job_name, parameters)?;
    let step = bridge.first_step_execution(execution.execution_id)?;
    let step_batch_status = step.batch_status().to_string();
    assert_exit_status(STEP_EXIT_STATUS_MSG, expected.unwrap_or(step_batch_status.as_str()), step.exit_status())?;
    assert_with_message(JOB_BATCH_STATUS_MSG, BatchStatus::Completed, execution.batch_status())
}

/// Igual que `check_step_exit_status` pero sobre el exit status del job.
fn check_job_exit_status(bridge: &JobOperatorBridge,
                         job_name: &str,
                         parameters: JobParameters,
                         expected: Option<&str>)
                         -> Result<(), TckError> {
    let execution = bridge.start_job_and_wait_for_result(job_name, parameters)?;
    let job_batch_status = execution.batch_status().to_string();
    assert_exit_status(JOB_EXIT_STATUS_MSG, expected.unwrap_or(job_batch_status.as_str()), execution.exit_status())?;
    assert_with_message(JOB_BATCH_STATUS_MSG, BatchStatus::Completed, execution.batch_status())
}

pub fn non_null_batchlet_return_value_overrides_null_step_exit_status(bridge: &JobOperatorBridge)
                                                                      -> Result<(), TckError> {
    info!("batchlet returns a value and no exit status was set: the return value wins");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::DO_NOT_SET_STEP_EXIT_STATUS),
                     (Batchlet::BATCHLET_RETURN_VALUE_PROPERTY, Batchlet::BATCHLET_RETURN_VALUE),
                     (EXPECTED_STEP, Batchlet::BATCHLET_RETURN_VALUE)]);
    check_step_exit_status(bridge, jobs::STEP_CONTEXT_AFTER_STEP_TEST, p, Some(Batchlet::BATCHLET_RETURN_VALUE))
}

pub fn non_null_batchlet_return_value_overrides_non_null_step_exit_status(bridge: &JobOperatorBridge)
                                                                          -> Result<(), TckError> {
    info!("batchlet sets the step exit status and returns a value: the return value wins");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::SET_STEP_EXIT_STATUS),
                     (Batchlet::BATCHLET_RETURN_VALUE_PROPERTY, Batchlet::BATCHLET_RETURN_VALUE),
                     (EXPECTED_STEP, Batchlet::BATCHLET_RETURN_VALUE)]);
    check_step_exit_status(bridge, jobs::STEP_CONTEXT_AFTER_STEP_TEST, p, Some(Batchlet::BATCHLET_RETURN_VALUE))
}

pub fn null_batchlet_return_value_does_not_change_non_null_step_exit_status(bridge: &JobOperatorBridge)
                                                                            -> Result<(), TckError> {
    info!("batchlet sets the step exit status and returns nothing: the set value survives");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::SET_STEP_EXIT_STATUS),
                     (Batchlet::BATCHLET_RETURN_VALUE_PROPERTY, Batchlet::BATCHLET_RETURN_VALUE_NULL),
                     (EXPECTED_STEP, Batchlet::SET_STEP_EXIT_STATUS)]);
    check_step_exit_status(bridge, jobs::STEP_CONTEXT_AFTER_STEP_TEST, p, Some(Batchlet::SET_STEP_EXIT_STATUS))
}

pub fn null_batchlet_return_value_does_not_change_null_step_exit_status(bridge: &JobOperatorBridge)
                                                                        -> Result<(), TckError> {
    info!("nothing sets the step exit status: it defaults to the step batch status");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::DO_NOT_SET_STEP_EXIT_STATUS),
                     (Batchlet::BATCHLET_RETURN_VALUE_PROPERTY, Batchlet::BATCHLET_RETURN_VALUE_NULL),
                     (EXPECTED_STEP, StepContextAfterStepListener::NULL_STEP_EXIT_STATUS)]);
    check_step_exit_status(bridge, jobs::STEP_CONTEXT_AFTER_STEP_TEST, p, None)
}

pub fn after_step_set_exit_status_to_non_null(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("after_step overwrites the step exit status set by the batchlet");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::SET_STEP_EXIT_STATUS),
                     (EXPECTED_STEP, Batchlet::SET_STEP_EXIT_STATUS),
                     (SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY,
                      SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP)]);
    check_step_exit_status(bridge,
                           jobs::SET_EXIT_STATUS_AFTER_STEP_TEST,
                           p,
                           Some(SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP))
}

pub fn after_step_set_exit_status_to_null(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("after_step resets the step exit status: it defaults to the step batch status");
    let p = params(&[(Batchlet::SET_STEP_EXIT_STATUS_PROPERTY, Batchlet::SET_STEP_EXIT_STATUS),
                     (EXPECTED_STEP, Batchlet::SET_STEP_EXIT_STATUS),
                     (SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY,
                      SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_NULL)]);
    check_step_exit_status(bridge, jobs::SET_EXIT_STATUS_AFTER_STEP_TEST, p, None)
}

pub fn non_null_job_exit_status(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("a step artifact sets the job exit status and after_job observes it");
    let p = params(&[(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS_PROPERTY, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS),
                     (EXPECTED_JOB, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS)]);
    check_job_exit_status(bridge,
                          jobs::JOB_CONTEXT_AFTER_JOB_TEST,
                          p,
                          Some(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS))
}

pub fn null_job_exit_status(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("nothing sets the job exit status: after_job sees it unset and it defaults to the job batch status");
    let p = params(&[(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS_PROPERTY,
                      JobExitStatusBatchlet::DO_NOT_SET_JOB_EXIT_STATUS),
                     (EXPECTED_JOB, JobContextAfterJobListener::NULL_JOB_EXIT_STATUS)]);
    check_job_exit_status(bridge, jobs::JOB_CONTEXT_AFTER_JOB_TEST, p, None)
}

pub fn after_job_set_exit_status_to_non_null(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("after_job overwrites the job exit status");
    let p = params(&[(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS_PROPERTY, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS),
                     (EXPECTED_JOB, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS),
                     (SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY,
                      SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB)]);
    check_job_exit_status(bridge,
                          jobs::SET_EXIT_STATUS_AFTER_JOB_TEST,
                          p,
                          Some(SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB))
}

pub fn after_job_set_exit_status_to_null(bridge: &JobOperatorBridge) -> Result<(), TckError> {
    info!("after_job resets the job exit status: it defaults to the job batch status");
    let p = params(&[(JobExitStatusBatchlet::SET_JOB_EXIT_STATUS_PROPERTY, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS),
                     (EXPECTED_JOB, JobExitStatusBatchlet::SET_JOB_EXIT_STATUS),
                     (SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY,
                      SetExitStatusAfterJobListener::SET_JOB_EXIT_STATUS_AFTER_JOB_NULL)]);
    check_job_exit_status(bridge, jobs::SET_EXIT_STATUS_AFTER_JOB_TEST, p, None)
}
