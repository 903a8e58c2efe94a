use std::time::Duration;

use batch_core::{BatchStatus, JobParameters, RuntimeConfig};
use batch_tck::artifacts::specialized::{SetExitStatusAfterStepListener, StepContextAfterStepListener,
                                        StepExitStatusBatchlet};
use batch_tck::cases::exit_status as cases;
use batch_tck::{exit_status_cases, jobs, JobOperatorBridge, TckError};

fn bridge() -> JobOperatorBridge {
    JobOperatorBridge::with_config(RuntimeConfig::default().with_timeout(Duration::from_secs(10))).expect("bridge")
}

fn params(pairs: &[(&str, &str)]) -> JobParameters {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn non_null_batchlet_return_value_overrides_null_step_exit_status() {
    cases::non_null_batchlet_return_value_overrides_null_step_exit_status(&bridge()).expect("case");
}

#[test]
fn non_null_batchlet_return_value_overrides_non_null_step_exit_status() {
    cases::non_null_batchlet_return_value_overrides_non_null_step_exit_status(&bridge()).expect("case");
}

#[test]
fn null_batchlet_return_value_does_not_change_non_null_step_exit_status() {
    cases::null_batchlet_return_value_does_not_change_non_null_step_exit_status(&bridge()).expect("case");
}

#[test]
fn null_batchlet_return_value_does_not_change_null_step_exit_status() {
    cases::null_batchlet_return_value_does_not_change_null_step_exit_status(&bridge()).expect("case");
}

#[test]
fn after_step_set_exit_status_to_non_null() {
    cases::after_step_set_exit_status_to_non_null(&bridge()).expect("case");
}

#[test]
fn after_step_set_exit_status_to_null() {
    cases::after_step_set_exit_status_to_null(&bridge()).expect("case");
}

#[test]
fn non_null_job_exit_status() {
    cases::non_null_job_exit_status(&bridge()).expect("case");
}

#[test]
fn null_job_exit_status() {
    cases::null_job_exit_status(&bridge()).expect("case");
}

#[test]
fn after_job_set_exit_status_to_non_null() {
    cases::after_job_set_exit_status_to_non_null(&bridge()).expect("case");
}

#[test]
fn after_job_set_exit_status_to_null() {
    cases::after_job_set_exit_status_to_null(&bridge()).expect("case");
}

#[test]
fn whole_suite_passes_on_one_bridge() {
    let bridge = bridge();
    let cases = exit_status_cases();
    assert_eq!(cases.len(), 10);
    for case in cases {
        (case.run)(&bridge).unwrap_or_else(|e| panic!("{} failed: {e}", case.name));
    }
}

#[test]
fn wrong_expectation_in_after_step_fails_the_job() {
    let bridge = bridge();
    let p = params(&[(StepExitStatusBatchlet::BATCHLET_RETURN_VALUE_PROPERTY, StepExitStatusBatchlet::BATCHLET_RETURN_VALUE),
                     (StepContextAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY,
                      StepContextAfterStepListener::NULL_STEP_EXIT_STATUS)]);
    let execution = bridge.start_job_and_wait_for_result(jobs::STEP_CONTEXT_AFTER_STEP_TEST, p).expect("run");
    assert_eq!(execution.batch_status(), BatchStatus::Failed);
    assert_eq!(execution.exit_status(), Some("FAILED"));

    // el exit status del step conserva el último valor escrito aunque falle
    let step = bridge.first_step_execution(execution.execution_id).expect("step");
    assert_eq!(step.batch_status(), BatchStatus::Failed);
    assert_eq!(step.exit_status(), Some(StepExitStatusBatchlet::BATCHLET_RETURN_VALUE));
}

#[test]
fn wrong_expectation_in_set_after_step_is_visible_in_exit_status() {
    let bridge = bridge();
    let p = params(&[(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS_PROPERTY, StepExitStatusBatchlet::SET_STEP_EXIT_STATUS),
                     (SetExitStatusAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY, "something else"),
                     (SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY,
                      SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP)]);
    let execution = bridge.start_job_and_wait_for_result(jobs::SET_EXIT_STATUS_AFTER_STEP_TEST, p).expect("run");
    assert_eq!(execution.batch_status(), BatchStatus::Completed);
    let step = bridge.first_step_execution(execution.execution_id).expect("step");
    assert_eq!(step.exit_status(), Some(SetExitStatusAfterStepListener::BAD_EXIT_STATUS_SEEN_BY_AFTER_STEP));
}

#[test]
fn invalid_constant_fails_step_with_default_exit_status() {
    let bridge = bridge();
    let p = params(&[(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS_PROPERTY, "not a constant")]);
    let execution = bridge.start_job_and_wait_for_result(jobs::STEP_CONTEXT_AFTER_STEP_TEST, p).expect("run");
    assert_eq!(execution.batch_status(), BatchStatus::Failed);
    let step = bridge.first_step_execution(execution.execution_id).expect("step");
    assert_eq!(step.exit_status(), Some("FAILED"));
}

#[test]
fn unknown_job_is_reported_as_runtime_error() {
    let err = bridge().start_job_and_wait_for_result("noSuchJob", JobParameters::new()).unwrap_err();
    assert!(matches!(err, TckError::Runtime(_)));
}
