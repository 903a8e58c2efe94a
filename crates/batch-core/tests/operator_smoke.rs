use std::thread;
use std::time::Duration;

use batch_core::{ArtifactError, ArtifactRef, ArtifactRegistry, BatchRuntimeError, BatchStatus, Batchlet, JobContext,
                 JobDefinition, JobOperator, JobParameters, RuntimeConfig, StepContext, StepDefinition};

struct ReturnParam {
    value: Option<String>,
    sleep_ms: u64,
}

impl Batchlet for ReturnParam {
    fn process(&mut self, _job: &mut JobContext, _step: &mut StepContext) -> Result<Option<String>, ArtifactError> {
        if self.sleep_ms > 0 {
            thread::sleep(Duration::from_millis(self.sleep_ms));
        }
        Ok(self.value.clone())
    }
}

fn operator(timeout_ms: u64) -> JobOperator {
    let mut artifacts = ArtifactRegistry::new();
    artifacts.register_batchlet("returnParam", |p| {
                 Box::new(ReturnParam { value: p.get("value").map(str::to_string),
                                        sleep_ms: p.get("sleep.ms").and_then(|v| v.parse().ok()).unwrap_or(0) })
             });
    let config = RuntimeConfig::default().with_timeout(Duration::from_millis(timeout_ms));
    let mut op = JobOperator::new(artifacts, config);
    let job = JobDefinition::builder("returnJob").step(StepDefinition::new("only",
                                                                           ArtifactRef::new("returnParam").job_parameter("value")
                                                                                                          .job_parameter("sleep.ms")))
                                                 .build()
                                                 .expect("valid job");
    op.register_job(job).expect("register");
    op
}

fn params(pairs: &[(&str, &str)]) -> JobParameters {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn start_and_wait_reports_frozen_exit_statuses() {
    let op = operator(5_000);
    let exec = op.start_job_and_wait_for_result("returnJob", params(&[("value", "DONE")]))
                 .expect("job should finish");
    assert_eq!(exec.batch_status(), BatchStatus::Completed);
    assert_eq!(exec.exit_status(), Some("COMPLETED"));
    assert_eq!(exec.job_name, "returnJob");

    let steps = op.get_step_executions(exec.execution_id).expect("steps");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].exit_status(), Some("DONE"));
    assert_eq!(steps[0].step_name, "only");
}

#[test]
fn absent_parameter_defaults_step_exit_status() {
    let op = operator(5_000);
    let exec = op.start_job_and_wait_for_result("returnJob", JobParameters::new()).expect("finish");
    let steps = op.get_step_executions(exec.execution_id).expect("steps");
    assert_eq!(steps[0].exit_status(), Some(steps[0].batch_status().to_string().as_str()));
}

#[test]
fn concurrent_executions_do_not_share_exit_status() {
    let op = operator(5_000);
    let a = op.start("returnJob", params(&[("value", "A"), ("sleep.ms", "50")])).expect("start a");
    let b = op.start("returnJob", params(&[("value", "B")])).expect("start b");
    assert_ne!(a, b);

    let exec_b = op.wait_for_execution(b).expect("b");
    let exec_a = op.wait_for_execution(a).expect("a");
    assert_eq!(op.get_step_executions(exec_a.execution_id).unwrap()[0].exit_status(), Some("A"));
    assert_eq!(op.get_step_executions(exec_b.execution_id).unwrap()[0].exit_status(), Some("B"));
    // una segunda espera devuelve el registro ya congelado
    assert_eq!(op.wait_for_execution(a).expect("again"), exec_a);
}

#[test]
fn wait_times_out_then_succeeds() {
    let op = operator(10);
    let id = op.start("returnJob", params(&[("sleep.ms", "300")])).expect("start");
    assert_eq!(op.wait_for_execution(id), Err(BatchRuntimeError::Timeout(10)));
    thread::sleep(Duration::from_millis(600));
    let exec = op.wait_for_execution(id).expect("finished after sleep");
    assert_eq!(exec.batch_status(), BatchStatus::Completed);
}

#[test]
fn unknown_job_and_execution_are_errors() {
    let op = operator(1_000);
    assert_eq!(op.start("nope", JobParameters::new()),
               Err(BatchRuntimeError::JobNotFound("nope".into())));
    assert_eq!(op.get_job_execution(999), Err(BatchRuntimeError::ExecutionNotFound(999)));
    assert_eq!(op.get_step_executions(999), Err(BatchRuntimeError::ExecutionNotFound(999)));
}

#[test]
fn register_rejects_unknown_artifacts() {
    let mut op = operator(1_000);
    let job = JobDefinition::builder("broken").step(StepDefinition::new("s", ArtifactRef::new("returnParam"))
                                                      .listener(ArtifactRef::new("ghostListener")))
                                              .build()
                                              .expect("structurally valid");
    let err = op.register_job(job).unwrap_err();
    assert!(matches!(err, BatchRuntimeError::ArtifactNotFound(msg) if msg.contains("ghostListener")));
    assert_eq!(op.job_names(), vec!["returnJob"]);
}

#[test]
fn concurrent_waiters_both_see_frozen_record() {
    let op = operator(5_000);
    let id = op.start("returnJob", params(&[("value", "W"), ("sleep.ms", "300")])).expect("start");

    let (first, second) = thread::scope(|s| {
        let first = s.spawn(|| op.wait_for_execution(id));
        thread::sleep(Duration::from_millis(50));
        let second = s.spawn(|| op.wait_for_execution(id));
        (first.join().expect("first waiter"), second.join().expect("second waiter"))
    });

    for exec in [first.expect("first"), second.expect("second")] {
        assert_eq!(exec.batch_status(), BatchStatus::Completed);
        assert_eq!(exec.exit_status(), Some("COMPLETED"));
        assert!(exec.is_finished());
    }
}

#[test]
fn finished_executions_leave_no_in_flight_entry() {
    let op = operator(5_000);
    let ids: Vec<u64> = (0..3).map(|_| op.start("returnJob", JobParameters::new()).expect("start"))
                              .collect();

    // nadie espera: el hilo de cada ejecución limpia su propia entrada
    for _ in 0..200 {
        if op.running_executions() == 0 {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(op.running_executions(), 0);
    for id in ids {
        assert!(op.get_job_execution(id).expect("replayed").is_finished());
    }
}
