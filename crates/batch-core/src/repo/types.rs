//! Repositorio de ejecuciones: replay de eventos a `JobExecution` y
//! `StepExecution`.
//!
//! El replay es lineal y puro: consume eventos en orden y no guarda estado
//! propio. Una ejecución sin `JobStarted` no existe para la API de consulta.
use crate::event::{JobEvent, JobEventKind};
use crate::model::{JobExecution, StepExecution};
use crate::status::BatchStatus;

/// Trait para reconstruir (`replay`) ejecuciones a partir de eventos.
pub trait JobRepository: Send + Sync {
    fn load_job_execution(&self, execution_id: u64, events: &[JobEvent]) -> Option<JobExecution>;
    fn load_step_executions(&self, execution_id: u64, events: &[JobEvent]) -> Vec<StepExecution>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryJobRepository;

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self
    }
}

impl JobRepository for InMemoryJobRepository {
    fn load_job_execution(&self, execution_id: u64, events: &[JobEvent]) -> Option<JobExecution> {
        let mut execution: Option<JobExecution> = None;
        for ev in events {
            match &ev.kind {
                JobEventKind::JobStarted { job_name,
                                           instance_id,
                                           parameters, } => {
                    execution = Some(JobExecution { execution_id,
                                                    instance_id: *instance_id,
                                                    job_name: job_name.clone(),
                                                    parameters: parameters.clone(),
                                                    batch_status: BatchStatus::Started,
                                                    exit_status: None,
                                                    start_time: Some(ev.ts),
                                                    end_time: None });
                }
                JobEventKind::JobCompleted { batch_status, exit_status } => {
                    if let Some(exec) = execution.as_mut() {
                        exec.batch_status = *batch_status;
                        exec.exit_status = Some(exit_status.clone());
                        exec.end_time = Some(ev.ts);
                    }
                }
                JobEventKind::StepStarted { .. }
                | JobEventKind::StepCompleted { .. }
                | JobEventKind::ArtifactFailed { .. } => {}
            }
        }
        execution
    }

    fn load_step_executions(&self, _execution_id: u64, events: &[JobEvent]) -> Vec<StepExecution> {
        let mut steps: Vec<StepExecution> = Vec::new();
        for ev in events {
            match &ev.kind {
                JobEventKind::StepStarted { step_name,
                                            step_execution_id,
                                            .. } => steps.push(StepExecution { step_execution_id: *step_execution_id,
                                                                               step_name: step_name.clone(),
                                                                               batch_status: BatchStatus::Started,
                                                                               exit_status: None,
                                                                               start_time: Some(ev.ts),
                                                                               end_time: None }),
                JobEventKind::StepCompleted { step_execution_id,
                                              batch_status,
                                              exit_status,
                                              .. } => {
                    if let Some(slot) = steps.iter_mut().find(|s| s.step_execution_id == *step_execution_id) {
                        slot.batch_status = *batch_status;
                        slot.exit_status = Some(exit_status.clone());
                        slot.end_time = Some(ev.ts);
                    }
                }
                JobEventKind::JobStarted { .. } | JobEventKind::JobCompleted { .. } | JobEventKind::ArtifactFailed { .. } => {}
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStore, InMemoryEventStore};
    use crate::job::JobParameters;
    use uuid::Uuid;

    #[test]
    fn replay_exposes_exit_status_only_after_completion() {
        let store = InMemoryEventStore::new();
        let repo = InMemoryJobRepository::new();
        store.append_kind(7, JobEventKind::JobStarted { job_name: "j".into(),
                                                        instance_id: Uuid::new_v4(),
                                                        parameters: JobParameters::new() });
        store.append_kind(7, JobEventKind::StepStarted { step_index: 0,
                                                         step_name: "s1".into(),
                                                         step_execution_id: 70 });

        let running = repo.load_job_execution(7, &store.list(7)).expect("started");
        assert_eq!(running.batch_status, BatchStatus::Started);
        assert_eq!(running.exit_status, None);
        assert_eq!(repo.load_step_executions(7, &store.list(7))[0].exit_status, None);

        store.append_kind(7, JobEventKind::StepCompleted { step_index: 0,
                                                           step_name: "s1".into(),
                                                           step_execution_id: 70,
                                                           batch_status: BatchStatus::Completed,
                                                           exit_status: "DONE".into() });
        store.append_kind(7, JobEventKind::JobCompleted { batch_status: BatchStatus::Completed,
                                                          exit_status: "COMPLETED".into() });

        let done = repo.load_job_execution(7, &store.list(7)).expect("completed");
        assert_eq!(done.exit_status(), Some("COMPLETED"));
        assert!(done.is_finished());
        let steps = repo.load_step_executions(7, &store.list(7));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].exit_status(), Some("DONE"));
        assert_eq!(steps[0].batch_status(), BatchStatus::Completed);
    }

    #[test]
    fn unknown_execution_replays_to_none() {
        assert!(InMemoryJobRepository.load_job_execution(1, &[]).is_none());
    }
}
