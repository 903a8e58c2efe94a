//! Core BatchEngine implementation

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::artifact::{ArtifactError, ArtifactRegistry, JobListener, StepListener};
use crate::errors::BatchRuntimeError;
use crate::event::{EventStore, JobEventKind};
use crate::injection::resolve_properties;
use crate::job::{ArtifactRef, JobDefinition, JobParameters, StepDefinition};
use crate::model::{JobContext, StepContext};
use crate::status::BatchStatus;

/// Resultado congelado de una ejecución (job o step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub batch_status: BatchStatus,
    pub exit_status: String,
}

/// Motor de ejecución secuencial de jobs.
///
/// Orquesta artifacts y listeners en orden fijo, mueve el `BatchStatus` de
/// cada contexto y congela los exit status cuando la ejecución está
/// quiescente. Un mismo engine puede ejecutar varios jobs en paralelo (cada
/// uno con sus propios contextos); lo único compartido es el event store y
/// el contador de ids de step.
#[derive(Debug)]
pub struct BatchEngine<E: EventStore> {
    event_store: Arc<E>,
    artifacts: ArtifactRegistry,
    step_ids: AtomicU64,
}

impl<E: EventStore> BatchEngine<E> {
    pub fn new(event_store: Arc<E>, artifacts: ArtifactRegistry) -> Self {
        Self { event_store,
               artifacts,
               step_ids: AtomicU64::new(1) }
    }

    pub fn event_store(&self) -> &Arc<E> {
        &self.event_store
    }

    pub fn artifacts(&self) -> &ArtifactRegistry {
        &self.artifacts
    }

    /// Ejecuta una ejecución completa del job.
    ///
    /// Los fallos de artifacts no se devuelven como `Err`: terminan en un
    /// `BatchStatus::Failed` y en eventos `ArtifactFailed`. `Err` queda para
    /// violaciones de contrato del propio runtime.
    pub fn run_job(&self,
                   definition: &JobDefinition,
                   parameters: JobParameters,
                   execution_id: u64)
                   -> Result<ExecutionOutcome, BatchRuntimeError> {
        let mut job = JobContext::new(&definition.id, Uuid::new_v4(), execution_id, parameters.clone());
        self.event_store.append_kind(execution_id,
                                     JobEventKind::JobStarted { job_name: definition.id.clone(),
                                                                instance_id: job.instance_id(),
                                                                parameters: parameters.clone() });
        job.batch_status = BatchStatus::Started;
        info!("job '{}' execution {} started", definition.id, execution_id);

        let mut failed = false;
        let mut listeners: Vec<(&str, Box<dyn JobListener>)> = Vec::with_capacity(definition.listeners.len());
        for r in &definition.listeners {
            match guarded(|| self.create_job_listener(r, &parameters)) {
                Ok(l) => listeners.push((r.name.as_str(), l)),
                Err(e) => {
                    self.record_failure(execution_id, None, &r.name, &e);
                    failed = true;
                }
            }
        }

        if !failed {
            for (name, l) in listeners.iter_mut() {
                if let Err(e) = guarded(|| l.before_job(&mut job)) {
                    self.record_failure(execution_id, None, name, &e);
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            for (index, step) in definition.steps.iter().enumerate() {
                let outcome = self.run_step(&mut job, index, step, &parameters)?;
                if outcome.batch_status == BatchStatus::Failed {
                    debug!("job '{}' stops after failed step '{}'", definition.id, step.id);
                    failed = true;
                    break;
                }
            }
        }

        // after_job corre siempre, también tras un fallo previo
        for (name, l) in listeners.iter_mut() {
            if let Err(e) = guarded(|| l.after_job(&mut job)) {
                self.record_failure(execution_id, None, name, &e);
                failed = true;
            }
        }

        job.exit_status.quiesce()?;
        let terminal = if failed { BatchStatus::Failed } else { BatchStatus::Completed };
        job.batch_status = terminal;
        let exit_status = job.exit_status.finalize(terminal)?;
        self.event_store.append_kind(execution_id,
                                     JobEventKind::JobCompleted { batch_status: terminal,
                                                                  exit_status: exit_status.clone() });
        info!("job '{}' execution {} finished: batch_status={} exit_status='{}'",
              definition.id, execution_id, terminal, exit_status);

        Ok(ExecutionOutcome { batch_status: terminal,
                              exit_status })
    }

    fn run_step(&self,
                job: &mut JobContext,
                index: usize,
                step: &StepDefinition,
                parameters: &JobParameters)
                -> Result<ExecutionOutcome, BatchRuntimeError> {
        let execution_id = job.execution_id();
        let step_execution_id = self.step_ids.fetch_add(1, Ordering::SeqCst);
        let mut ctx = StepContext::new(&step.id, step_execution_id);
        self.event_store.append_kind(execution_id,
                                     JobEventKind::StepStarted { step_index: index,
                                                                 step_name: step.id.clone(),
                                                                 step_execution_id });
        ctx.batch_status = BatchStatus::Started;
        debug!("step '{}' ({}) started", step.id, step_execution_id);

        let mut failed = false;
        let mut listeners: Vec<(&str, Box<dyn StepListener>)> = Vec::with_capacity(step.listeners.len());
        for r in &step.listeners {
            match guarded(|| self.create_step_listener(r, parameters)) {
                Ok(l) => listeners.push((r.name.as_str(), l)),
                Err(e) => {
                    self.record_failure(execution_id, Some(step.id.as_str()), &r.name, &e);
                    failed = true;
                }
            }
        }

        if !failed {
            for (name, l) in listeners.iter_mut() {
                if let Err(e) = guarded(|| l.before_step(job, &mut ctx)) {
                    self.record_failure(execution_id, Some(step.id.as_str()), name, &e);
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            let processed = guarded(|| self.create_batchlet(&step.batchlet, parameters))
                .and_then(|mut batchlet| guarded(|| batchlet.process(job, &mut ctx)));
            let recorded = processed.and_then(|ret| {
                                        debug!("step '{}' batchlet returned {:?}", step.id, ret);
                                        ctx.exit_status.record_unit_of_work_result(ret).map_err(ArtifactError::from)
                                    });
            if let Err(e) = recorded {
                self.record_failure(execution_id, Some(step.id.as_str()), &step.batchlet.name, &e);
                failed = true;
            }
        }

        // los listeners posteriores siguen en fase activa y pueden pisar el resultado
        for (name, l) in listeners.iter_mut() {
            if let Err(e) = guarded(|| l.after_step(job, &mut ctx)) {
                self.record_failure(execution_id, Some(step.id.as_str()), name, &e);
                failed = true;
            }
        }

        ctx.exit_status.quiesce()?;
        let terminal = if failed { BatchStatus::Failed } else { BatchStatus::Completed };
        ctx.batch_status = terminal;
        let exit_status = ctx.exit_status.finalize(terminal)?;
        self.event_store.append_kind(execution_id,
                                     JobEventKind::StepCompleted { step_index: index,
                                                                   step_name: step.id.clone(),
                                                                   step_execution_id,
                                                                   batch_status: terminal,
                                                                   exit_status: exit_status.clone() });
        debug!("step '{}' ({}) finished: batch_status={} exit_status='{}'",
               step.id, step_execution_id, terminal, exit_status);

        Ok(ExecutionOutcome { batch_status: terminal,
                              exit_status })
    }

    fn create_job_listener(&self, r: &ArtifactRef, params: &JobParameters) -> Result<Box<dyn JobListener>, ArtifactError> {
        let props = resolve_properties(&r.properties, params);
        Ok(self.artifacts.create_job_listener(&r.name, &props)?)
    }

    fn create_step_listener(&self, r: &ArtifactRef, params: &JobParameters) -> Result<Box<dyn StepListener>, ArtifactError> {
        let props = resolve_properties(&r.properties, params);
        Ok(self.artifacts.create_step_listener(&r.name, &props)?)
    }

    fn create_batchlet(&self,
                       r: &ArtifactRef,
                       params: &JobParameters)
                       -> Result<Box<dyn crate::artifact::Batchlet>, ArtifactError> {
        let props = resolve_properties(&r.properties, params);
        Ok(self.artifacts.create_batchlet(&r.name, &props)?)
    }

    fn record_failure(&self, execution_id: u64, step_name: Option<&str>, artifact: &str, error: &ArtifactError) {
        warn!("artifact '{}' failed in execution {} (step {:?}): {}",
              artifact, execution_id, step_name, error);
        self.event_store.append_kind(execution_id,
                                     JobEventKind::ArtifactFailed { step_name: step_name.map(str::to_string),
                                                                    artifact: artifact.to_string(),
                                                                    error: error.to_string() });
    }
}

/// Ejecuta una llamada a artifact convirtiendo un panic en `ArtifactError`.
///
/// El contexto conserva lo escrito antes del panic, así que la ejecución se
/// congela igual que ante un error devuelto.
fn guarded<T>(call: impl FnOnce() -> Result<T, ArtifactError>) -> Result<T, ArtifactError> {
    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
                                            Err(ArtifactError::failed(format!("artifact panicked: {}",
                                                                              panic_message(payload.as_ref()))))
                                        })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload.downcast_ref::<&str>()
           .copied()
           .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
           .unwrap_or("<non-string panic payload>")
}
