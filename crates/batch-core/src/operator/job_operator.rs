//! `JobOperator`: punto de entrada para lanzar jobs registrados por nombre.
//!
//! Cada ejecución corre en su propio hilo con contextos propios; el operador
//! sólo comparte el `BatchEngine` (event store + registro de artifacts). Las
//! consultas (`get_job_execution`, `get_step_executions`) reconstruyen el
//! estado a partir de los eventos vía `JobRepository`.
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Instant;

use log::{debug, error, info};

use crate::artifact::{ArtifactKind, ArtifactRegistry};
use crate::config::RuntimeConfig;
use crate::engine::BatchEngine;
use crate::errors::BatchRuntimeError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::job::{JobDefinition, JobParameters};
use crate::model::{JobExecution, StepExecution};
use crate::repo::{InMemoryJobRepository, JobRepository};

/// Ejecuciones lanzadas que todavía no terminaron su hilo.
#[derive(Debug, Default)]
struct InFlight {
    ids: Mutex<HashSet<u64>>,
    done: Condvar,
}

impl InFlight {
    fn lock(&self) -> Result<MutexGuard<'_, HashSet<u64>>, BatchRuntimeError> {
        self.ids.lock().map_err(|_| poisoned())
    }
}

fn poisoned() -> BatchRuntimeError {
    BatchRuntimeError::Internal("in-flight executions lock poisoned".into())
}

/// Saca la ejecución de `InFlight` al terminar el hilo, también si hace panic.
struct CompletionGuard {
    in_flight: Arc<InFlight>,
    execution_id: u64,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let mut ids = self.in_flight.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.remove(&self.execution_id);
        self.in_flight.done.notify_all();
    }
}

pub struct JobOperator<E = InMemoryEventStore, R = InMemoryJobRepository>
    where E: EventStore + 'static,
          R: JobRepository
{
    engine: Arc<BatchEngine<E>>,
    repository: R,
    jobs: HashMap<String, Arc<JobDefinition>>,
    config: RuntimeConfig,
    execution_ids: AtomicU64,
    in_flight: Arc<InFlight>,
}

impl JobOperator<InMemoryEventStore, InMemoryJobRepository> {
    /// Operador con stores en memoria.
    pub fn new(artifacts: ArtifactRegistry, config: RuntimeConfig) -> Self {
        Self::with_stores(Arc::new(InMemoryEventStore::new()), InMemoryJobRepository::new(), artifacts, config)
    }
}

impl<E, R> JobOperator<E, R>
    where E: EventStore + 'static,
          R: JobRepository
{
    pub fn with_stores(event_store: Arc<E>, repository: R, artifacts: ArtifactRegistry, config: RuntimeConfig) -> Self {
        Self { engine: Arc::new(BatchEngine::new(event_store, artifacts)),
               repository,
               jobs: HashMap::new(),
               config,
               execution_ids: AtomicU64::new(1),
               in_flight: Arc::new(InFlight::default()) }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_store(&self) -> &Arc<E> {
        self.engine.event_store()
    }

    /// Registra un job por su id. Todos los artifacts referenciados deben
    /// existir en el registro.
    pub fn register_job(&mut self, definition: JobDefinition) -> Result<(), BatchRuntimeError> {
        let artifacts = self.engine.artifacts();
        let mut refs: Vec<(ArtifactKind, &str)> = definition.listeners
                                                            .iter()
                                                            .map(|r| (ArtifactKind::JobListener, r.name.as_str()))
                                                            .collect();
        for step in &definition.steps {
            refs.push((ArtifactKind::Batchlet, step.batchlet.name.as_str()));
            refs.extend(step.listeners.iter().map(|r| (ArtifactKind::StepListener, r.name.as_str())));
        }
        if let Some((kind, name)) = refs.into_iter().find(|(kind, name)| !artifacts.contains(*kind, name)) {
            return Err(BatchRuntimeError::ArtifactNotFound(format!("{kind:?} '{name}' in job '{}'", definition.id)));
        }
        debug!("registered job '{}' ({} steps)", definition.id, definition.len());
        self.jobs.insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn job_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.jobs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Lanza una ejecución en segundo plano y devuelve su id.
    pub fn start(&self, job_name: &str, parameters: JobParameters) -> Result<u64, BatchRuntimeError> {
        let definition = self.jobs
                             .get(job_name)
                             .cloned()
                             .ok_or_else(|| BatchRuntimeError::JobNotFound(job_name.to_string()))?;
        let execution_id = self.execution_ids.fetch_add(1, Ordering::SeqCst);
        let engine = Arc::clone(&self.engine);
        // se registra antes de lanzar el hilo para que ningún waiter llegue antes
        self.in_flight.lock()?.insert(execution_id);
        let guard = CompletionGuard { in_flight: Arc::clone(&self.in_flight),
                                      execution_id };

        let spawned = thread::Builder::new().name(format!("batch-job-{execution_id}"))
                                            .spawn(move || {
                                                let _guard = guard;
                                                if let Err(e) = engine.run_job(&definition, parameters, execution_id) {
                                                    error!("execution {} aborted: {}", execution_id, e);
                                                }
                                            });
        // si el spawn falla el closure (y con él el guard) se descarta y libera el id
        spawned.map_err(|e| BatchRuntimeError::Internal(format!("cannot spawn job thread: {e}")))?;

        info!("started job '{}' as execution {}", job_name, execution_id);
        Ok(execution_id)
    }

    /// Bloquea hasta que la ejecución termine o venza `job_timeout_ms`.
    ///
    /// Sólo devuelve `Ok` con el registro ya congelado; varios waiters sobre
    /// el mismo id reciben el mismo resultado.
    pub fn wait_for_execution(&self, execution_id: u64) -> Result<JobExecution, BatchRuntimeError> {
        // un timeout que no cabe en `Instant` equivale a esperar sin límite
        let deadline = Instant::now().checked_add(self.config.job_timeout());
        let mut ids = self.in_flight.lock()?;
        while ids.contains(&execution_id) {
            ids = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(BatchRuntimeError::Timeout(self.config.job_timeout_ms));
                    }
                    self.in_flight.done.wait_timeout(ids, remaining).map(|(ids, _)| ids).map_err(|_| poisoned())?
                }
                None => self.in_flight.done.wait(ids).map_err(|_| poisoned())?,
            };
        }
        drop(ids);

        let execution = self.get_job_execution(execution_id)?;
        if !execution.is_finished() {
            return Err(BatchRuntimeError::Internal(format!("execution {execution_id} terminated without result")));
        }
        Ok(execution)
    }

    /// Número de ejecuciones cuyo hilo sigue activo.
    pub fn running_executions(&self) -> usize {
        self.in_flight.lock().map(|ids| ids.len()).unwrap_or(0)
    }

    pub fn start_job_and_wait_for_result(&self,
                                         job_name: &str,
                                         parameters: JobParameters)
                                         -> Result<JobExecution, BatchRuntimeError> {
        let execution_id = self.start(job_name, parameters)?;
        self.wait_for_execution(execution_id)
    }

    pub fn get_job_execution(&self, execution_id: u64) -> Result<JobExecution, BatchRuntimeError> {
        let events = self.event_store().list(execution_id);
        self.repository
            .load_job_execution(execution_id, &events)
            .ok_or(BatchRuntimeError::ExecutionNotFound(execution_id))
    }

    pub fn get_step_executions(&self, execution_id: u64) -> Result<Vec<StepExecution>, BatchRuntimeError> {
        let events = self.event_store().list(execution_id);
        if events.is_empty() {
            return Err(BatchRuntimeError::ExecutionNotFound(execution_id));
        }
        Ok(self.repository.load_step_executions(execution_id, &events))
    }
}
