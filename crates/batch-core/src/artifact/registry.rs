//! Registro de artifacts por nombre.
//!
//! Sustituye la búsqueda por nombre de un contenedor de inyección: cada
//! nombre se asocia a una factoría que construye una instancia nueva por
//! invocación, a partir de las propiedades ya resueltas.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::artifact::{Batchlet, JobListener, StepListener};
use crate::errors::BatchRuntimeError;
use crate::injection::ArtifactProperties;

type BatchletFactory = Arc<dyn Fn(&ArtifactProperties) -> Box<dyn Batchlet> + Send + Sync>;
type StepListenerFactory = Arc<dyn Fn(&ArtifactProperties) -> Box<dyn StepListener> + Send + Sync>;
type JobListenerFactory = Arc<dyn Fn(&ArtifactProperties) -> Box<dyn JobListener> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Batchlet,
    StepListener,
    JobListener,
}

#[derive(Clone, Default)]
pub struct ArtifactRegistry {
    batchlets: HashMap<String, BatchletFactory>,
    step_listeners: HashMap<String, StepListenerFactory>,
    job_listeners: HashMap<String, JobListenerFactory>,
}

impl fmt::Debug for ArtifactRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactRegistry")
         .field("batchlets", &self.batchlets.keys().collect::<Vec<_>>())
         .field("step_listeners", &self.step_listeners.keys().collect::<Vec<_>>())
         .field("job_listeners", &self.job_listeners.keys().collect::<Vec<_>>())
         .finish()
    }
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_batchlet<F>(&mut self, name: impl Into<String>, factory: F)
        where F: Fn(&ArtifactProperties) -> Box<dyn Batchlet> + Send + Sync + 'static
    {
        self.batchlets.insert(name.into(), Arc::new(factory));
    }

    pub fn register_step_listener<F>(&mut self, name: impl Into<String>, factory: F)
        where F: Fn(&ArtifactProperties) -> Box<dyn StepListener> + Send + Sync + 'static
    {
        self.step_listeners.insert(name.into(), Arc::new(factory));
    }

    pub fn register_job_listener<F>(&mut self, name: impl Into<String>, factory: F)
        where F: Fn(&ArtifactProperties) -> Box<dyn JobListener> + Send + Sync + 'static
    {
        self.job_listeners.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, kind: ArtifactKind, name: &str) -> bool {
        match kind {
            ArtifactKind::Batchlet => self.batchlets.contains_key(name),
            ArtifactKind::StepListener => self.step_listeners.contains_key(name),
            ArtifactKind::JobListener => self.job_listeners.contains_key(name),
        }
    }

    pub fn create_batchlet(&self, name: &str, props: &ArtifactProperties) -> Result<Box<dyn Batchlet>, BatchRuntimeError> {
        self.batchlets
            .get(name)
            .map(|f| f(props))
            .ok_or_else(|| BatchRuntimeError::ArtifactNotFound(name.to_string()))
    }

    pub fn create_step_listener(&self,
                                name: &str,
                                props: &ArtifactProperties)
                                -> Result<Box<dyn StepListener>, BatchRuntimeError> {
        self.step_listeners
            .get(name)
            .map(|f| f(props))
            .ok_or_else(|| BatchRuntimeError::ArtifactNotFound(name.to_string()))
    }

    pub fn create_job_listener(&self,
                               name: &str,
                               props: &ArtifactProperties)
                               -> Result<Box<dyn JobListener>, BatchRuntimeError> {
        self.job_listeners
            .get(name)
            .map(|f| f(props))
            .ok_or_else(|| BatchRuntimeError::ArtifactNotFound(name.to_string()))
    }
}
