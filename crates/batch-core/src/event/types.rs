//! Tipos de evento de una ejecución de job y estructura `JobEvent`.
//!
//! Rol en el runtime:
//! - Cada ejecución emite eventos a un `EventStore` append-only.
//! - El `JobRepository` reconstruye `JobExecution`/`StepExecution` a partir de
//!   ellos; la API de consulta nunca ve el estado mutable del engine.
//! - Los exit status sólo aparecen ya congelados (`StepCompleted`,
//!   `JobCompleted`).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::JobParameters;
use crate::status::BatchStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobEventKind {
    /// Primer evento de toda ejecución.
    JobStarted {
        job_name: String,
        instance_id: Uuid,
        parameters: JobParameters,
    },
    StepStarted {
        step_index: usize,
        step_name: String,
        step_execution_id: u64,
    },
    /// Un artifact devolvió error. `step_name` es `None` para listeners de job.
    ArtifactFailed {
        step_name: Option<String>,
        artifact: String,
        error: String,
    },
    /// Cierre de un step con su exit status congelado.
    StepCompleted {
        step_index: usize,
        step_name: String,
        step_execution_id: u64,
        batch_status: BatchStatus,
        exit_status: String,
    },
    /// Evento de cierre del job. Siempre posterior a los `StepCompleted`.
    JobCompleted {
        batch_status: BatchStatus,
        exit_status: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    pub seq: u64, // orden de append dentro de la ejecución
    pub execution_id: u64,
    pub kind: JobEventKind,
    pub ts: DateTime<Utc>,
}
