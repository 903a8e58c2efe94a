//! Registros de ejecución expuestos por la API de consulta.
//!
//! No se mutan directamente: el `JobRepository` los reconstruye a partir de
//! los eventos de la ejecución (replay).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::JobParameters;
use crate::status::BatchStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecution {
    pub execution_id: u64,
    pub instance_id: Uuid,
    pub job_name: String,
    pub parameters: JobParameters,
    pub batch_status: BatchStatus,
    /// `None` hasta que el job se congela.
    pub exit_status: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl JobExecution {
    pub fn batch_status(&self) -> BatchStatus {
        self.batch_status
    }

    pub fn exit_status(&self) -> Option<&str> {
        self.exit_status.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepExecution {
    pub step_execution_id: u64,
    pub step_name: String,
    pub batch_status: BatchStatus,
    pub exit_status: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl StepExecution {
    pub fn batch_status(&self) -> BatchStatus {
        self.batch_status
    }

    pub fn exit_status(&self) -> Option<&str> {
        self.exit_status.as_deref()
    }
}
