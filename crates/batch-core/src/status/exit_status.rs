//! Resolución del exit status de una ejecución.
//!
//! Cada `JobContext` y cada `StepContext` embeben una instancia propia. El
//! valor se escribe durante la fase `Active` (último escritor gana) y se
//! congela en `finalize`, donde un valor ausente toma la forma textual del
//! `BatchStatus` terminal.
//!
//! Ciclo de vida:
//! - `Active` -> `Finalizing` (vía `quiesce`, todos los artifacts terminaron)
//! - `Finalizing` -> `Frozen` (vía `finalize`)
//! - `Active` -> `Frozen` (vía `finalize`, pasando implícitamente por
//!   `Finalizing`)
//!
//! Después de `Frozen` sólo `get` es válido.
use serde::{Deserialize, Serialize};

use crate::errors::BatchRuntimeError;
use crate::status::BatchStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitStatusPhase {
    /// Los artifacts pueden leer y escribir.
    Active,
    /// Ejecución quiescente; el runtime calcula el estado terminal.
    Finalizing,
    /// Valor definitivo, inmutable.
    Frozen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitStatus {
    value: Option<String>,
    phase: ExitStatusPhase,
}

impl Default for ExitStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitStatus {
    pub fn new() -> Self {
        Self { value: None,
               phase: ExitStatusPhase::Active }
    }

    /// Valor actual; `None` si nunca se escribió o se reseteó explícitamente.
    #[inline]
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[inline]
    pub fn phase(&self) -> ExitStatusPhase {
        self.phase
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.phase == ExitStatusPhase::Frozen
    }

    /// Sobrescribe el valor sin condiciones, incluido el reset a `None`.
    pub fn set(&mut self, value: Option<String>) -> Result<(), BatchRuntimeError> {
        self.ensure_active("set")?;
        self.value = value;
        Ok(())
    }

    /// Registra el valor devuelto por la unidad de trabajo.
    ///
    /// Un retorno `None` no tiene opinión y no pisa un `set` previo.
    pub fn record_unit_of_work_result(&mut self, value: Option<String>) -> Result<(), BatchRuntimeError> {
        self.ensure_active("record_unit_of_work_result")?;
        if value.is_some() {
            self.value = value;
        }
        Ok(())
    }

    /// Marca la ejecución como quiescente. Idempotente mientras no se congele.
    pub fn quiesce(&mut self) -> Result<(), BatchRuntimeError> {
        match self.phase {
            ExitStatusPhase::Active | ExitStatusPhase::Finalizing => {
                self.phase = ExitStatusPhase::Finalizing;
                Ok(())
            }
            ExitStatusPhase::Frozen => Err(self.already_finalized()),
        }
    }

    /// Congela el valor. Si sigue ausente toma `terminal.to_string()`.
    pub fn finalize(&mut self, terminal: BatchStatus) -> Result<String, BatchRuntimeError> {
        self.quiesce()?;
        let frozen = self.value.get_or_insert_with(|| terminal.to_string()).clone();
        self.phase = ExitStatusPhase::Frozen;
        Ok(frozen)
    }

    fn ensure_active(&self, operation: &str) -> Result<(), BatchRuntimeError> {
        if self.phase == ExitStatusPhase::Active {
            Ok(())
        } else {
            Err(BatchRuntimeError::ExitStatusFrozen { operation: operation.to_string(),
                                                      phase: self.phase })
        }
    }

    fn already_finalized(&self) -> BatchRuntimeError {
        BatchRuntimeError::ExitStatusAlreadyFinalized(self.value.clone().unwrap_or_default())
    }
}
