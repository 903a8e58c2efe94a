//! Builder para `JobDefinition`.
//!
//! ```ignore
//! let job = JobDefinition::builder("myJob")
//!     .listener(ArtifactRef::new("auditJobListener"))
//!     .step(StepDefinition::new("step1", ArtifactRef::new("myBatchlet")))
//!     .build()?;
//! ```

use std::collections::HashSet;

use super::{ArtifactRef, JobDefinition, StepDefinition};
use crate::errors::BatchRuntimeError;

#[derive(Debug)]
pub struct JobBuilder {
    id: String,
    listeners: Vec<ArtifactRef>,
    steps: Vec<StepDefinition>,
}

impl JobBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(),
               listeners: Vec::new(),
               steps: Vec::new() }
    }

    /// Añade un listener de job. Se invocan en orden de declaración.
    pub fn listener(mut self, listener: ArtifactRef) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    /// Valida y construye la definición: al menos un step e ids únicos.
    pub fn build(self) -> Result<JobDefinition, BatchRuntimeError> {
        if self.steps.is_empty() {
            return Err(BatchRuntimeError::InvalidJobDefinition(format!("job '{}' has no steps", self.id)));
        }
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(BatchRuntimeError::InvalidJobDefinition(format!("duplicate step id '{}' in job '{}'",
                                                                           step.id, self.id)));
            }
        }
        Ok(JobDefinition { id: self.id,
                           listeners: self.listeners,
                           steps: self.steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_empty_job() {
        let err = JobBuilder::new("empty").build().unwrap_err();
        assert!(matches!(err, BatchRuntimeError::InvalidJobDefinition(_)));
    }

    #[test]
    fn build_rejects_duplicate_step_ids() {
        let err = JobBuilder::new("dup").step(StepDefinition::new("s", ArtifactRef::new("b")))
                                        .step(StepDefinition::new("s", ArtifactRef::new("b")))
                                        .build()
                                        .unwrap_err();
        assert!(matches!(err, BatchRuntimeError::InvalidJobDefinition(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn build_keeps_declaration_order() {
        let job = JobBuilder::new("ordered").listener(ArtifactRef::new("l1"))
                                            .listener(ArtifactRef::new("l2"))
                                            .step(StepDefinition::new("a", ArtifactRef::new("b")))
                                            .step(StepDefinition::new("b", ArtifactRef::new("b")))
                                            .build()
                                            .expect("valid job");
        let ids: Vec<_> = job.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(job.listeners[1].name, "l2");
    }
}
