//! Artifacts especializados en exit status.
//!
//! Cada artifact se configura por propiedades cuyo valor es una de sus
//! constantes públicas; cualquier otro valor hace fallar al artifact para que
//! un caso mal cableado no pase por accidente.

mod job_context_after_job_listener;
mod job_exit_status_batchlet;
mod set_exit_status_after_job_listener;
mod set_exit_status_after_step_listener;
mod step_context_after_step_listener;
mod step_exit_status_batchlet;

pub use job_context_after_job_listener::JobContextAfterJobListener;
pub use job_exit_status_batchlet::JobExitStatusBatchlet;
pub use set_exit_status_after_job_listener::SetExitStatusAfterJobListener;
pub use set_exit_status_after_step_listener::SetExitStatusAfterStepListener;
pub use step_context_after_step_listener::StepContextAfterStepListener;
pub use step_exit_status_batchlet::StepExitStatusBatchlet;

use batch_core::ArtifactRegistry;

/// Registra todos los artifacts especializados bajo su nombre.
pub fn register_all(registry: &mut ArtifactRegistry) {
    registry.register_batchlet(StepExitStatusBatchlet::NAME, |p| Box::new(StepExitStatusBatchlet::from_properties(p)));
    registry.register_batchlet(JobExitStatusBatchlet::NAME, |p| Box::new(JobExitStatusBatchlet::from_properties(p)));
    registry.register_step_listener(StepContextAfterStepListener::NAME, |p| {
                Box::new(StepContextAfterStepListener::from_properties(p))
            });
    registry.register_step_listener(SetExitStatusAfterStepListener::NAME, |p| {
                Box::new(SetExitStatusAfterStepListener::from_properties(p))
            });
    registry.register_job_listener(JobContextAfterJobListener::NAME, |p| {
                Box::new(JobContextAfterJobListener::from_properties(p))
            });
    registry.register_job_listener(SetExitStatusAfterJobListener::NAME, |p| {
                Box::new(SetExitStatusAfterJobListener::from_properties(p))
            });
}
