//! batch-tck: suite de conformidad de resolución de exit status.
//!
//! Los casos lanzan jobs sobre un `JobOperator` real a través de
//! `JobOperatorBridge` y comprueban los exit status congelados que expone la
//! API de consulta. Un caso fallido devuelve `Err(TckError)`.
pub mod artifacts;
pub mod assertions;
pub mod bridge;
pub mod cases;
pub mod errors;
pub mod jobs;

pub use bridge::JobOperatorBridge;
pub use errors::TckError;
pub use cases::exit_status::{exit_status_cases, TckCase};

#[cfg(test)]
pub(crate) mod test_support {
    use batch_core::{JobContext, JobParameters, StepContext};

    pub fn contexts() -> (JobContext, StepContext) {
        (JobContext::new("job", Default::default(), 1, JobParameters::new()), StepContext::new("step", 1))
    }
}
