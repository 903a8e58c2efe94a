//! Modelos neutrales (contextos de ejecución y registros de ejecución).

pub mod context;
pub mod execution;

pub use context::{JobContext, StepContext};
pub use execution::{JobExecution, StepExecution};
