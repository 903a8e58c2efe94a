//! batch-core: runtime batch secuencial con resolución de exit status.
pub mod artifact;
pub mod config;
pub mod engine;
pub mod errors;
pub mod event;
pub mod injection;
pub mod job;
pub mod model;
pub mod operator;
pub mod repo;
pub mod status;

pub use artifact::{ArtifactError, ArtifactRegistry, Batchlet, JobListener, StepListener};
pub use config::RuntimeConfig;
pub use engine::{BatchEngine, ExecutionOutcome};
pub use errors::BatchRuntimeError;
pub use event::{EventStore, InMemoryEventStore, JobEvent, JobEventKind};
pub use injection::{ArtifactProperties, PropertyValue};
pub use job::{ArtifactRef, JobDefinition, JobParameters, StepDefinition};
pub use model::{JobContext, JobExecution, StepContext, StepExecution};
pub use operator::JobOperator;
pub use repo::{InMemoryJobRepository, JobRepository};
pub use status::{BatchStatus, ExitStatus, ExitStatusPhase};
