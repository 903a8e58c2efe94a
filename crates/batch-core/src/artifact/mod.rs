//! Artifacts batch: unidad de trabajo (`Batchlet`) y listeners.
//!
//! No hay jerarquía de clases: cada capacidad es un trait independiente y el
//! runtime recibe objetos `Box<dyn ...>` creados por el `ArtifactRegistry`.

mod definition;
mod registry;

pub use definition::{ArtifactError, Batchlet, JobListener, StepListener};
pub use registry::{ArtifactKind, ArtifactRegistry};
