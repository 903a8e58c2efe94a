//! Definiciones de job construidas en código.
//!
//! Un job es una lista ordenada de steps; cada step tiene un batchlet y 0..n
//! listeners. Los steps se ejecutan en orden y el primero que falla detiene
//! el job (stop-on-failure).

pub mod builder;
mod definition;

pub use builder::JobBuilder;
pub use definition::{ArtifactRef, JobDefinition, JobParameters, StepDefinition};
