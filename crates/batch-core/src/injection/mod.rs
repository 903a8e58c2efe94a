//! Inyección de propiedades en artifacts.
//!
//! En un job, las propiedades de un artifact se declaran como literales o
//! como referencias a parámetros del job (`#{jobParameters['clave']}`). Antes
//! de construir el artifact, el runtime las resuelve contra los
//! `JobParameters` de la ejecución y entrega un `ArtifactProperties` plano.

mod property;
mod resolve;

pub use property::PropertyValue;
pub use resolve::{resolve_properties, ArtifactProperties};
