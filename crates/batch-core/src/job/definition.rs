use indexmap::IndexMap;

use crate::injection::PropertyValue;

/// Parámetros de una ejecución de job. Conservan el orden de inserción.
pub type JobParameters = IndexMap<String, String>;

/// Referencia por nombre a un artifact registrado, con sus propiedades
/// declaradas (aún sin resolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub name: String,
    pub properties: IndexMap<String, PropertyValue>,
}

impl ArtifactRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               properties: IndexMap::new() }
    }

    /// Añade una propiedad; acepta la notación `#{jobParameters['clave']}`.
    pub fn property(mut self, name: impl Into<String>, raw: &str) -> Self {
        self.properties.insert(name.into(), PropertyValue::parse(raw));
        self
    }

    /// Propiedad alimentada por el parámetro del job con el mismo nombre.
    pub fn job_parameter(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), PropertyValue::JobParameter(name));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: String,
    pub batchlet: ArtifactRef,
    pub listeners: Vec<ArtifactRef>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, batchlet: ArtifactRef) -> Self {
        Self { id: id.into(),
               batchlet,
               listeners: Vec::new() }
    }

    pub fn listener(mut self, listener: ArtifactRef) -> Self {
        self.listeners.push(listener);
        self
    }
}

/// Definición inmutable de un job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinition {
    pub id: String,
    pub listeners: Vec<ArtifactRef>,
    pub steps: Vec<StepDefinition>,
}

impl JobDefinition {
    pub fn builder(id: impl Into<String>) -> super::JobBuilder {
        super::JobBuilder::new(id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
