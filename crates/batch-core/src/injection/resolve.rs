use indexmap::IndexMap;

use super::PropertyValue;
use crate::job::JobParameters;

/// Propiedades ya resueltas que recibe la factoría de un artifact.
///
/// Una propiedad que referencia un parámetro ausente no aparece: el artifact
/// la ve como no configurada.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactProperties {
    values: IndexMap<String, String>,
}

impl ArtifactProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArtifactProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Resuelve las propiedades declaradas contra los parámetros del job,
/// conservando el orden de declaración.
pub fn resolve_properties(declared: &IndexMap<String, PropertyValue>, params: &JobParameters) -> ArtifactProperties {
    declared.iter()
            .filter_map(|(name, value)| {
                let resolved = match value {
                    PropertyValue::Literal(v) => Some(v.clone()),
                    PropertyValue::JobParameter(key) => params.get(key).cloned(),
                };
                resolved.map(|v| (name.clone(), v))
            })
            .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_job_parameter_leaves_property_unset() {
        let mut declared = IndexMap::new();
        declared.insert("a".to_string(), PropertyValue::literal("lit"));
        declared.insert("b".to_string(), PropertyValue::job_parameter("present"));
        declared.insert("c".to_string(), PropertyValue::job_parameter("absent"));

        let mut params = JobParameters::new();
        params.insert("present".to_string(), "from-params".to_string());

        let props = resolve_properties(&declared, &params);
        assert_eq!(props.get("a"), Some("lit"));
        assert_eq!(props.get("b"), Some("from-params"));
        assert_eq!(props.get("c"), None);
        assert_eq!(props.len(), 2);
    }
}
