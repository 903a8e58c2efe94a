use std::fmt;

use serde::{Deserialize, Serialize};

/// Valor declarado de una propiedad de artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Valor fijo.
    Literal(String),
    /// Se sustituye por el parámetro del job con esa clave.
    JobParameter(String),
}

impl PropertyValue {
    pub fn literal(value: impl Into<String>) -> Self {
        PropertyValue::Literal(value.into())
    }

    pub fn job_parameter(key: impl Into<String>) -> Self {
        PropertyValue::JobParameter(key.into())
    }

    /// Interpreta la notación de expresión `#{jobParameters['clave']}`; cualquier
    /// otra cadena es un literal.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
           .strip_prefix("#{jobParameters['")
           .and_then(|rest| rest.strip_suffix("']}"))
           .map(|key| PropertyValue::JobParameter(key.to_string()))
           .unwrap_or_else(|| PropertyValue::Literal(raw.to_string()))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Literal(v) => f.write_str(v),
            PropertyValue::JobParameter(key) => write!(f, "#{{jobParameters['{key}']}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_parameter_expression() {
        assert_eq!(PropertyValue::parse("#{jobParameters['set.step.exit.status']}"),
                   PropertyValue::job_parameter("set.step.exit.status"));
        assert_eq!(PropertyValue::parse("plain"), PropertyValue::literal("plain"));
        assert_eq!(PropertyValue::parse("#{jobParameters['unterminated"),
                   PropertyValue::literal("#{jobParameters['unterminated"));
    }

    #[test]
    fn display_round_trips_expression() {
        let v = PropertyValue::job_parameter("k");
        assert_eq!(PropertyValue::parse(&v.to_string()), v);
    }
}
