use std::fmt;

use serde::{Deserialize, Serialize};

/// Estado de una ejecución según el runtime.
///
/// Las transiciones habituales son:
/// - `Starting` -> `Started`
/// - `Started` -> `Completed` | `Failed`
/// - `Started` -> `Stopping` -> `Stopped`
///
/// La forma `Display` (mayúsculas) es la que se usa como exit status por
/// defecto cuando ningún artifact lo fijó.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Starting,
    Started,
    Stopping,
    Stopped,
    Failed,
    Completed,
    Abandoned,
}

impl BatchStatus {
    /// Nombre canónico en mayúsculas.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Starting => "STARTING",
            BatchStatus::Started => "STARTED",
            BatchStatus::Stopping => "STOPPING",
            BatchStatus::Stopped => "STOPPED",
            BatchStatus::Failed => "FAILED",
            BatchStatus::Completed => "COMPLETED",
            BatchStatus::Abandoned => "ABANDONED",
        }
    }

    /// `true` si la ejecución ya no puede avanzar.
    pub fn is_terminal(&self) -> bool {
        matches!(self,
                 BatchStatus::Stopped | BatchStatus::Failed | BatchStatus::Completed | BatchStatus::Abandoned)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for status in [BatchStatus::Starting,
                       BatchStatus::Started,
                       BatchStatus::Stopping,
                       BatchStatus::Stopped,
                       BatchStatus::Failed,
                       BatchStatus::Completed,
                       BatchStatus::Abandoned]
        {
            let json = serde_json::to_value(status).expect("serialize");
            assert_eq!(json, serde_json::Value::String(status.to_string()));
        }
    }

    #[test]
    fn only_final_states_are_terminal() {
        assert!(!BatchStatus::Starting.is_terminal());
        assert!(!BatchStatus::Started.is_terminal());
        assert!(!BatchStatus::Stopping.is_terminal());
        assert!(BatchStatus::Completed.is_terminal());
        assert!(BatchStatus::Failed.is_terminal());
        assert!(BatchStatus::Stopped.is_terminal());
        assert!(BatchStatus::Abandoned.is_terminal());
    }
}
