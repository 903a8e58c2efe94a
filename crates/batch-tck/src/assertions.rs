//! Aserciones que devuelven error en lugar de abortar.

use std::fmt::Display;

use crate::errors::TckError;

/// Compara `expected` y `actual`; la discrepancia es un `TckError::Assertion`.
pub fn assert_with_message<E, A>(message: &str, expected: E, actual: A) -> Result<(), TckError>
    where E: Display,
          A: Display
{
    let (expected, actual) = (expected.to_string(), actual.to_string());
    if expected == actual {
        Ok(())
    } else {
        Err(TckError::Assertion { message: message.to_string(),
                                  expected,
                                  actual })
    }
}

/// Igual que `assert_with_message` pero para exit status que pueden faltar.
pub fn assert_exit_status(message: &str, expected: &str, actual: Option<&str>) -> Result<(), TckError> {
    assert_with_message(message, expected, actual.unwrap_or("<unset>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_core::BatchStatus;

    #[test]
    fn mismatch_carries_both_sides() {
        let err = assert_with_message("status", BatchStatus::Completed, BatchStatus::Failed).unwrap_err();
        assert_eq!(err,
                   TckError::Assertion { message: "status".into(),
                                         expected: "COMPLETED".into(),
                                         actual: "FAILED".into() });
        assert!(assert_with_message("status", BatchStatus::Completed, "COMPLETED").is_ok());
        assert!(assert_exit_status("es", "X", None).is_err());
    }
}
