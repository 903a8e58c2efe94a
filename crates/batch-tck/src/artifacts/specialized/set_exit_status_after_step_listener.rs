use batch_core::{ArtifactError, ArtifactProperties, JobContext, StepContext, StepListener};

/// Desde `after_step` comprueba el exit status esperado y, si coincide,
/// vuelve a escribirlo según `set.step.exit.status.after.step`.
///
/// Si no coincide no falla: deja `BAD_EXIT_STATUS_SEEN_BY_AFTER_STEP` como
/// exit status para que la verificación final lo detecte.
#[derive(Debug, Clone, Default)]
pub struct SetExitStatusAfterStepListener {
    expected_step_exit_status: Option<String>,
    set_step_exit_status_after_step: Option<String>,
}

impl SetExitStatusAfterStepListener {
    pub const NAME: &'static str = "setExitStatusAfterStepListener";

    pub const EXPECTED_STEP_EXIT_STATUS_PROPERTY: &'static str = "expected.step.exit.status";
    pub const SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY: &'static str = "set.step.exit.status.after.step";

    pub const NULL_STEP_EXIT_STATUS: &'static str = "null step exit status";
    pub const SET_STEP_EXIT_STATUS_AFTER_STEP: &'static str =
        "Make a call to StepContext.setExitStatus(SET_STEP_EXIT_STATUS_AFTER_STEP) from the scope of afterStep()";
    pub const SET_STEP_EXIT_STATUS_AFTER_STEP_NULL: &'static str = "Explicitly make a call to StepContext.setExitStatus(null)";
    pub const BAD_EXIT_STATUS_SEEN_BY_AFTER_STEP: &'static str = "The wrong exit status was seen by StepListener.AfterStep()";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { expected_step_exit_status: props.get(Self::EXPECTED_STEP_EXIT_STATUS_PROPERTY).map(str::to_string),
               set_step_exit_status_after_step: props.get(Self::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY)
                                                     .map(str::to_string) }
    }
}

impl StepListener for SetExitStatusAfterStepListener {
    fn after_step(&mut self, _job: &mut JobContext, step: &mut StepContext) -> Result<(), ArtifactError> {
        let Some(expected) = self.expected_step_exit_status.as_deref() else {
            return Ok(());
        };
        let observed = step.exit_status().unwrap_or(Self::NULL_STEP_EXIT_STATUS);
        if expected != observed {
            step.set_exit_status(Some(Self::BAD_EXIT_STATUS_SEEN_BY_AFTER_STEP.to_string()))?;
            return Ok(());
        }

        match self.set_step_exit_status_after_step.as_deref() {
            None => Ok(()),
            Some(Self::SET_STEP_EXIT_STATUS_AFTER_STEP_NULL) => Ok(step.set_exit_status(None)?),
            Some(Self::SET_STEP_EXIT_STATUS_AFTER_STEP) => {
                Ok(step.set_exit_status(Some(Self::SET_STEP_EXIT_STATUS_AFTER_STEP.to_string()))?)
            }
            Some(other) => Err(ArtifactError::failed(format!("{} requires one of its constants for {}, got '{other}'",
                                                             Self::NAME,
                                                             Self::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::contexts;

    fn listener(expected: &str, after: &str) -> SetExitStatusAfterStepListener {
        let props: ArtifactProperties =
            [(SetExitStatusAfterStepListener::EXPECTED_STEP_EXIT_STATUS_PROPERTY, expected),
             (SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_PROPERTY, after)].into_iter()
                                                                                               .collect();
        SetExitStatusAfterStepListener::from_properties(&props)
    }

    #[test]
    fn mismatch_marks_bad_exit_status_instead_of_failing() {
        let (mut job, mut step) = contexts();
        step.set_exit_status(Some("unexpected".into())).unwrap();
        let mut l = listener("expected", SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP);
        l.after_step(&mut job, &mut step).expect("no failure");
        assert_eq!(step.exit_status(), Some(SetExitStatusAfterStepListener::BAD_EXIT_STATUS_SEEN_BY_AFTER_STEP));
    }

    #[test]
    fn match_applies_reset() {
        let (mut job, mut step) = contexts();
        step.set_exit_status(Some("expected".into())).unwrap();
        let mut l = listener("expected", SetExitStatusAfterStepListener::SET_STEP_EXIT_STATUS_AFTER_STEP_NULL);
        l.after_step(&mut job, &mut step).expect("reset");
        assert_eq!(step.exit_status(), None);
    }
}
