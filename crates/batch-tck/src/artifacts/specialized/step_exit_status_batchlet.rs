use batch_core::{ArtifactError, ArtifactProperties, Batchlet, JobContext, StepContext};

/// Batchlet que opcionalmente escribe el exit status del step y luego
/// devuelve un valor (o nada) desde `process`.
#[derive(Debug, Clone, Default)]
pub struct StepExitStatusBatchlet {
    set_step_exit_status: Option<String>,
    batchlet_return_value: Option<String>,
}

impl StepExitStatusBatchlet {
    pub const NAME: &'static str = "stepExitStatusBatchlet";

    pub const SET_STEP_EXIT_STATUS_PROPERTY: &'static str = "set.step.exit.status";
    pub const BATCHLET_RETURN_VALUE_PROPERTY: &'static str = "batchlet.return.value";

    pub const DO_NOT_SET_STEP_EXIT_STATUS: &'static str = "Do not make a call to StepContext.setExitStatus()";
    pub const SET_STEP_EXIT_STATUS: &'static str = "Make a call to StepContext.setExitStatus(SET_STEP_EXIT_STATUS)";
    pub const SET_STEP_EXIT_STATUS_NULL: &'static str = "Explicitly make a call to StepContext.setExitStatus(null)";
    pub const BATCHLET_RETURN_VALUE: &'static str = "Batchlet process() method returns BATCHLET_RETURN_VALUE";
    pub const BATCHLET_RETURN_VALUE_NULL: &'static str = "Batchlet process() method returns null";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { set_step_exit_status: props.get(Self::SET_STEP_EXIT_STATUS_PROPERTY).map(str::to_string),
               batchlet_return_value: props.get(Self::BATCHLET_RETURN_VALUE_PROPERTY).map(str::to_string) }
    }
}

impl Batchlet for StepExitStatusBatchlet {
    fn process(&mut self, _job: &mut JobContext, step: &mut StepContext) -> Result<Option<String>, ArtifactError> {
        match self.set_step_exit_status.as_deref() {
            None | Some(Self::DO_NOT_SET_STEP_EXIT_STATUS) => {}
            Some(Self::SET_STEP_EXIT_STATUS) => step.set_exit_status(Some(Self::SET_STEP_EXIT_STATUS.to_string()))?,
            Some(Self::SET_STEP_EXIT_STATUS_NULL) => step.set_exit_status(None)?,
            Some(other) => {
                return Err(ArtifactError::failed(format!("{} requires one of its constants for {}, got '{other}'",
                                                         Self::NAME,
                                                         Self::SET_STEP_EXIT_STATUS_PROPERTY)))
            }
        }

        match self.batchlet_return_value.as_deref() {
            None | Some(Self::BATCHLET_RETURN_VALUE_NULL) => Ok(None),
            Some(Self::BATCHLET_RETURN_VALUE) => Ok(Some(Self::BATCHLET_RETURN_VALUE.to_string())),
            Some(other) => Err(ArtifactError::failed(format!("{} requires one of its constants for {}, got '{other}'",
                                                             Self::NAME,
                                                             Self::BATCHLET_RETURN_VALUE_PROPERTY))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::contexts;

    fn batchlet(set: &str, ret: &str) -> StepExitStatusBatchlet {
        let props: ArtifactProperties = [(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS_PROPERTY, set),
                                         (StepExitStatusBatchlet::BATCHLET_RETURN_VALUE_PROPERTY, ret)].into_iter()
                                                                                                        .collect();
        StepExitStatusBatchlet::from_properties(&props)
    }

    #[test]
    fn sets_then_returns_configured_value() {
        let (mut job, mut step) = contexts();
        let mut b = batchlet(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS, StepExitStatusBatchlet::BATCHLET_RETURN_VALUE);
        let ret = b.process(&mut job, &mut step).expect("process");
        assert_eq!(step.exit_status(), Some(StepExitStatusBatchlet::SET_STEP_EXIT_STATUS));
        assert_eq!(ret.as_deref(), Some(StepExitStatusBatchlet::BATCHLET_RETURN_VALUE));
    }

    #[test]
    fn unknown_constant_fails() {
        let (mut job, mut step) = contexts();
        let mut b = batchlet("bogus", StepExitStatusBatchlet::BATCHLET_RETURN_VALUE_NULL);
        assert!(matches!(b.process(&mut job, &mut step), Err(ArtifactError::Failed(_))));
        assert_eq!(step.exit_status(), None);
    }
}
