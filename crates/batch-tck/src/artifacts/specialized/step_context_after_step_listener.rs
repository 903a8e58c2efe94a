use batch_core::{ArtifactError, ArtifactProperties, JobContext, StepContext, StepListener};

/// Verifica en `after_step` el exit status que ve el step; una discrepancia
/// hace fallar el step (y con él el job).
#[derive(Debug, Clone, Default)]
pub struct StepContextAfterStepListener {
    expected_step_exit_status: Option<String>,
}

impl StepContextAfterStepListener {
    pub const NAME: &'static str = "stepContextAfterStepListener";

    pub const EXPECTED_STEP_EXIT_STATUS_PROPERTY: &'static str = "expected.step.exit.status";

    /// Representación de un exit status ausente en las comparaciones.
    pub const NULL_STEP_EXIT_STATUS: &'static str = "null step exit status";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { expected_step_exit_status: props.get(Self::EXPECTED_STEP_EXIT_STATUS_PROPERTY).map(str::to_string) }
    }
}

impl StepListener for StepContextAfterStepListener {
    fn after_step(&mut self, _job: &mut JobContext, step: &mut StepContext) -> Result<(), ArtifactError> {
        let observed = step.exit_status().unwrap_or(Self::NULL_STEP_EXIT_STATUS);
        match self.expected_step_exit_status.as_deref() {
            Some(expected) if expected != observed => {
                Err(ArtifactError::failed(format!("StepContext exit status is wrong when it reaches after_step. \
                                                   The expected exit status is: {expected}, but found: {observed}")))
            }
            _ => Ok(()),
        }
    }
}
