use batch_core::{ArtifactError, ArtifactProperties, Batchlet, JobContext, StepContext};

/// Batchlet que escribe (o no) el exit status del job y no opina sobre el
/// del step.
#[derive(Debug, Clone, Default)]
pub struct JobExitStatusBatchlet {
    set_job_exit_status: Option<String>,
}

impl JobExitStatusBatchlet {
    pub const NAME: &'static str = "jobExitStatusBatchlet";

    pub const SET_JOB_EXIT_STATUS_PROPERTY: &'static str = "set.job.exit.status";

    pub const DO_NOT_SET_JOB_EXIT_STATUS: &'static str = "Do not make a call to JobContext.setExitStatus()";
    pub const SET_JOB_EXIT_STATUS: &'static str = "Make a call to JobContext.setExitStatus(SET_JOB_EXIT_STATUS)";
    pub const SET_JOB_EXIT_STATUS_NULL: &'static str = "Explicitly make a call to JobContext.setExitStatus(null)";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { set_job_exit_status: props.get(Self::SET_JOB_EXIT_STATUS_PROPERTY).map(str::to_string) }
    }
}

impl Batchlet for JobExitStatusBatchlet {
    fn process(&mut self, job: &mut JobContext, _step: &mut StepContext) -> Result<Option<String>, ArtifactError> {
        match self.set_job_exit_status.as_deref() {
            None | Some(Self::DO_NOT_SET_JOB_EXIT_STATUS) => {}
            Some(Self::SET_JOB_EXIT_STATUS) => job.set_exit_status(Some(Self::SET_JOB_EXIT_STATUS.to_string()))?,
            Some(Self::SET_JOB_EXIT_STATUS_NULL) => job.set_exit_status(None)?,
            Some(other) => {
                return Err(ArtifactError::failed(format!("{} requires one of its constants for {}, got '{other}'",
                                                         Self::NAME,
                                                         Self::SET_JOB_EXIT_STATUS_PROPERTY)))
            }
        }
        Ok(None)
    }
}
