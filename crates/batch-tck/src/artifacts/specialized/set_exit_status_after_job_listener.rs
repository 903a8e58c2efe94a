use batch_core::{ArtifactError, ArtifactProperties, JobContext, JobListener};

/// Análogo de `SetExitStatusAfterStepListener` a nivel de job.
#[derive(Debug, Clone, Default)]
pub struct SetExitStatusAfterJobListener {
    expected_job_exit_status: Option<String>,
    set_job_exit_status_after_job: Option<String>,
}

impl SetExitStatusAfterJobListener {
    pub const NAME: &'static str = "setExitStatusAfterJobListener";

    pub const EXPECTED_JOB_EXIT_STATUS_PROPERTY: &'static str = "expected.job.exit.status";
    pub const SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY: &'static str = "set.job.exit.status.after.job";

    pub const NULL_JOB_EXIT_STATUS: &'static str = "null job exit status";
    pub const SET_JOB_EXIT_STATUS_AFTER_JOB: &'static str =
        "Make a call to JobContext.setExitStatus(SET_JOB_EXIT_STATUS_AFTER_JOB) from the scope of afterJob()";
    pub const SET_JOB_EXIT_STATUS_AFTER_JOB_NULL: &'static str = "Explicitly make a call to JobContext.setExitStatus(null)";
    pub const BAD_EXIT_STATUS_SEEN_BY_AFTER_JOB: &'static str = "The wrong exit status was seen by JobListener.AfterJob()";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { expected_job_exit_status: props.get(Self::EXPECTED_JOB_EXIT_STATUS_PROPERTY).map(str::to_string),
               set_job_exit_status_after_job: props.get(Self::SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY).map(str::to_string) }
    }
}

impl JobListener for SetExitStatusAfterJobListener {
    fn after_job(&mut self, job: &mut JobContext) -> Result<(), ArtifactError> {
        let Some(expected) = self.expected_job_exit_status.as_deref() else {
            return Ok(());
        };
        let observed = job.exit_status().unwrap_or(Self::NULL_JOB_EXIT_STATUS);
        if expected != observed {
            job.set_exit_status(Some(Self::BAD_EXIT_STATUS_SEEN_BY_AFTER_JOB.to_string()))?;
            return Ok(());
        }

        match self.set_job_exit_status_after_job.as_deref() {
            None => Ok(()),
            Some(Self::SET_JOB_EXIT_STATUS_AFTER_JOB_NULL) => Ok(job.set_exit_status(None)?),
            Some(Self::SET_JOB_EXIT_STATUS_AFTER_JOB) => {
                Ok(job.set_exit_status(Some(Self::SET_JOB_EXIT_STATUS_AFTER_JOB.to_string()))?)
            }
            Some(other) => Err(ArtifactError::failed(format!("{} requires one of its constants for {}, got '{other}'",
                                                             Self::NAME,
                                                             Self::SET_JOB_EXIT_STATUS_AFTER_JOB_PROPERTY))),
        }
    }
}
