use batch_core::{ArtifactError, ArtifactProperties, JobContext, JobListener};

/// Verifica en `after_job` el exit status que ve el job.
#[derive(Debug, Clone, Default)]
pub struct JobContextAfterJobListener {
    expected_job_exit_status: Option<String>,
}

impl JobContextAfterJobListener {
    pub const NAME: &'static str = "jobContextAfterJobListener";

    pub const EXPECTED_JOB_EXIT_STATUS_PROPERTY: &'static str = "expected.job.exit.status";

    pub const NULL_JOB_EXIT_STATUS: &'static str = "null job exit status";

    pub fn from_properties(props: &ArtifactProperties) -> Self {
        Self { expected_job_exit_status: props.get(Self::EXPECTED_JOB_EXIT_STATUS_PROPERTY).map(str::to_string) }
    }
}

impl JobListener for JobContextAfterJobListener {
    fn after_job(&mut self, job: &mut JobContext) -> Result<(), ArtifactError> {
        let observed = job.exit_status().unwrap_or(Self::NULL_JOB_EXIT_STATUS);
        match self.expected_job_exit_status.as_deref() {
            Some(expected) if expected != observed => {
                Err(ArtifactError::failed(format!("JobContext exit status is wrong when it reaches after_job. \
                                                   The expected exit status is: {expected}, but found: {observed}")))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_core::JobParameters;

    fn listener(expected: &str) -> JobContextAfterJobListener {
        let props: ArtifactProperties = [(JobContextAfterJobListener::EXPECTED_JOB_EXIT_STATUS_PROPERTY, expected)].into_iter()
                                                                                                                 .collect();
        JobContextAfterJobListener::from_properties(&props)
    }

    #[test]
    fn unset_exit_status_compares_as_null_marker() {
        let mut job = JobContext::new("job", Default::default(), 1, JobParameters::new());
        assert!(listener(JobContextAfterJobListener::NULL_JOB_EXIT_STATUS).after_job(&mut job).is_ok());
        assert!(listener("something else").after_job(&mut job).is_err());
    }

    #[test]
    fn no_expectation_never_fails() {
        let mut job = JobContext::new("job", Default::default(), 1, JobParameters::new());
        let mut l = JobContextAfterJobListener::from_properties(&ArtifactProperties::new());
        assert!(l.after_job(&mut job).is_ok());
    }
}
