use super::{GenerationInput, JobClient};
use crate::{
    error::{GenerationError, Result},
    models::{GenerationJob, JobStatus},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub enum ScriptStep {
    Job(GenerationJob),
    Error(GenerationError),
}

/// In-memory [`JobClient`] that replays a fixed status sequence.
///
/// Once the script runs out, the last job seen is repeated.
pub struct ScriptedJobClient {
    job_id: String,
    submit_step: Mutex<Option<ScriptStep>>,
    steps: Mutex<VecDeque<ScriptStep>>,
    last_job: Mutex<GenerationJob>,
    submitted: Mutex<Vec<GenerationInput>>,
    fetches: AtomicUsize,
}

impl ScriptedJobClient {
    pub fn new(job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        Self {
            submit_step: Mutex::new(None),
            steps: Mutex::new(VecDeque::new()),
            last_job: Mutex::new(GenerationJob::new(job_id.clone(), JobStatus::Starting)),
            submitted: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            job_id,
        }
    }

    /// Queues fetch results that carry only a status.
    pub fn with_statuses(self, statuses: &[JobStatus]) -> Self {
        for status in statuses {
            let job = GenerationJob::new(self.job_id.clone(), *status);
            self.push(ScriptStep::Job(job));
        }
        self
    }

    pub fn then_job(self, job: GenerationJob) -> Self {
        self.push(ScriptStep::Job(job));
        self
    }

    pub fn then_error(self, error: GenerationError) -> Self {
        self.push(ScriptStep::Error(error));
        self
    }

    pub fn failing_submit(self, error: GenerationError) -> Self {
        *self.submit_step.lock().unwrap_or_else(|e| e.into_inner()) = Some(ScriptStep::Error(error));
        self
    }

    pub fn submit_returns(self, job: GenerationJob) -> Self {
        *self.submit_step.lock().unwrap_or_else(|e| e.into_inner()) = Some(ScriptStep::Job(job));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<GenerationInput> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, step: ScriptStep) {
        self.steps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(step);
    }

    fn play(&self, step: ScriptStep) -> Result<GenerationJob> {
        match step {
            ScriptStep::Job(job) => {
                *self.last_job.lock().unwrap_or_else(|e| e.into_inner()) = job.clone();
                Ok(job)
            }
            ScriptStep::Error(error) => Err(error),
        }
    }
}

#[async_trait]
impl JobClient for ScriptedJobClient {
    async fn submit(&self, input: &GenerationInput) -> Result<GenerationJob> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(input.clone());
        let step = self
            .submit_step
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        match step {
            Some(step) => self.play(step),
            None => Ok(self
                .last_job
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()),
        }
    }

    async fn fetch_status(&self, job_id: &str) -> Result<GenerationJob> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if job_id != self.job_id {
            return Err(GenerationError::UpstreamError {
                status: 404,
                message: format!("unknown job {}", job_id),
            });
        }
        let step = self
            .steps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match step {
            Some(step) => self.play(step),
            None => Ok(self
                .last_job
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_then_repeats_last() {
        let client = ScriptedJobClient::new("job-1")
            .with_statuses(&[JobStatus::Processing, JobStatus::Succeeded]);

        let job = client.submit(&GenerationInput::new("x")).await.unwrap();
        assert_eq!(job.status, JobStatus::Starting);

        assert_eq!(client.fetch_status("job-1").await.unwrap().status, JobStatus::Processing);
        assert_eq!(client.fetch_status("job-1").await.unwrap().status, JobStatus::Succeeded);
        assert_eq!(client.fetch_status("job-1").await.unwrap().status, JobStatus::Succeeded);
        assert_eq!(client.fetch_count(), 3);
        assert_eq!(client.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_job_id() {
        let client = ScriptedJobClient::new("job-1");
        assert!(client.fetch_status("other").await.is_err());
    }
}
