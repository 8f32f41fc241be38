//! Fixed-interval polling of a submitted job.
//!
//! The loop checks for a terminal status before every sleep, so a job that
//! is already finished at submission costs no fetches at all. When the retry
//! budget runs out first, the result is marked as timed out and the caller
//! decides what to report.

use crate::{
    clock::Clock,
    config::PollingConfig,
    error::Result,
    models::GenerationJob,
    provider::JobClient,
};
use std::sync::Arc;

const PROGRESS_LOG_EVERY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub job: GenerationJob,
    /// Status fetches made after submission.
    pub attempts: u32,
    /// True when the budget ran out while the job was still non-terminal.
    pub timed_out: bool,
}

pub struct PollingCoordinator {
    client: Arc<dyn JobClient>,
    clock: Arc<dyn Clock>,
    config: PollingConfig,
}

impl PollingCoordinator {
    pub fn new(client: Arc<dyn JobClient>, clock: Arc<dyn Clock>, config: PollingConfig) -> Self {
        Self {
            client,
            clock,
            config,
        }
    }

    pub fn config(&self) -> PollingConfig {
        self.config
    }

    pub async fn wait_for_completion(&self, job: GenerationJob) -> Result<PollResult> {
        let max_retries = self.config.max_retries;
        let mut current = job;
        let mut attempts = 0u32;

        log::info!(
            "Polling job {} (initial status {}, max {} attempts)",
            current.id,
            current.status,
            max_retries
        );

        while !current.status.is_terminal() && attempts < max_retries {
            self.clock.sleep(self.config.interval).await;
            current = self.client.fetch_status(&current.id).await?;
            attempts += 1;

            if attempts % PROGRESS_LOG_EVERY == 0 {
                log::info!(
                    "Polling job {}: {}/{} attempts, status {}",
                    current.id,
                    attempts,
                    max_retries,
                    current.status
                );
            }
        }

        let timed_out = !current.status.is_terminal();
        log::info!(
            "Polling finished for job {}: status {}, {} attempts, output {}",
            current.id,
            current.status,
            attempts,
            if current.output.is_some() { "present" } else { "missing" }
        );
        if let Some(error) = &current.error {
            log::warn!("Job {} reported error: {}", current.id, error);
        }

        Ok(PollResult {
            job: current,
            attempts,
            timed_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::GenerationError;
    use crate::models::JobStatus;
    use crate::provider::ScriptedJobClient;
    use std::time::Duration;

    fn coordinator(client: Arc<ScriptedJobClient>, clock: Arc<ManualClock>) -> PollingCoordinator {
        PollingCoordinator::new(client, clock, PollingConfig::default())
    }

    #[tokio::test]
    async fn test_succeeds_after_three_fetches() {
        let client = Arc::new(
            ScriptedJobClient::new("job")
                .with_statuses(&[JobStatus::Processing, JobStatus::Processing])
                .then_job(
                    GenerationJob::new("job", JobStatus::Succeeded)
                        .with_output(vec!["https://img/1.webp".into()]),
                ),
        );
        let clock = Arc::new(ManualClock::new());
        let poller = coordinator(client.clone(), clock.clone());

        let result = poller
            .wait_for_completion(GenerationJob::new("job", JobStatus::Starting))
            .await
            .unwrap();

        assert_eq!(client.fetch_count(), 3);
        assert_eq!(result.attempts, 3);
        assert!(!result.timed_out);
        assert_eq!(result.job.first_output(), Some("https://img/1.webp"));
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_times_out_after_budget() {
        let client = Arc::new(ScriptedJobClient::new("job").with_statuses(&[JobStatus::Processing]));
        let clock = Arc::new(ManualClock::new());
        let poller = coordinator(client.clone(), clock.clone());

        let result = poller
            .wait_for_completion(GenerationJob::new("job", JobStatus::Processing))
            .await
            .unwrap();

        assert_eq!(client.fetch_count(), 60);
        assert!(result.timed_out);
        assert_eq!(result.job.status, JobStatus::Processing);
        assert_eq!(clock.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_terminal_on_last_allowed_fetch_is_not_a_timeout() {
        let mut statuses = vec![JobStatus::Processing; 59];
        statuses.push(JobStatus::Canceled);
        let client = Arc::new(ScriptedJobClient::new("job").with_statuses(&statuses));
        let poller = coordinator(client.clone(), Arc::new(ManualClock::new()));

        let result = poller
            .wait_for_completion(GenerationJob::new("job", JobStatus::Starting))
            .await
            .unwrap();

        assert_eq!(result.attempts, 60);
        assert!(!result.timed_out);
        assert_eq!(result.job.status, JobStatus::Canceled);
    }

    #[tokio::test]
    async fn test_already_terminal_job_is_not_fetched() {
        let client = Arc::new(ScriptedJobClient::new("job"));
        let poller = coordinator(client.clone(), Arc::new(ManualClock::new()));

        let result = poller
            .wait_for_completion(GenerationJob::new("job", JobStatus::Failed))
            .await
            .unwrap();

        assert_eq!(client.fetch_count(), 0);
        assert_eq!(result.attempts, 0);
        assert_eq!(result.job.status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let client = Arc::new(
            ScriptedJobClient::new("job")
                .with_statuses(&[JobStatus::Processing])
                .then_error(GenerationError::NetworkError("connection reset".into())),
        );
        let poller = coordinator(client.clone(), Arc::new(ManualClock::new()));

        let err = poller
            .wait_for_completion(GenerationJob::new("job", JobStatus::Starting))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::NetworkError(_)));
        assert_eq!(client.fetch_count(), 2);
    }
}
