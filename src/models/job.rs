use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::Canceled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Starting => "starting",
            JobStatus::Processing => "processing",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    pub id: String,
    pub status: JobStatus,
    pub output: Option<Vec<String>>,
    /// Upstream error text, if the service reported one.
    pub error: Option<String>,
}

impl GenerationJob {
    pub fn new(id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
            output: None,
            error: None,
        }
    }

    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn first_output(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|urls| urls.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Starting.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Canceled.is_terminal());
    }

    #[test]
    fn test_status_parses_lowercase() {
        let status: JobStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(status, JobStatus::Canceled);
        assert!(serde_json::from_str::<JobStatus>("\"Succeeded\"").is_err());
    }

    #[test]
    fn test_first_output() {
        let job = GenerationJob::new("abc", JobStatus::Succeeded);
        assert_eq!(job.first_output(), None);
        let job = job.with_output(vec!["https://a/1.webp".into(), "https://a/2.webp".into()]);
        assert_eq!(job.first_output(), Some("https://a/1.webp"));
    }
}
