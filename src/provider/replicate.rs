use super::{GenerationInput, JobClient};
use crate::{
    config::ReplicateConfig,
    error::{GenerationError, Result},
    models::{GenerationJob, JobStatus},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Prediction record as returned by the Replicate HTTP API.
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl PredictionResponse {
    pub fn into_job(self) -> GenerationJob {
        let output = self.output.as_ref().map(|value| {
            let mut urls = Vec::new();
            collect_output_urls(value, &mut urls);
            urls
        });
        let error = match self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
        };
        GenerationJob {
            id: self.id,
            status: self.status,
            output,
            error,
        }
    }
}

/// Output is a single URL for some models and a list for others.
fn collect_output_urls(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(url) => {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_output_urls(item, out);
            }
        }
        _ => {}
    }
}

#[derive(Clone)]
pub struct ReplicateClient {
    http: reqwest::Client,
    api_base: String,
    api_token: String,
    model: String,
}

impl ReplicateClient {
    pub fn new(config: &ReplicateConfig) -> Result<Self> {
        let api_token = config.require_token()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GenerationError::ConfigError(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base(),
            api_token,
            model: config.model().to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn predictions_endpoint(&self) -> String {
        format!("{}/models/{}/predictions", self.api_base, self.model)
    }

    fn prediction_endpoint(&self, job_id: &str) -> String {
        format!("{}/predictions/{}", self.api_base, job_id)
    }

    async fn read_prediction(response: reqwest::Response) -> Result<GenerationJob> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(512).collect();
            log::error!("Replicate returned {}: {}", status, body);
            if status.as_u16() == 429 {
                return Err(GenerationError::RateLimited(body));
            }
            return Err(GenerationError::UpstreamError {
                status: status.as_u16(),
                message: body,
            });
        }

        let prediction: PredictionResponse = response.json().await?;
        Ok(prediction.into_job())
    }
}

#[async_trait]
impl JobClient for ReplicateClient {
    async fn submit(&self, input: &GenerationInput) -> Result<GenerationJob> {
        let endpoint = self.predictions_endpoint();
        log::info!("Submitting generation job to model: {}", self.model);
        log::debug!("Generation input: {:?}", input);

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_token)
            .json(&json!({ "input": input }))
            .send()
            .await?;

        let job = Self::read_prediction(response).await?;
        log::info!("Job {} created with status {}", job.id, job.status);
        Ok(job)
    }

    async fn fetch_status(&self, job_id: &str) -> Result<GenerationJob> {
        let response = self
            .http
            .get(self.prediction_endpoint(job_id))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        Self::read_prediction(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_error_code;
    use crate::models::ErrorCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/v1", addr)
    }

    fn client_for(api_base: &str) -> ReplicateClient {
        ReplicateClient::new(
            &ReplicateConfig::new()
                .with_token("r8_test")
                .with_api_base(api_base),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_accepted() {
        let base = serve_once("201 Created", r#"{"id":"p9","status":"starting","output":null}"#).await;
        let job = client_for(&base)
            .submit(&GenerationInput::new("a cat"))
            .await
            .unwrap();
        assert_eq!(job.id, "p9");
        assert_eq!(job.status, JobStatus::Starting);
    }

    #[tokio::test]
    async fn test_fetch_status_ok() {
        let base = serve_once("200 OK", r#"{"id":"p9","status":"processing"}"#).await;
        let job = client_for(&base).fetch_status("p9").await.unwrap();
        assert_eq!(job, GenerationJob::new("p9", JobStatus::Processing));
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let base = serve_once("429 Too Many Requests", r#"{"detail":"throttled"}"#).await;
        let err = client_for(&base)
            .submit(&GenerationInput::new("a cat"))
            .await
            .unwrap_err();
        match &err {
            GenerationError::RateLimited(body) => assert!(body.contains("throttled")),
            other => panic!("expected RateLimited, got {:?}", other),
        }
        assert_eq!(classify_error_code(&err), ErrorCode::RateLimit);
    }

    #[tokio::test]
    async fn test_500_carries_status_and_body() {
        let base = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let err = client_for(&base).fetch_status("p9").await.unwrap_err();
        match &err {
            GenerationError::UpstreamError { status, message } => {
                assert_eq!(*status, 500);
                assert!(message.contains("boom"));
            }
            other => panic!("expected UpstreamError, got {:?}", other),
        }
        assert_eq!(classify_error_code(&err), ErrorCode::ServerError);
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}/v1", addr))
            .fetch_status("p9")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::NetworkError(_)), "{:?}", err);
        assert_eq!(classify_error_code(&err), ErrorCode::NetworkError);
    }

    fn parse(value: Value) -> GenerationJob {
        serde_json::from_value::<PredictionResponse>(value)
            .unwrap()
            .into_job()
    }

    #[test]
    fn test_prediction_with_list_output() {
        let job = parse(json!({
            "id": "p1",
            "status": "succeeded",
            "output": ["https://replicate.delivery/a.webp"],
            "error": null
        }));
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.first_output(), Some("https://replicate.delivery/a.webp"));
        assert_eq!(job.error, None);
    }

    #[test]
    fn test_prediction_with_single_output_and_error() {
        let job = parse(json!({
            "id": "p2",
            "status": "failed",
            "output": "https://replicate.delivery/b.webp",
            "error": "NSFW content detected"
        }));
        assert_eq!(job.output, Some(vec!["https://replicate.delivery/b.webp".to_string()]));
        assert_eq!(job.error.as_deref(), Some("NSFW content detected"));
    }

    #[test]
    fn test_prediction_while_starting_has_no_output() {
        let job = parse(json!({"id": "p3", "status": "starting"}));
        assert_eq!(job.status, JobStatus::Starting);
        assert_eq!(job.output, None);
    }

    #[test]
    fn test_new_requires_token() {
        assert!(matches!(
            ReplicateClient::new(&ReplicateConfig::new()),
            Err(GenerationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_endpoints() {
        let client = ReplicateClient::new(
            &ReplicateConfig::new()
                .with_token("r8_test")
                .with_api_base("http://localhost:9000/v1/"),
        )
        .unwrap();
        assert_eq!(
            client.predictions_endpoint(),
            "http://localhost:9000/v1/models/black-forest-labs/flux-schnell/predictions"
        );
        assert_eq!(
            client.prediction_endpoint("abc"),
            "http://localhost:9000/v1/predictions/abc"
        );
    }
}
