use crate::{
    classifier::{classify, classify_error},
    clock::{Clock, SystemClock},
    config::Config,
    error::Result,
    logger,
    models::{ErrorCode, GenerationOutcome, GenerationRequest, RawGenerateRequest},
    polling::PollingCoordinator,
    provider::{GenerationInput, JobClient, ReplicateClient},
    rate_limiter::RateLimiter,
    style, validation,
};
use std::sync::Arc;

/// Runs one generation request end to end:
/// validate, rate-limit, compose, submit, poll, classify.
pub struct GenerationService {
    limiter: Arc<RateLimiter>,
    client: Arc<dyn JobClient>,
    poller: PollingCoordinator,
}

impl GenerationService {
    pub fn new(config: &Config) -> Result<Self> {
        let client: Arc<dyn JobClient> = Arc::new(ReplicateClient::new(&config.replicate)?);
        Ok(Self::with_parts(config, client, Arc::new(SystemClock)))
    }

    /// Builds a service around any job client and clock.
    pub fn with_parts(config: &Config, client: Arc<dyn JobClient>, clock: Arc<dyn Clock>) -> Self {
        let limiter = Arc::new(RateLimiter::with_clock(config.rate_limit, clock.clone()));
        let poller = PollingCoordinator::new(client.clone(), clock, config.polling);
        Self {
            limiter,
            client,
            poller,
        }
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Entry point for a raw request body.
    pub async fn generate_from_json(&self, client_id: &str, body: &[u8]) -> GenerationOutcome {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => {
                self.generate(client_id, &RawGenerateRequest::from_value(&value))
                    .await
            }
            Err(e) => {
                log::warn!("Rejected malformed JSON from {}: {}", client_id, e);
                GenerationOutcome::failure(ErrorCode::InvalidJson)
            }
        }
    }

    pub async fn generate(&self, client_id: &str, raw: &RawGenerateRequest) -> GenerationOutcome {
        let request = match validation::validate_request(raw) {
            Ok(request) => request,
            Err(message) => {
                log::warn!("Validation failed for {}: {}", client_id, message);
                return GenerationOutcome::failure_with_message(ErrorCode::ValidationError, message);
            }
        };

        if !self.limiter.check(client_id) {
            log::warn!("🚫 Rate limit exceeded for {}", client_id);
            return GenerationOutcome::failure(ErrorCode::RateLimitExceeded);
        }

        let _timer = logger::timer(format!("generation for {}", client_id));
        match self.run(&request).await {
            Ok(outcome) => {
                match &outcome {
                    GenerationOutcome::Success { image_url } => {
                        log::info!("✅ Image generated: {}", image_url)
                    }
                    GenerationOutcome::Failure { code, .. } => {
                        log::warn!("Generation ended with {}", code)
                    }
                }
                outcome
            }
            Err(e) => {
                let outcome = classify_error(&e);
                log::error!(
                    "❌ Generation error ({}): {}",
                    outcome.error_code().map_or("", |code| code.as_str()),
                    e
                );
                outcome
            }
        }
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let enhanced_prompt = style::enhance_prompt(&request.prompt, &request.style_options);
        log::info!("🚀 Enhanced prompt: {}", enhanced_prompt);

        let job = self
            .client
            .submit(&GenerationInput::new(enhanced_prompt))
            .await?;
        let result = self.poller.wait_for_completion(job).await?;
        Ok(classify(&result))
    }
}
