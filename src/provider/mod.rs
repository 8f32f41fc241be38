pub mod replicate;
#[doc(hidden)]
pub mod scripted;

use crate::{
    error::Result,
    models::GenerationJob,
    style::NEGATIVE_PROMPT,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use replicate::ReplicateClient;
#[doc(hidden)]
pub use scripted::ScriptedJobClient;

/// Input for one generation job. Everything except the prompt is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationInput {
    pub prompt: String,
    pub negative_prompt: String,
    pub aspect_ratio: String,
    pub output_format: String,
    pub output_quality: u8,
    pub num_outputs: u8,
    pub megapixels: String,
    pub go_fast: bool,
}

impl GenerationInput {
    pub fn new(enhanced_prompt: impl Into<String>) -> Self {
        Self {
            prompt: enhanced_prompt.into(),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            aspect_ratio: "16:9".to_string(),
            output_format: "webp".to_string(),
            output_quality: 90,
            num_outputs: 1,
            megapixels: "1".to_string(),
            go_fast: true,
        }
    }
}

/// An external service that runs generation jobs asynchronously.
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Starts a job. Called once per request; never retried here.
    async fn submit(&self, input: &GenerationInput) -> Result<GenerationJob>;

    async fn fetch_status(&self, job_id: &str) -> Result<GenerationJob>;
}
