pub mod classifier;
pub mod clock;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod polling;
pub mod provider;
pub mod rate_limiter;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod style;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, PollingConfig, RateLimitConfig, ReplicateConfig};
pub use error::{GenerationError, Result};
pub use models::{
    ApiErrorBody, ArtStyle, ColorTone, ErrorCode, GenerateResponse, GenerationJob,
    GenerationOutcome, GenerationRequest, JobStatus, RawGenerateRequest, StyleOptions,
};
pub use polling::{PollResult, PollingCoordinator};
pub use provider::{GenerationInput, JobClient, ReplicateClient};
#[doc(hidden)]
pub use provider::ScriptedJobClient;
pub use rate_limiter::RateLimiter;
pub use service::GenerationService;
pub use validation::ValidationResult;
