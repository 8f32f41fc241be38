use crate::error::{GenerationError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";
pub const DEFAULT_MODEL: &str = "black-forest-labs/flux-schnell";

#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    pub api_token: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub max_retries: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub replicate: ReplicateConfig,
    pub rate_limit: RateLimitConfig,
    pub polling: PollingConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        ReplicateConfig {
            api_token: None,
            api_base: None,
            model: None,
            timeout_secs: None,
        }
    }
}

impl ReplicateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        ReplicateConfig {
            api_token: env_non_empty("REPLICATE_API_TOKEN"),
            api_base: env_non_empty("REPLICATE_API_BASE"),
            model: env_non_empty("REPLICATE_MODEL"),
            timeout_secs: env_parse("HTTP_TIMEOUT_SECS"),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .as_deref()
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }

    /// The token is the only setting without a usable default.
    pub fn require_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            GenerationError::ConfigError("REPLICATE_API_TOKEN is not set".into())
        })
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            max_requests: 3,
            window: Duration::from_millis(60_000),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        RateLimitConfig {
            max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS").unwrap_or(defaults.max_requests),
            window: env_parse("RATE_LIMIT_WINDOW_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.window),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        PollingConfig {
            max_retries: 60,
            interval: Duration::from_millis(1000),
        }
    }
}

impl PollingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        PollingConfig {
            max_retries: env_parse("POLL_MAX_RETRIES").unwrap_or(defaults.max_retries),
            interval: env_parse("POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: None,
            port: None,
            replicate: ReplicateConfig::default(),
            rate_limit: RateLimitConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            host: env_non_empty("HOST"),
            port: env_parse("PORT"),
            replicate: ReplicateConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            polling: PollingConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_replicate(mut self, config: ReplicateConfig) -> Self {
        self.replicate = config;
        self
    }

    pub fn with_rate_limit(mut self, max_requests: usize, window: Duration) -> Self {
        self.rate_limit = RateLimitConfig {
            max_requests,
            window,
        };
        self
    }

    pub fn with_polling(mut self, max_retries: u32, interval: Duration) -> Self {
        self.polling = PollingConfig {
            max_retries,
            interval,
        };
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string()),
            self.port.unwrap_or(8080),
        )
    }
}
