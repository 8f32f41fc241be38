use crate::error::{GenerationError, Result};
use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<()> {
    init_with_config(LoggerConfig::default())
}

/// Installs the console logger. Calling it again only swaps the config.
pub fn init_with_config(config: LoggerConfig) -> Result<()> {
    let filter = config.min_level.to_level_filter();
    CONSOLE_LOGGER.set_config(config);

    if log::set_logger(&*CONSOLE_LOGGER).is_err() {
        log::debug!("Logger already installed, config updated");
    }
    log::set_max_level(filter);
    Ok(())
}

/// Builds a config from `LOG_LEVEL` and `LOG_JSON`, on top of the dev preset.
pub fn config_from_env() -> Result<LoggerConfig> {
    let mut config = LoggerConfig::development();
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        config.min_level = LogLevel::parse(&level).ok_or_else(|| {
            GenerationError::ConfigError(format!("unknown LOG_LEVEL: {}", level))
        })?;
    }
    if std::env::var("LOG_JSON").map_or(false, |v| v == "true" || v == "1") {
        config = config.with_json_output(true).with_colors(false);
    }
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_level_filter(&self) -> LevelFilter {
        self.to_level().to_level_filter()
    }

    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// One rendered log line.
#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    pub location: Option<String>,
}

impl LogLine {
    fn from_record(record: &Record) -> Self {
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            _ => None,
        };
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: LogLevel::from_level(record.level()),
            target: record.target().to_string(),
            message: record.args().to_string(),
            location,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_target: bool,
    pub show_location: bool,
    pub timestamp_format: String,
    pub output_json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_target: true,
            show_location: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: false,
            show_emojis: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_location: true,
            ..Default::default()
        }
    }
}

pub struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    fn config(&self) -> MutexGuard<'_, LoggerConfig> {
        self.config.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_config(&self, config: LoggerConfig) {
        *self.config() = config;
    }

    pub fn render(line: &LogLine, config: &LoggerConfig) -> String {
        if config.output_json {
            return serde_json::to_string(line).unwrap_or_default();
        }

        let mut parts: Vec<String> = Vec::with_capacity(5);

        let timestamp = line.timestamp.format(&config.timestamp_format).to_string();
        parts.push(if config.show_colors {
            timestamp.bright_black().to_string()
        } else {
            timestamp
        });

        let level = if config.show_emojis {
            format!("{} {}", line.level.emoji(), line.level.as_str())
        } else {
            line.level.as_str().to_string()
        };
        parts.push(if config.show_colors {
            format!("[{}]", level.color(line.level.color()).bold())
        } else {
            format!("[{}]", level)
        });

        if config.show_target && !line.target.is_empty() {
            parts.push(if config.show_colors {
                line.target.bright_blue().to_string()
            } else {
                line.target.clone()
            });
        }

        parts.push(line.message.clone());

        if config.show_location {
            if let Some(location) = &line.location {
                let location = format!("({})", location);
                parts.push(if config.show_colors {
                    location.bright_black().to_string()
                } else {
                    location
                });
            }
        }

        parts.join(" ")
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.config().min_level.to_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine::from_record(record);
        let rendered = Self::render(&line, &self.config());
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", rendered);
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Logs how long a named operation took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("⏱️  Started: {}", name);
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!(
            "⏱️  {} finished in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: impl Into<String>) -> Timer {
    Timer::new(name)
}

pub fn log_startup_info(app_name: &str, version: &str, host: &str, port: u16) {
    log::info!("🚀 Starting {} v{}", app_name, version);
    log::info!("🌐 Listening on http://{}:{}", host, port);
}

pub fn log_config_info(config: &crate::config::Config) {
    let (host, port) = config.bind_address();
    log::info!("⚙️  Configuration loaded:");
    log::info!("   Bind: {}:{}", host, port);
    log::info!("   Model: {}", config.replicate.model());
    log::info!("   API base: {}", config.replicate.api_base());
    log::info!(
        "   API token: {}",
        if config.replicate.api_token.is_some() { "✅" } else { "❌" }
    );
    log::info!(
        "   Rate limit: {} requests / {}ms",
        config.rate_limit.max_requests,
        config.rate_limit.window.as_millis()
    );
    log::info!(
        "   Polling: {} attempts every {}ms",
        config.polling.max_retries,
        config.polling.interval.as_millis()
    );
}
