//! Prompt sanitization and request validation.
//!
//! Everything here is pure: no I/O, no clock, no shared state.

use crate::models::{ArtStyle, ColorTone, GenerationRequest, RawGenerateRequest, StyleOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const MAX_PROMPT_CHARS: usize = 500;

pub const DENYLIST: [&str; 16] = [
    "폭력", "혐오", "차별", "성적", "불법", "사기", "해킹", "바이러스", "테러", "마약", "도박", "음란",
    "선정적", "살인", "자살", "해로운",
];

pub const MSG_PROMPT_MISSING: &str = "프롬프트가 누락되었습니다.";
pub const MSG_PROMPT_EMPTY: &str = "프롬프트를 입력해주세요.";
pub const MSG_PROMPT_TOO_LONG: &str = "프롬프트는 1-500자 사이여야 합니다.";
pub const MSG_PROMPT_TOO_LONG_INPUT: &str = "프롬프트는 500자 이내로 입력해주세요.";
pub const MSG_INAPPROPRIATE: &str = "부적절한 내용이 포함되어 있습니다.";
pub const MSG_STYLE_MISSING: &str = "스타일 옵션이 누락되었습니다.";
pub const MSG_INVALID_ART_STYLE: &str = "유효하지 않은 아트 스타일입니다.";
pub const MSG_INVALID_COLOR_TONE: &str = "유효하지 않은 색조 옵션입니다.";

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)on[a-z0-9_]+\s*=\s*["'][^"']*["']?"#).expect("valid handler regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Removes script blocks, then tags, then inline `on*=` handlers, and trims.
pub fn sanitize(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_tags = HTML_TAG.replace_all(&without_scripts, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_tags, "");
    without_handlers.trim().to_string()
}

pub fn contains_inappropriate_content(text: &str) -> bool {
    let lower = text.to_lowercase();
    DENYLIST.iter().any(|word| lower.contains(word))
}

fn check_sanitized_prompt(sanitized: &str) -> Result<(), &'static str> {
    let len = sanitized.chars().count();
    if len < 1 {
        return Err(MSG_PROMPT_EMPTY);
    }
    if len > MAX_PROMPT_CHARS {
        return Err(MSG_PROMPT_TOO_LONG);
    }
    if contains_inappropriate_content(sanitized) {
        return Err(MSG_INAPPROPRIATE);
    }
    Ok(())
}

fn check_prompt(prompt: Option<&Value>) -> Result<String, &'static str> {
    let text = match prompt {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return Err(MSG_PROMPT_MISSING),
    };
    let sanitized = sanitize(text);
    check_sanitized_prompt(&sanitized)?;
    Ok(sanitized)
}

fn check_style_options(style_options: Option<&Value>) -> Result<StyleOptions, &'static str> {
    let options = match style_options {
        Some(Value::Object(options)) => options,
        _ => return Err(MSG_STYLE_MISSING),
    };
    let art_style = options
        .get("artStyle")
        .and_then(Value::as_str)
        .and_then(ArtStyle::from_label)
        .ok_or(MSG_INVALID_ART_STYLE)?;
    let color_tone = options
        .get("colorTone")
        .and_then(Value::as_str)
        .and_then(ColorTone::from_label)
        .ok_or(MSG_INVALID_COLOR_TONE)?;
    Ok(StyleOptions::new(art_style, color_tone))
}

/// Validates a raw request, returning the typed request on success or the
/// user-facing reason on failure. Prompt checks run before style checks.
pub fn validate_request(raw: &RawGenerateRequest) -> Result<GenerationRequest, String> {
    let prompt = check_prompt(raw.prompt.as_ref())?;
    let style_options = check_style_options(raw.style_options.as_ref())?;
    Ok(GenerationRequest {
        prompt,
        style_options,
    })
}

pub fn validate_input(prompt: Option<&Value>, style_options: Option<&Value>) -> ValidationResult {
    let raw = RawGenerateRequest {
        prompt: prompt.cloned(),
        style_options: style_options.cloned(),
    };
    match validate_request(&raw) {
        Ok(_) => ValidationResult::valid(),
        Err(message) => ValidationResult::invalid(message),
    }
}

/// Prompt-only check, for callers that validate before picking a style.
pub fn validate_prompt(prompt: &str) -> ValidationResult {
    if prompt.is_empty() {
        return ValidationResult::invalid(MSG_PROMPT_MISSING);
    }
    match check_sanitized_prompt(&sanitize(prompt)) {
        Ok(()) => ValidationResult::valid(),
        Err(MSG_PROMPT_TOO_LONG) => ValidationResult::invalid(MSG_PROMPT_TOO_LONG_INPUT),
        Err(message) => ValidationResult::invalid(message),
    }
}
