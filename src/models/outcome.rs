use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidJson,
    RateLimitExceeded,
    GenerationFailed,
    Timeout,
    Cancelled,
    NoOutput,
    RateLimit,
    NetworkError,
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::NoOutput => "NO_OUTPUT",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ServerError => "SERVER_ERROR",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError | ErrorCode::InvalidJson => 400,
            ErrorCode::RateLimitExceeded | ErrorCode::RateLimit => 429,
            ErrorCode::Timeout => 408,
            ErrorCode::Cancelled => 409,
            ErrorCode::NetworkError => 503,
            ErrorCode::GenerationFailed | ErrorCode::NoOutput | ErrorCode::ServerError => 500,
        }
    }

    /// Message shown to the user when no more specific one is available.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "입력값이 유효하지 않습니다.",
            ErrorCode::InvalidJson => "요청 데이터가 유효하지 않습니다.",
            ErrorCode::RateLimitExceeded | ErrorCode::RateLimit => {
                "요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요."
            }
            ErrorCode::GenerationFailed => "이미지 생성에 실패했습니다.",
            ErrorCode::Timeout => "이미지 생성 시간이 초과되었습니다.",
            ErrorCode::Cancelled => "이미지 생성이 취소되었습니다.",
            ErrorCode::NoOutput => "생성된 이미지가 없습니다.",
            ErrorCode::NetworkError => "네트워크 오류가 발생했습니다. 연결을 확인해주세요.",
            ErrorCode::ServerError => "서버 오류가 발생했습니다.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { image_url: String },
    Failure { code: ErrorCode, message: String },
}

impl GenerationOutcome {
    pub fn success(image_url: impl Into<String>) -> Self {
        GenerationOutcome::Success {
            image_url: image_url.into(),
        }
    }

    pub fn failure(code: ErrorCode) -> Self {
        GenerationOutcome::Failure {
            code,
            message: code.default_message().to_string(),
        }
    }

    pub fn failure_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        GenerationOutcome::Failure {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            GenerationOutcome::Success { .. } => None,
            GenerationOutcome::Failure { code, .. } => Some(*code),
        }
    }

    pub fn http_status(&self) -> u16 {
        self.error_code().map_or(200, |code| code.http_status())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Wire shape of a generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Success { image_url } => GenerateResponse {
                success: true,
                image_url: Some(image_url),
                error: None,
            },
            GenerationOutcome::Failure { code, message } => GenerateResponse {
                success: false,
                image_url: None,
                error: Some(ApiErrorBody { code, message }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_status_mapping() {
        let expected = [
            (ErrorCode::ValidationError, 400),
            (ErrorCode::InvalidJson, 400),
            (ErrorCode::RateLimitExceeded, 429),
            (ErrorCode::GenerationFailed, 500),
            (ErrorCode::Timeout, 408),
            (ErrorCode::Cancelled, 409),
            (ErrorCode::NoOutput, 500),
            (ErrorCode::RateLimit, 429),
            (ErrorCode::NetworkError, 503),
            (ErrorCode::ServerError, 500),
        ];
        for (code, status) in expected {
            assert_eq!(code.http_status(), status, "{}", code);
        }
        assert_eq!(GenerationOutcome::success("https://x").http_status(), 200);
    }

    #[test]
    fn test_code_serializes_as_wire_string() {
        for code in [ErrorCode::RateLimitExceeded, ErrorCode::NoOutput, ErrorCode::InvalidJson] {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_str()));
        }
    }

    #[test]
    fn test_success_wire_shape() {
        let body = GenerateResponse::from(GenerationOutcome::success("https://img/1.webp"));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"success": true, "imageUrl": "https://img/1.webp"})
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let body = GenerateResponse::from(GenerationOutcome::failure(ErrorCode::Timeout));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": false,
                "error": {"code": "TIMEOUT", "message": "이미지 생성 시간이 초과되었습니다."}
            })
        );
    }
}
