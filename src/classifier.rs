use crate::{
    error::GenerationError,
    models::{ErrorCode, GenerationOutcome, JobStatus},
    polling::PollResult,
};

/// Maps the end state of a poll to an outcome.
///
/// Order matters: a failed job is reported as failed even if it carries
/// output, and a timeout is only reported when no terminal status was seen.
pub fn classify(result: &PollResult) -> GenerationOutcome {
    let job = &result.job;

    if job.status == JobStatus::Failed {
        return GenerationOutcome::failure(ErrorCode::GenerationFailed);
    }
    if result.timed_out {
        return GenerationOutcome::failure(ErrorCode::Timeout);
    }
    if job.status == JobStatus::Canceled {
        return GenerationOutcome::failure(ErrorCode::Cancelled);
    }
    match job.first_output() {
        Some(url) => GenerationOutcome::success(url),
        None => GenerationOutcome::failure(ErrorCode::NoOutput),
    }
}

/// Maps an error raised anywhere in the pipeline to an outcome code.
///
/// Typed upstream errors are matched first; anything else falls back to
/// matching on the message text.
pub fn classify_error_code(error: &GenerationError) -> ErrorCode {
    match error {
        GenerationError::RateLimited(_) => return ErrorCode::RateLimit,
        GenerationError::UpstreamError { status: 429, .. } => return ErrorCode::RateLimit,
        GenerationError::NetworkError(_) => return ErrorCode::NetworkError,
        _ => {}
    }

    let message = error.to_string().to_lowercase();
    if message.contains("rate limit") {
        ErrorCode::RateLimit
    } else if message.contains("network") {
        ErrorCode::NetworkError
    } else {
        ErrorCode::ServerError
    }
}

pub fn classify_error(error: &GenerationError) -> GenerationOutcome {
    GenerationOutcome::failure(classify_error_code(error))
}
