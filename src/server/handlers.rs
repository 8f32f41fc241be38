use super::AppState;
use crate::models::GenerateResponse;
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use serde_json::json;

const FALLBACK_CLIENT_IP: &str = "127.0.0.1";

/// Client identity for rate limiting: first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then a fixed loopback address.
pub fn client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = header("x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    FALLBACK_CLIENT_IP.to_string()
}

pub async fn generate(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let client = client_ip(&req);
    log::info!("POST {} from {}", req.path(), client);

    let outcome = state.service.generate_from_json(&client, &body).await;
    let status =
        StatusCode::from_u16(outcome.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status).json(GenerateResponse::from(outcome))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
