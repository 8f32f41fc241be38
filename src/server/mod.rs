pub mod handlers;

use crate::{config::Config, error::GenerationError, logger, service::GenerationService};
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(service: GenerationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate", web::post().to(handlers::generate))
        .route("/api/generate", web::post().to(handlers::generate))
        .route("/health", web::get().to(handlers::health));
}

/// Starts the HTTP server and runs until it is shut down.
pub async fn run(config: Config) -> crate::error::Result<()> {
    let service = GenerationService::new(&config)?;
    let state = AppState::new(service);
    let (host, port) = config.bind_address();

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &host, port);

    // Identifiers whose window has fully expired are dropped once a minute.
    let limiter = state.service.rate_limiter().clone();
    let sweep_every = config.rate_limit.window.max(Duration::from_secs(60));
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            let dropped = limiter.prune_idle();
            if dropped > 0 {
                log::debug!("Dropped {} idle rate limit entries", dropped);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind((host.as_str(), port))
    .map_err(|e| GenerationError::ConfigError(format!("cannot bind {}:{}: {}", host, port, e)))?
    .run()
    .await
    .map_err(|e| GenerationError::InternalError(e.to_string()))
}
