use artgen::{logger, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::config_from_env()?)?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    if let Err(e) = config.replicate.require_token() {
        log::error!("❌ {}", e);
        return Err(e.into());
    }

    artgen::server::run(config).await?;
    Ok(())
}
