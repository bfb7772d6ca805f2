use backend::config::AppConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting points ballot server");

    let figment = rocket::Config::figment();
    let config = AppConfig::from_figment(&figment)?;
    let rocket = backend::build(figment, config)?;

    let _ = rocket.launch().await?;
    info!("Server shut down");
    Ok(())
}
