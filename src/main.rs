use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cielo::{CieloConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CieloConfig::from_env().inspect_err(|err| eprintln!("{}", err.user_message()))?;
    web::run(config).await
}
