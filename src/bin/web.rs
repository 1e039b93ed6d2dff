#![cfg(not(tarpaulin_include))]

use profile_cloud::app;
use profile_cloud::config::AppConfig;

/// Main entry point for the web application
///
/// Reads `PROFILE_CLOUD_*` overrides from the environment and serves the
/// upload page, by default on 127.0.0.1:3000. Set `RUST_LOG` to control
/// logging.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    app::run(config).await
}
