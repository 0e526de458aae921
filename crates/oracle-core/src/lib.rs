pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, HttpConfig, ImagesConfig, NarratorConfig, NewsConfig, SpeechConfig,
    ValidationResult, WeatherConfig, NEWS_PAGE_LIMIT,
};
pub use error::{FailureKind, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Logs go to stderr so the rendered dashboard on stdout stays readable.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Outbreak Oracle core initialized");
    Ok(())
}
