use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variables that override API keys from the config file.
pub const ENV_WEATHER_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_NARRATOR_KEY: &str = "GEMINI_API_KEY";
pub const ENV_NEWS_KEY: &str = "NEWS_API_KEY";
pub const ENV_IMAGES_KEY: &str = "PEXELS_API_KEY";

const APP_DIR: &str = "outbreak-oracle";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap weather + air pollution
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Generative-text service
    #[serde(default)]
    pub narrator: NarratorConfig,

    /// Health news search (news variant only)
    #[serde(default)]
    pub news: NewsConfig,

    /// Stock-photo background lookup
    #[serde(default)]
    pub images: ImagesConfig,

    /// Text-to-speech command
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_narrator_url")]
    pub base_url: String,
    /// Model name used in `models/{model}:generateContent`
    #[serde(default = "default_narrator_model")]
    pub model: String,
}

fn default_narrator_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_narrator_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_narrator_url(),
            model: default_narrator_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_url")]
    pub base_url: String,
    /// Number of articles requested per search
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_news_url() -> String {
    "https://newsapi.org".to_string()
}

/// Most articles a news search will request
pub const NEWS_PAGE_LIMIT: u32 = 10;

fn default_page_size() -> u32 {
    NEWS_PAGE_LIMIT
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_news_url(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_images_url")]
    pub base_url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_images_url() -> String {
    "https://api.pexels.com".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_images_url(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Program that reads text from its arguments (e.g. `espeak`, `say`)
    #[serde(default = "default_speech_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_speech_command() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak".to_string()
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: default_speech_command(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout applied by the HTTP client
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist.
    /// API keys from the environment take precedence over the file.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path, writing defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it.
    ///
    /// Returns an error if validation fails with critical errors; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Replace API keys with values from `lookup` when present and non-empty.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &str, current: &mut String| {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *current = value;
            }
        };

        pick(ENV_WEATHER_KEY, &mut self.weather.api_key);
        pick(ENV_NARRATOR_KEY, &mut self.narrator.api_key);
        pick(ENV_NEWS_KEY, &mut self.news.api_key);
        pick(ENV_IMAGES_KEY, &mut self.images.api_key);
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.narrator.base_url, "narrator.base_url", &mut result);
        self.validate_url(&self.news.base_url, "news.base_url", &mut result);
        self.validate_url(&self.images.base_url, "images.base_url", &mut result);

        if self.weather.api_key.is_empty() {
            result.add_warning(
                "weather.api_key",
                format!("No weather API key (set {})", ENV_WEATHER_KEY),
            );
        }
        if self.narrator.api_key.is_empty() {
            result.add_warning(
                "narrator.api_key",
                format!("No generative-text API key (set {})", ENV_NARRATOR_KEY),
            );
        }
        if self.news.api_key.is_empty() {
            result.add_warning(
                "news.api_key",
                "No news API key - news mode will be unavailable",
            );
        }
        if self.images.enabled && self.images.api_key.is_empty() {
            result.add_warning(
                "images.api_key",
                "No stock-photo API key - background images disabled",
            );
        }

        if self.narrator.model.trim().is_empty() {
            result.add_error("narrator.model", "Model name must not be empty");
        }

        if self.news.page_size == 0 {
            result.add_error("news.page_size", "Page size must be greater than 0");
        } else if self.news.page_size > NEWS_PAGE_LIMIT {
            result.add_warning(
                "news.page_size",
                format!("Page size above {} is clamped to {}", NEWS_PAGE_LIMIT, NEWS_PAGE_LIMIT),
            );
        }

        if self.http.timeout_secs == 0 {
            result.add_error("http.timeout_secs", "Timeout must be greater than 0");
        }

        if self.speech.command.trim().is_empty() {
            result.add_warning("speech.command", "No speech command - narration disabled");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }
}
