use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::retry::{Backoff, RetryPolicy};
use crate::settings::Settings;

const DEFAULT_EMBEDDING_API_URL: &str = "https://api.openai.com/v1/embeddings";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding_api_url: String,
    pub embedding_api_key: String,
    pub embedding_timeout: Duration,
    pub retry: RetryPolicy,
    pub screen_timeout: Duration,
    /// Initial snapshot; may be replaced at runtime through the settings API.
    pub settings: Settings,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Settings::default();
        let settings = Settings {
            filter_vector_threshold: env_or(
                "FILTER_VECTOR_THRESHOLD",
                defaults.filter_vector_threshold,
            )?,
            filter_keyword_threshold: env_or(
                "FILTER_KEYWORD_THRESHOLD",
                defaults.filter_keyword_threshold,
            )?,
            embedding_model: std::env::var("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_output_dimensionality: env_or(
                "EMBEDDING_OUTPUT_DIMENSIONALITY",
                defaults.embedding_output_dimensionality,
            )?,
        };
        settings
            .validate()
            .context("Invalid initial filter settings")?;

        let backoff = match std::env::var("EMBEDDING_RETRY_BACKOFF")
            .unwrap_or_else(|_| "exponential".to_string())
            .to_lowercase()
            .as_str()
        {
            "exponential" => Backoff::Exponential,
            "fixed" => Backoff::Fixed,
            other => {
                bail!("EMBEDDING_RETRY_BACKOFF must be 'exponential' or 'fixed', got '{other}'")
            }
        };

        let retry = RetryPolicy {
            max_attempts: env_or("EMBEDDING_MAX_ATTEMPTS", 3_u32)?.max(1),
            base_delay: Duration::from_millis(env_or("EMBEDDING_RETRY_BASE_MS", 1000_u64)?),
            max_delay: Duration::from_millis(env_or("EMBEDDING_RETRY_MAX_MS", 30_000_u64)?),
            backoff,
        };

        Ok(Config {
            embedding_api_url: std::env::var("EMBEDDING_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_API_URL.to_string()),
            embedding_api_key: require_env("EMBEDDING_API_KEY")?,
            embedding_timeout: Duration::from_secs(env_or("EMBEDDING_TIMEOUT_SECS", 60_u64)?),
            retry,
            screen_timeout: Duration::from_secs(env_or("SCREEN_TIMEOUT_SECS", 120_u64)?),
            settings,
            port: env_or("PORT", 8080_u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `key` when set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
