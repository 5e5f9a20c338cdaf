use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::LlmSettings;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing `OPENAI_API_KEY` is allowed and makes
/// every request fall back to the template pack.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_temperature: f64,
    pub generator_timeout: Duration,
    pub static_dir: String,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 3000).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            openai_temperature: parse_env("OPENAI_TEMPERATURE", 0.3)
                .context("OPENAI_TEMPERATURE must be a number")?,
            generator_timeout: Duration::from_secs(
                parse_env("GENERATOR_TIMEOUT_SECS", 60)
                    .context("GENERATOR_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            static_dir: env_or("STATIC_DIR", "public"),
            max_body_bytes: parse_env("MAX_BODY_BYTES", 2_000_000)
                .context("MAX_BODY_BYTES must be a byte count")?,
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            api_key: self.openai_api_key.clone(),
            model: self.openai_model.clone(),
            temperature: self.openai_temperature,
            timeout: self.generator_timeout,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("INTERVIEW_API_TEST_UNSET_VAR", 3000).unwrap();
        assert_eq!(value, 3000);
    }

    #[test]
    fn test_llm_settings_mirror_config() {
        let config = Config {
            port: 3000,
            rust_log: "info".to_string(),
            openai_api_key: Some("sk-test".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            openai_temperature: 0.3,
            generator_timeout: Duration::from_secs(60),
            static_dir: "public".to_string(),
            max_body_bytes: 2_000_000,
        };
        let settings = config.llm_settings();
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }
}
