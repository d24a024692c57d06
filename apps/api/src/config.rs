use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_RESUME_CHARS: usize = 50_000;

/// Application configuration loaded from environment variables.
///
/// The OpenAI key is optional at startup: without it the service still boots
/// and `/api/analyze` answers 500 "API key not configured".
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub max_resume_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            max_resume_chars: match optional_env("MAX_RESUME_CHARS") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_RESUME_CHARS must be a positive integer")?,
                None => DEFAULT_MAX_RESUME_CHARS,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_resume_chars: DEFAULT_MAX_RESUME_CHARS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_key() {
        let config = Config::default();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.max_resume_chars, DEFAULT_MAX_RESUME_CHARS);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("RESUME_ANALYZER_TEST_BLANK", "   ");
        assert_eq!(optional_env("RESUME_ANALYZER_TEST_BLANK"), None);
        std::env::remove_var("RESUME_ANALYZER_TEST_BLANK");
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("RESUME_ANALYZER_TEST_TRIM", "  sk-test  ");
        assert_eq!(
            optional_env("RESUME_ANALYZER_TEST_TRIM").as_deref(),
            Some("sk-test")
        );
        std::env::remove_var("RESUME_ANALYZER_TEST_TRIM");
    }
}
