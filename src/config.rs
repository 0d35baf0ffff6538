//! Process configuration, read once from the environment at startup.

use crate::wordpress::{WordPressConfig, WordPressError};

pub const SEED_ENV: &str = "SEO_PUBLISHER_SEED";
pub const CANONICAL_BASE_URL_ENV: &str = "SEO_CANONICAL_BASE_URL";

const DEFAULT_CANONICAL_BASE_URL: &str = "https://example.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    WordPress(#[from] WordPressError),
    #[error("SEO_PUBLISHER_SEED must be an unsigned integer, got '{0}'")]
    InvalidSeed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub wordpress: WordPressConfig,
    /// Fixed seed for the mock generators; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Base for canonical and Open Graph URLs.
    pub canonical_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wordpress = WordPressConfig::from_lookup(&lookup)?;

        let seed = match lookup(SEED_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?,
            ),
            None => None,
        };

        let canonical_base_url = lookup(CANONICAL_BASE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CANONICAL_BASE_URL.to_string());

        Ok(Self {
            wordpress,
            seed,
            canonical_base_url,
        })
    }
}
