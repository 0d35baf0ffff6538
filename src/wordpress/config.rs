use serde::{Deserialize, Serialize};

use crate::wordpress::error::WordPressError;

pub const SITE_URL_ENV: &str = "WORDPRESS_SITE_URL";
pub const USERNAME_ENV: &str = "WORDPRESS_USERNAME";
pub const APP_PASSWORD_ENV: &str = "WORDPRESS_APP_PASSWORD";
pub const TIMEOUT_MS_ENV: &str = "WORDPRESS_TIMEOUT_MS";

/// REST namespace appended to the site URL.
pub const REST_API_PATH: &str = "/wp-json/wp/v2";

/// Connection settings for the WordPress REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPressConfig {
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub app_password: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            username: default_username(),
            app_password: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl WordPressConfig {
    /// Build the config from a variable lookup. Unset or blank values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WordPressError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout_ms = match read(TIMEOUT_MS_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                WordPressError::Config(format!("{TIMEOUT_MS_ENV} must be an integer, got '{raw}'"))
            })?,
            None => default_timeout_ms(),
        };

        let config = Self {
            site_url: read(SITE_URL_ENV).unwrap_or_else(default_site_url),
            username: read(USERNAME_ENV).unwrap_or_else(default_username),
            app_password: lookup(APP_PASSWORD_ENV).unwrap_or_default(),
            timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WordPressError> {
        if self.site_url.trim().is_empty() {
            return Err(WordPressError::Config(
                "wordpress site url cannot be empty".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(WordPressError::Config(
                "wordpress timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// `<site>/wp-json/wp/v2`, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}{REST_API_PATH}", self.site_url.trim().trim_end_matches('/'))
    }
}

fn default_site_url() -> String {
    "http://localhost".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}
