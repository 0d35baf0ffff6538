//! reqwest-backed WordPress REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;

use crate::wordpress::config::WordPressConfig;
use crate::wordpress::error::WordPressError;
use crate::wordpress::types::{NewPost, PostQuery, PostUpdate, RemoteFile, WordPressApi};

const USER_AGENT: &str = concat!("seo-publisher/", env!("CARGO_PKG_VERSION"));
const DEFAULT_FILE_NAME: &str = "featured-image.jpg";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Authenticates every site call with HTTP Basic credentials (username +
/// application password). One instance is built at startup and shared.
pub struct WordPressClient {
    api_base: String,
    username: String,
    app_password: String,
    timeout_ms: u64,
    client: reqwest::Client,
}

impl WordPressClient {
    pub fn new(config: WordPressConfig) -> Result<Self, WordPressError> {
        config.validate()?;

        Ok(Self {
            api_base: config.api_base(),
            username: config.username,
            app_password: config.app_password,
            timeout_ms: config.timeout_ms,
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|error| WordPressError::Config(error.to_string()))?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, WordPressError> {
        let response = request
            .basic_auth(&self.username, Some(&self.app_password))
            .send()
            .await
            .map_err(|error| self.map_transport_error(error))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| self.map_transport_error(error))?;
        tracing::debug!("WordPress API response: status={}", status);

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(WordPressError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|error| {
            WordPressError::InvalidResponse(format!("failed to parse WordPress JSON: {error}"))
        })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> WordPressError {
        if error.is_timeout() {
            return WordPressError::Timeout(format!(
                "WordPress request timed out after {} ms",
                self.timeout_ms
            ));
        }
        if error.is_connect() {
            return WordPressError::Request(format!(
                "could not reach WordPress at {}: {error}",
                self.api_base
            ));
        }
        WordPressError::from(error)
    }
}

#[async_trait]
impl WordPressApi for WordPressClient {
    async fn list_posts(&self, query: &PostQuery) -> Result<Value, WordPressError> {
        let mut params = vec![
            ("per_page", query.per_page.to_string()),
            ("status", query.status.query_value().to_string()),
        ];
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }

        self.send_json(self.client.get(self.endpoint("/posts")).query(&params))
            .await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Value, WordPressError> {
        self.send_json(self.client.post(self.endpoint("/posts")).json(post))
            .await
    }

    async fn update_post(&self, post_id: u64, update: &PostUpdate) -> Result<Value, WordPressError> {
        self.send_json(
            self.client
                .post(self.endpoint(&format!("/posts/{post_id}")))
                .json(update),
        )
        .await
    }

    async fn delete_post(&self, post_id: u64, force: bool) -> Result<Value, WordPressError> {
        self.send_json(
            self.client
                .delete(self.endpoint(&format!("/posts/{post_id}")))
                .query(&[("force", force)]),
        )
        .await
    }

    async fn fetch_remote_file(&self, url: &str) -> Result<RemoteFile, WordPressError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| self.map_transport_error(error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordPressError::Request(format!(
                "download of {url} returned status {}",
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| self.map_transport_error(error))?;

        Ok(RemoteFile {
            file_name: file_name_from_url(url),
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    async fn upload_media(&self, file: &RemoteFile) -> Result<Value, WordPressError> {
        self.send_json(
            self.client
                .post(self.endpoint("/media"))
                .header(CONTENT_TYPE, file.content_type.as_str())
                .header(
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.file_name),
                )
                .body(file.bytes.clone()),
        )
        .await
    }
}

/// Last path segment of `url`, percent-decoded, or a fixed fallback name.
pub fn file_name_from_url(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .map(str::to_string),
    };

    segment
        .map(|name| {
            urlencoding::decode(&name)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(name)
        })
        .map(|name| name.replace(['"', '\\'], ""))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}
