use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wordpress::error::WordPressError;

/// Status a post can be written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Draft,
    Pending,
}

impl PostStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
        }
    }
}

/// Status filter for listing posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatusFilter {
    Publish,
    Draft,
    Pending,
    All,
}

impl PostStatusFilter {
    /// Value for the REST `status` query parameter. WordPress spells "every
    /// status" as `any`.
    pub const fn query_value(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::All => "any",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub search: Option<String>,
    pub per_page: u32,
    pub status: PostStatusFilter,
}

/// Yoast SEO post meta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    #[serde(rename = "_yoast_wpseo_title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "_yoast_wpseo_metadesc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeoMeta>,
}

/// Body of `POST /posts/{id}`. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeoMeta>,
}

/// A file downloaded from an arbitrary URL, ready for the media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Normalized outcome of every WordPress tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPressResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl WordPressResponse {
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failed(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
        }
    }
}

/// Capability interface over the WordPress REST API.
///
/// Implementations return the decoded JSON body of each call and report
/// transport or HTTP failures as [`WordPressError`].
#[async_trait]
pub trait WordPressApi: Send + Sync {
    async fn list_posts(&self, query: &PostQuery) -> Result<Value, WordPressError>;
    async fn create_post(&self, post: &NewPost) -> Result<Value, WordPressError>;
    async fn update_post(&self, post_id: u64, update: &PostUpdate) -> Result<Value, WordPressError>;
    async fn delete_post(&self, post_id: u64, force: bool) -> Result<Value, WordPressError>;

    /// Download a file from outside the site (no credentials are sent).
    async fn fetch_remote_file(&self, url: &str) -> Result<RemoteFile, WordPressError>;

    /// Upload into the media library and return the created media object.
    async fn upload_media(&self, file: &RemoteFile) -> Result<Value, WordPressError>;
}
