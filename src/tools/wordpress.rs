//! WordPress tools.
//!
//! Thin adapters from typed tool arguments to the WordPress service layer.
//! Upstream failures come back as `success: false` payloads, so these tools
//! only return `Err` for bad arguments.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::tool::ToolDescriptor;
use crate::tools::types::{
    build_schema, parse_args, to_output, whole_number, Tool, ToolContext, ToolError,
};
use crate::wordpress::service::{self, CreatePostRequest, UpdatePostRequest};
use crate::wordpress::{PostQuery, PostStatus, PostStatusFilter};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetPostsArgs {
    /// Search term
    #[serde(default)]
    pub search: Option<String>,
    /// Number of posts to fetch
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
    #[serde(default = "default_status_filter")]
    pub status: PostStatusFilter,
}

fn default_limit() -> u32 {
    10
}

fn default_status_filter() -> PostStatusFilter {
    PostStatusFilter::Publish
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePostArgs {
    /// Post title
    pub title: String,
    /// Post content
    pub content: String,
    /// Short excerpt
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Tags for the post
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Categories for the post
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default = "default_create_status")]
    pub status: PostStatus,
    /// Featured image URL
    #[serde(default)]
    pub featured_image_url: Option<String>,
    /// SEO title
    #[serde(default)]
    pub seo_title: Option<String>,
    /// SEO meta description
    #[serde(default)]
    pub seo_description: Option<String>,
}

fn default_create_status() -> PostStatus {
    PostStatus::Draft
}

impl From<CreatePostArgs> for CreatePostRequest {
    fn from(args: CreatePostArgs) -> Self {
        Self {
            title: args.title,
            content: args.content,
            excerpt: args.excerpt,
            tags: args.tags,
            categories: args.categories,
            status: args.status,
            featured_image_url: args.featured_image_url,
            seo_title: args.seo_title,
            seo_description: args.seo_description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostArgs {
    /// WordPress post ID
    #[serde(deserialize_with = "whole_number")]
    pub post_id: u64,
    /// New post title
    #[serde(default)]
    pub title: Option<String>,
    /// New post content
    #[serde(default)]
    pub content: Option<String>,
    /// New status
    #[serde(default)]
    pub status: Option<PostStatus>,
    /// Updated SEO title
    #[serde(default)]
    pub seo_title: Option<String>,
    /// Updated SEO description
    #[serde(default)]
    pub seo_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeletePostArgs {
    /// WordPress post ID
    #[serde(deserialize_with = "whole_number")]
    pub post_id: u64,
    /// Force delete (skip trash)
    #[serde(default)]
    pub force: bool,
}

/// `get_wordpress_posts` tool.
pub struct GetPostsTool;

#[async_trait]
impl Tool for GetPostsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_wordpress_posts".into(),
            description: "Fetch posts from connected WordPress site".into(),
            input_schema: build_schema::<GetPostsArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: GetPostsArgs = parse_args(input)?;
        let query = PostQuery {
            search: args.search.filter(|s| !s.is_empty()),
            per_page: args.limit,
            status: args.status,
        };

        let response = service::get_posts(ctx.wordpress(), &query).await;
        to_output(&response)
    }
}

/// `create_wordpress_post` tool.
pub struct CreatePostTool;

#[async_trait]
impl Tool for CreatePostTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "create_wordpress_post".into(),
            description: "Create a new post on WordPress site".into(),
            input_schema: build_schema::<CreatePostArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: CreatePostArgs = parse_args(input)?;
        let response = service::create_post(ctx.wordpress(), args.into()).await;
        to_output(&response)
    }
}

/// `update_wordpress_post` tool.
pub struct UpdatePostTool;

#[async_trait]
impl Tool for UpdatePostTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "update_wordpress_post".into(),
            description: "Update an existing WordPress post".into(),
            input_schema: build_schema::<UpdatePostArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: UpdatePostArgs = parse_args(input)?;
        let request = UpdatePostRequest {
            title: args.title,
            content: args.content,
            status: args.status,
            seo_title: args.seo_title,
            seo_description: args.seo_description,
        };

        let response = service::update_post(ctx.wordpress(), args.post_id, request).await;
        to_output(&response)
    }
}

/// `delete_wordpress_post` tool.
pub struct DeletePostTool;

#[async_trait]
impl Tool for DeletePostTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "delete_wordpress_post".into(),
            description: "Delete a WordPress post".into(),
            input_schema: build_schema::<DeletePostArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: DeletePostArgs = parse_args(input)?;
        let response = service::delete_post(ctx.wordpress(), args.post_id, args.force).await;
        to_output(&response)
    }
}
