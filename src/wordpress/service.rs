//! Adapter layer between the tools and the WordPress collaborator.
//!
//! Every function here resolves to a [`WordPressResponse`]. Upstream
//! failures are logged and reported as `success: false`; they never escape
//! as errors.

use serde_json::Value;

use crate::wordpress::error::WordPressError;
use crate::wordpress::types::{
    NewPost, PostQuery, PostStatus, PostUpdate, SeoMeta, WordPressApi, WordPressResponse,
};

/// Fields accepted when creating a post.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub status: PostStatus,
    pub featured_image_url: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// Fields accepted when updating a post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

pub async fn get_posts(api: &dyn WordPressApi, query: &PostQuery) -> WordPressResponse {
    match api.list_posts(query).await {
        Ok(posts) => WordPressResponse::ok("Posts retrieved successfully", Some(posts)),
        Err(error) => failure("fetching posts", "Failed to fetch posts", &error),
    }
}

pub async fn create_post(api: &dyn WordPressApi, request: CreatePostRequest) -> WordPressResponse {
    let post = build_new_post(&request);

    let created = match api.create_post(&post).await {
        Ok(created) => created,
        Err(error) => return failure("creating post", "Failed to create post", &error),
    };

    if let Some(image_url) = request.featured_image_url.as_deref().filter(|u| !u.is_empty()) {
        match created.get("id").and_then(Value::as_u64) {
            Some(post_id) => {
                if let Err(error) = set_featured_image(api, post_id, image_url).await {
                    tracing::warn!("failed to set featured image for post {post_id}: {error}");
                }
            }
            None => tracing::warn!("created post has no numeric id; skipping featured image"),
        }
    }

    WordPressResponse::ok("Post created successfully", Some(created))
}

pub async fn update_post(
    api: &dyn WordPressApi,
    post_id: u64,
    request: UpdatePostRequest,
) -> WordPressResponse {
    let update = build_post_update(request);

    match api.update_post(post_id, &update).await {
        Ok(updated) => WordPressResponse::ok("Post updated successfully", Some(updated)),
        Err(error) => failure("updating post", "Failed to update post", &error),
    }
}

pub async fn delete_post(api: &dyn WordPressApi, post_id: u64, force: bool) -> WordPressResponse {
    match api.delete_post(post_id, force).await {
        Ok(_) => {
            let message = if force {
                "Post permanently deleted"
            } else {
                "Post moved to trash"
            };
            WordPressResponse::ok(message, None)
        }
        Err(error) => failure("deleting post", "Failed to delete post", &error),
    }
}

/// Download the image, upload it to the media library and attach it to the post.
async fn set_featured_image(
    api: &dyn WordPressApi,
    post_id: u64,
    image_url: &str,
) -> Result<(), WordPressError> {
    let file = api.fetch_remote_file(image_url).await?;
    let media = api.upload_media(&file).await?;
    let media_id = media.get("id").and_then(Value::as_u64).ok_or_else(|| {
        WordPressError::InvalidResponse("media upload response missing numeric 'id'".to_string())
    })?;

    let update = PostUpdate {
        featured_media: Some(media_id),
        ..PostUpdate::default()
    };
    api.update_post(post_id, &update).await?;
    Ok(())
}

fn build_new_post(request: &CreatePostRequest) -> NewPost {
    let meta = if has_text(&request.seo_title) || has_text(&request.seo_description) {
        Some(SeoMeta {
            title: Some(
                first_non_empty(&[request.seo_title.as_deref(), Some(request.title.as_str())])
                    .unwrap_or_default(),
            ),
            description: Some(
                first_non_empty(&[
                    request.seo_description.as_deref(),
                    request.excerpt.as_deref(),
                ])
                .unwrap_or_default(),
            ),
        })
    } else {
        None
    };

    NewPost {
        title: request.title.clone(),
        content: request.content.clone(),
        status: request.status,
        excerpt: request.excerpt.clone().unwrap_or_default(),
        categories: request.categories.clone().filter(|c| !c.is_empty()),
        tags: request.tags.clone().filter(|t| !t.is_empty()),
        meta,
    }
}

fn build_post_update(request: UpdatePostRequest) -> PostUpdate {
    let meta = if has_text(&request.seo_title) || has_text(&request.seo_description) {
        Some(SeoMeta {
            title: request.seo_title,
            description: request.seo_description,
        })
    } else {
        None
    };

    PostUpdate {
        title: request.title.filter(|t| !t.is_empty()),
        content: request.content.filter(|c| !c.is_empty()),
        status: request.status,
        featured_media: None,
        meta,
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn first_non_empty(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(|value| value.to_string())
}

fn failure(action: &str, fallback: &str, error: &WordPressError) -> WordPressResponse {
    tracing::warn!("error {action}: {error}");
    let message = error.upstream_message().unwrap_or(fallback);
    WordPressResponse::failed(message, Some(error.detail()))
}
