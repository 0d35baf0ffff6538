use std::time::Duration;

use httpmock::Method::{DELETE, GET, POST};
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::wordpress::service::{self, CreatePostRequest, UpdatePostRequest};
use crate::wordpress::{
    PostQuery, PostStatus, PostStatusFilter, WordPressApi, WordPressClient, WordPressConfig,
    WordPressError,
};

const API: &str = "/wp-json/wp/v2";

fn client_for(server: &MockServer) -> WordPressClient {
    WordPressClient::new(WordPressConfig {
        site_url: server.base_url(),
        username: "admin".to_string(),
        app_password: "secret".to_string(),
        timeout_ms: 5_000,
    })
    .expect("client should build")
}

fn create_request(title: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: "<p>Body</p>".to_string(),
        excerpt: None,
        tags: None,
        categories: None,
        status: PostStatus::Draft,
        featured_image_url: None,
        seo_title: None,
        seo_description: None,
    }
}

#[tokio::test]
async fn list_posts_sends_query_and_basic_auth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{API}/posts"))
            .query_param("per_page", "5")
            .query_param("status", "any")
            .query_param("search", "coffee")
            .header("authorization", "Basic YWRtaW46c2VjcmV0");
        then.status(200)
            .json_body(json!([{ "id": 1, "title": { "rendered": "Hello" } }]));
    });

    let client = client_for(&server);
    let query = PostQuery {
        search: Some("coffee".to_string()),
        per_page: 5,
        status: PostStatusFilter::All,
    };
    let response = service::get_posts(&client, &query).await;

    mock.assert();
    assert!(response.success);
    assert_eq!(response.message, "Posts retrieved successfully");
    assert_eq!(response.data.unwrap()[0]["id"], 1);
}

#[tokio::test]
async fn list_posts_failure_becomes_unsuccessful_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("{API}/posts"));
        then.status(400).json_body(json!({
            "code": "rest_invalid_param",
            "message": "Invalid parameter(s): status"
        }));
    });

    let query = PostQuery {
        search: None,
        per_page: 10,
        status: PostStatusFilter::Publish,
    };
    let response = service::get_posts(&client_for(&server), &query).await;

    assert!(!response.success);
    assert_eq!(response.message, "Invalid parameter(s): status");
    assert_eq!(response.data.unwrap()["code"], "rest_invalid_param");
}

#[tokio::test]
async fn create_post_sends_yoast_meta() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("{API}/posts"))
            .body_contains("\"status\":\"draft\"")
            .body_contains("\"excerpt\":\"Short\"")
            .body_contains("\"_yoast_wpseo_title\":\"SEO Title\"")
            .body_contains("\"_yoast_wpseo_metadesc\":\"Short\"");
        then.status(201).json_body(json!({ "id": 77, "status": "draft" }));
    });

    let mut request = create_request("My Post");
    request.excerpt = Some("Short".to_string());
    request.seo_title = Some("SEO Title".to_string());

    let response = service::create_post(&client_for(&server), request).await;

    mock.assert();
    assert!(response.success);
    assert_eq!(response.message, "Post created successfully");
    assert_eq!(response.data.unwrap()["id"], 77);
}

#[tokio::test]
async fn create_post_attaches_featured_image() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path(format!("{API}/posts"));
        then.status(201).json_body(json!({ "id": 12 }));
    });
    let image = server.mock(|when, then| {
        when.method(GET).path("/images/cover.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(vec![0x89, 0x50, 0x4e, 0x47]);
    });
    let upload = server.mock(|when, then| {
        when.method(POST)
            .path(format!("{API}/media"))
            .header("content-type", "image/png")
            .header("content-disposition", "attachment; filename=\"cover.png\"");
        then.status(201).json_body(json!({ "id": 301 }));
    });
    let attach = server.mock(|when, then| {
        when.method(POST)
            .path(format!("{API}/posts/12"))
            .body_contains("\"featured_media\":301");
        then.status(200).json_body(json!({ "id": 12, "featured_media": 301 }));
    });

    let mut request = create_request("With image");
    request.featured_image_url = Some(format!("{}/images/cover.png", server.base_url()));
    let response = service::create_post(&client_for(&server), request).await;

    create.assert();
    image.assert();
    upload.assert();
    attach.assert();
    assert!(response.success);
}

#[tokio::test]
async fn featured_image_failure_does_not_fail_create() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("{API}/posts"));
        then.status(201).json_body(json!({ "id": 5 }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing.jpg");
        then.status(404);
    });
    let upload = server.mock(|when, then| {
        when.method(POST).path(format!("{API}/media"));
        then.status(201).json_body(json!({ "id": 1 }));
    });

    let mut request = create_request("Broken image");
    request.featured_image_url = Some(format!("{}/missing.jpg", server.base_url()));
    let response = service::create_post(&client_for(&server), request).await;

    assert!(response.success);
    assert_eq!(response.message, "Post created successfully");
    assert_eq!(upload.hits(), 0);
}

#[tokio::test]
async fn create_post_failure_uses_fallback_message_without_upstream_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("{API}/posts"));
        then.status(500).body("<html>oops</html>");
    });

    let response = service::create_post(&client_for(&server), create_request("x")).await;

    assert!(!response.success);
    assert_eq!(response.message, "Failed to create post");
    assert_eq!(response.data, Some(json!("<html>oops</html>")));
}

#[tokio::test]
async fn update_post_only_sends_present_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("{API}/posts/42"))
            .json_body(json!({
                "status": "publish",
                "meta": { "_yoast_wpseo_metadesc": "New description" }
            }));
        then.status(200).json_body(json!({ "id": 42, "status": "publish" }));
    });

    let request = UpdatePostRequest {
        title: Some(String::new()),
        status: Some(PostStatus::Publish),
        seo_description: Some("New description".to_string()),
        ..UpdatePostRequest::default()
    };
    let response = service::update_post(&client_for(&server), 42, request).await;

    mock.assert();
    assert!(response.success);
    assert_eq!(response.message, "Post updated successfully");
}

#[tokio::test]
async fn delete_post_reports_trash_or_permanent() {
    let server = MockServer::start();
    let trash = server.mock(|when, then| {
        when.method(DELETE)
            .path(format!("{API}/posts/42"))
            .query_param("force", "false");
        then.status(200).json_body(json!({ "id": 42, "status": "trash" }));
    });
    let permanent = server.mock(|when, then| {
        when.method(DELETE)
            .path(format!("{API}/posts/42"))
            .query_param("force", "true");
        then.status(200).json_body(json!({ "deleted": true }));
    });

    let client = client_for(&server);
    let trashed = service::delete_post(&client, 42, false).await;
    let deleted = service::delete_post(&client, 42, true).await;

    trash.assert();
    permanent.assert();
    assert_eq!(trashed.message, "Post moved to trash");
    assert_eq!(deleted.message, "Post permanently deleted");
    assert!(trashed.data.is_none());
}

#[tokio::test]
async fn delete_post_failure_extracts_upstream_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path(format!("{API}/posts/9"));
        then.status(404).json_body(json!({
            "code": "rest_post_invalid_id",
            "message": "Invalid post ID."
        }));
    });

    let response = service::delete_post(&client_for(&server), 9, true).await;

    assert!(!response.success);
    assert_eq!(response.message, "Invalid post ID.");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("{API}/posts"));
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(json!([]));
    });

    let client = WordPressClient::new(WordPressConfig {
        site_url: server.base_url(),
        timeout_ms: 50,
        ..WordPressConfig::default()
    })
    .unwrap();
    let query = PostQuery {
        search: None,
        per_page: 10,
        status: PostStatusFilter::Publish,
    };

    let error = client.list_posts(&query).await.unwrap_err();
    assert!(matches!(error, WordPressError::Timeout(_)), "got {error:?}");

    let response = service::get_posts(&client, &query).await;
    assert!(!response.success);
    assert_eq!(response.message, "Failed to fetch posts");
    assert_eq!(response.data.unwrap()["kind"], "timeout");
}
