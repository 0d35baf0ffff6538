// tests/common/mock_wordpress.rs
//! A mock WordPress site plus helpers to drive the stdio loop end to end.

use httpmock::MockServer;
use serde_json::Value;

use seo_publisher_lib::build_server;
use seo_publisher_lib::config::AppConfig;
use seo_publisher_lib::mcp::transport::serve;
use seo_publisher_lib::mcp::McpServer;
use seo_publisher_lib::wordpress::WordPressConfig;

pub const API: &str = "/wp-json/wp/v2";

/// Basic auth header for `editor` / `app-pass`.
pub const AUTH_HEADER: &str = "Basic ZWRpdG9yOmFwcC1wYXNz";

/// An httpmock server standing in for a WordPress site.
pub struct MockWordPress {
    pub http: MockServer,
}

impl MockWordPress {
    pub fn start() -> Self {
        Self {
            http: MockServer::start(),
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            wordpress: WordPressConfig {
                site_url: self.http.base_url(),
                username: "editor".to_string(),
                app_password: "app-pass".to_string(),
                timeout_ms: 2_000,
            },
            seed: Some(1234),
            canonical_base_url: "https://blog.test".to_string(),
        }
    }

    pub fn server(&self) -> McpServer {
        build_server(self.config()).expect("server should build")
    }
}

/// Feed `lines` through the transport and decode every response line.
pub async fn serve_lines(server: &McpServer, lines: &[&str]) -> Vec<Value> {
    let mut input = lines.join("\n");
    input.push('\n');
    let mut output = Vec::new();

    serve(server, input.as_bytes(), &mut output)
        .await
        .expect("transport should finish cleanly");

    String::from_utf8(output)
        .expect("output is utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is JSON"))
        .collect()
}
