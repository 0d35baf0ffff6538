//! In-memory WordPress double shared by unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tools::ToolContext;
use crate::wordpress::{
    NewPost, PostQuery, PostUpdate, RemoteFile, WordPressApi, WordPressError,
};

/// A call the stub received.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    List(PostQuery),
    Create(NewPost),
    Update(u64, PostUpdate),
    Delete(u64, bool),
}

/// Succeeds with canned payloads unless `fail_with` is set.
#[derive(Default)]
pub struct StubWordPress {
    calls: Mutex<Vec<Recorded>>,
    fail_with: Mutex<Option<(u16, Value)>>,
}

impl StubWordPress {
    pub fn failing(status: u16, body: Value) -> Self {
        let stub = Self::default();
        *stub.fail_with.lock().unwrap() = Some((status, body));
        stub
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Recorded) -> Result<(), WordPressError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some((status, body)) => Err(WordPressError::Api { status, body }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WordPressApi for StubWordPress {
    async fn list_posts(&self, query: &PostQuery) -> Result<Value, WordPressError> {
        self.record(Recorded::List(query.clone()))?;
        Ok(json!([{ "id": 1, "title": { "rendered": "Hello world" } }]))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Value, WordPressError> {
        self.record(Recorded::Create(post.clone()))?;
        Ok(json!({ "id": 100, "title": { "raw": post.title } }))
    }

    async fn update_post(&self, post_id: u64, update: &PostUpdate) -> Result<Value, WordPressError> {
        self.record(Recorded::Update(post_id, update.clone()))?;
        Ok(json!({ "id": post_id }))
    }

    async fn delete_post(&self, post_id: u64, force: bool) -> Result<Value, WordPressError> {
        self.record(Recorded::Delete(post_id, force))?;
        Ok(json!({ "deleted": force }))
    }

    async fn fetch_remote_file(&self, url: &str) -> Result<RemoteFile, WordPressError> {
        Err(WordPressError::Request(format!("no network in tests: {url}")))
    }

    async fn upload_media(&self, _file: &RemoteFile) -> Result<Value, WordPressError> {
        Err(WordPressError::Request("no network in tests".into()))
    }
}

/// Seeded context over `stub`.
pub fn context_with(stub: Arc<StubWordPress>) -> ToolContext {
    ToolContext::new(stub, Some(7), "https://example.com")
}
