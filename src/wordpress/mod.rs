//! WordPress REST API collaborator.
//!
//! - `types`: the `WordPressApi` capability trait and request/response payloads
//! - `client`: reqwest implementation with Basic auth and a per-call timeout
//! - `service`: adapters that normalize every outcome into a `WordPressResponse`
//! - `config`: connection settings read from the environment
//! - `error`: upstream error taxonomy (`WordPressError`)

pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use client::WordPressClient;
pub use config::WordPressConfig;
pub use error::WordPressError;
pub use service::{CreatePostRequest, UpdatePostRequest};
pub use types::{
    NewPost, PostQuery, PostStatus, PostStatusFilter, PostUpdate, RemoteFile, SeoMeta,
    WordPressApi, WordPressResponse,
};

#[cfg(test)]
mod tests;
