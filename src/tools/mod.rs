//! Tool registry and implementations.
//!
//! This module provides:
//! - Tool registry for discovery by name, in registration order
//! - SEO tools: keyword analysis, content writing, meta tag optimization
//! - WordPress tools: list, create, update and delete posts
//!
//! # Tool Lifecycle
//!
//! 1. The dispatcher resolves the tool by name
//! 2. Raw JSON arguments are parsed into the tool's typed argument struct
//! 3. The tool runs against the shared `ToolContext`
//! 4. The result is serialized back to JSON
//!
//! # Module Structure
//!
//! - `types`: Core types (Tool trait, ToolCallInput, ToolContext, ToolError)
//! - `registry`: ToolRegistry for managing and invoking tools
//! - `seo`: `analyze_keywords`
//! - `content`: `write_content`
//! - `meta`: `optimize_meta_tags`
//! - `wordpress`: `*_wordpress_post(s)` adapters
//!
//! # Adding New Tools
//!
//! 1. Define a `Deserialize + JsonSchema` argument struct
//! 2. Implement `Tool` in the appropriate submodule
//! 3. Register in `ToolRegistry::with_defaults` (in `registry.rs`)

pub use registry::ToolRegistry;
pub use types::{Tool, ToolCallInput, ToolContext, ToolError};

pub mod content;
pub mod meta;
mod registry;
pub mod seo;
mod types;
pub mod wordpress;
