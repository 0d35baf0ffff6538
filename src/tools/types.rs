//! Shared types and traits for the tool system.
//!
//! This module defines the core abstractions for tools:
//! - Tool input type and the `Tool` trait
//! - The per-process `ToolContext` handed to every invocation
//! - Error types for tool execution
//! - Argument parsing against each tool's typed schema

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::tool::ToolDescriptor;
use crate::wordpress::WordPressApi;

/// Input to a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallInput {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Errors that can occur during tool execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Everything a tool may touch besides its own arguments.
///
/// Built once at startup and shared by every request. The random source is
/// injectable so runs can be reproduced with a fixed seed.
pub struct ToolContext {
    wordpress: Arc<dyn WordPressApi>,
    rng: Mutex<StdRng>,
    canonical_base_url: String,
}

impl ToolContext {
    pub fn new(
        wordpress: Arc<dyn WordPressApi>,
        seed: Option<u64>,
        canonical_base_url: impl Into<String>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            wordpress,
            rng: Mutex::new(rng),
            canonical_base_url: canonical_base_url.into(),
        }
    }

    pub fn wordpress(&self) -> &dyn WordPressApi {
        self.wordpress.as_ref()
    }

    pub fn canonical_base_url(&self) -> &str {
        &self.canonical_base_url
    }

    /// Run `f` with exclusive access to the shared random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }
}

/// Trait for implementing tools.
///
/// Tools are stored as trait objects in the registry and must be
/// Send + Sync so the registry can be shared across tasks.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the descriptor for this tool, including name, description,
    /// and JSON schema for inputs.
    fn descriptor(&self) -> ToolDescriptor;

    /// Invokes the tool with raw JSON arguments. Implementations parse the
    /// arguments with [`parse_args`] before doing any work.
    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError>;
}

/// JSON schema for an argument struct.
pub fn build_schema<T: JsonSchema>() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or(serde_json::Value::Null)
}

/// Deserialize tool arguments into their typed form. Absent arguments are
/// treated as an empty object so defaults still apply.
pub fn parse_args<T: DeserializeOwned>(input: serde_json::Value) -> Result<T, ToolError> {
    let input = match input {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))
}

/// Deserialize a count or id that callers may send as a JSON float.
///
/// Integral floats such as `400.0` are accepted; fractional, negative and
/// out-of-range numbers are rejected.
pub fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n < u64::MAX as f64)
            .map(|n| n as u64)
    });
    whole
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a whole number in range, got {value}")))
}

/// Serialize a tool result.
pub fn to_output<T: Serialize>(value: &T) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::Execution(format!("failed to serialize result: {e}")))
}

/// Reject empty keyword lists and blank keywords; every SEO tool keys off
/// the first keyword.
pub fn require_keywords(keywords: &[String]) -> Result<(), ToolError> {
    if keywords.is_empty() {
        return Err(ToolError::InvalidInput(
            "keywords must contain at least one keyword".into(),
        ));
    }
    if let Some(index) = keywords.iter().position(|k| k.trim().is_empty()) {
        return Err(ToolError::InvalidInput(format!(
            "keywords[{index}] must not be blank"
        )));
    }
    Ok(())
}
