use serde::{Deserialize, Serialize};
use serde_json::json;

/// MCP-compatible tool descriptor.
/// Serializes with the wire field names used by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDescriptor {
    /// Copy of this descriptor with the field-level schema erased to a bare
    /// object placeholder. This is what callers see from `tools/list`.
    pub fn advertised(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: json!({ "type": "object", "properties": {} }),
        }
    }
}
