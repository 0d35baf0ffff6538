//! Tool registry for tool discovery and invocation.
//!
//! The ToolRegistry owns every tool the server exposes. Tools are listed in
//! registration order and looked up by name.

use std::collections::HashMap;

use crate::core::tool::ToolDescriptor;
use crate::tools::content::WriteContentTool;
use crate::tools::meta::OptimizeMetaTagsTool;
use crate::tools::seo::AnalyzeKeywordsTool;
use crate::tools::types::{Tool, ToolCallInput, ToolContext, ToolError};
use crate::tools::wordpress::{CreatePostTool, DeletePostTool, GetPostsTool, UpdatePostTool};

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a registry with all built-in tools registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // SEO tools
        registry.register(Box::new(AnalyzeKeywordsTool));
        registry.register(Box::new(WriteContentTool));
        registry.register(Box::new(OptimizeMetaTagsTool));

        // WordPress tools
        registry.register(Box::new(GetPostsTool));
        registry.register(Box::new(CreatePostTool));
        registry.register(Box::new(UpdatePostTool));
        registry.register(Box::new(DeletePostTool));

        registry
    }

    /// Add a tool. A tool registered under an existing name replaces the
    /// earlier one in place.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.descriptor().name;
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Descriptors for every tool, in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&slot| self.tools[slot].as_ref())
    }

    /// Invoke a tool by name with the given arguments.
    pub async fn invoke(
        &self,
        ctx: &ToolContext,
        call: ToolCallInput,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .lookup(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;
        tool.invoke(ctx, call.args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
