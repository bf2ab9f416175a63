//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once at server construction by [`build_registry`]
//! and read-only afterwards: registration order is explicit and duplicate
//! names are rejected rather than silently shadowed.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, warn};

use crate::core::client::CrawlClient;

use super::definitions::{CrawlHtmlTool, CrawlMarkdownTool};
use super::error::ToolError;
use super::handler::ToolHandler;

/// Tool registry - maps tool name to handler instance.
///
/// This struct provides a central point for:
/// - Listing all available tools (capability advertisement)
/// - Looking up a handler by name and dispatching a call to it
#[derive(Default)]
pub struct ToolRegistry {
    /// Handlers in registration order, so `list()` is deterministic.
    handlers: Vec<Arc<dyn ToolHandler>>,

    /// Name -> position in `handlers`.
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under the name its metadata declares.
    ///
    /// Fails with [`ToolError::Duplicate`] if a handler with the same name
    /// is already present.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = handler.tool().name.to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::duplicate(name));
        }

        debug!("Registered tool: {}", name);
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All tool metadata, in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.tool()).collect()
    }

    /// Look up a handler by tool name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    /// Dispatch a call to the named tool.
    ///
    /// An unknown name is a reportable error; a known tool always produces a
    /// result (its handler converts internal failures into error results).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(handler) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        Ok(handler.call(arguments).await)
    }
}

/// Build the registry with every tool the server exposes.
///
/// Handlers share one [`CrawlClient`]; registration order here is the order
/// clients see in `tools/list`.
pub fn build_registry(client: Arc<CrawlClient>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CrawlHtmlTool::new(client.clone())))?;
    registry.register(Arc::new(CrawlMarkdownTool::new(client)))?;
    Ok(registry)
}
