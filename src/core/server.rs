//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating `tools/list` and `tools/call` to the tool
//! registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered explicitly in `domains/tools/registry.rs`. Adding a new
//! tool does not require modifying this file.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use tracing::{info, instrument};

use super::client::CrawlClient;
use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_registry};

/// The main MCP server handler.
///
/// Implements the `ServerHandler` trait from rmcp and dispatches tool
/// requests to the registry. Cloning is cheap: configuration, client, and
/// registry are shared behind `Arc`s, and the registry is read-only after
/// construction so concurrent calls need no locking.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of all tools this server exposes.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Builds the shared crawl4ai client and registers every tool. Fails if
    /// the HTTP client cannot be constructed or a tool name collides.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);

        let client = Arc::new(CrawlClient::new(&config.crawler)?);
        let registry = Arc::new(build_registry(client)?);

        Ok(Self { config, registry })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "MCP server for the crawl4ai web extraction API. Use the 'md' tool to \
                 convert a page to clean markdown (optionally filtered) and the 'html' \
                 tool to fetch preprocessed HTML for structured extraction."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        self.registry
            .call_tool(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_construction() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "crawl4ai-mcp-server");
        assert_eq!(server.tool_count(), 2);
    }

    #[test]
    fn test_get_info_advertises_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
