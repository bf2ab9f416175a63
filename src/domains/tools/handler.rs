//! The contract every tool implements.
//!
//! The registry and the MCP server treat all tools polymorphically through
//! this trait: metadata for `tools/list`, invocation for `tools/call`.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

/// A named, independently invocable capability with a declared input schema.
///
/// Implementations must be cheap to share (`Send + Sync`); concurrent calls
/// on the same handler are expected.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool metadata advertised to clients.
    ///
    /// Pure and stable: the same name, description, and input schema must be
    /// returned on every call.
    fn tool(&self) -> Tool;

    /// Invoke the tool with caller-supplied arguments.
    ///
    /// This is a total operation from the caller's perspective: every
    /// internal failure (missing argument, API failure, malformed remote
    /// response) is converted into an error-flagged text result, so the
    /// protocol layer always receives a well-formed `CallToolResult`.
    ///
    /// Handlers read only the keys their schema declares; extra keys are
    /// ignored.
    async fn call(&self, arguments: JsonObject) -> CallToolResult;
}
