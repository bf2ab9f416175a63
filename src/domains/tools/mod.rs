//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Each tool wraps one crawl4ai API endpoint and is invoked by MCP clients
//! through the registry.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handler.rs` - The contract every tool implements
//! - `registry.rs` - Central tool registry and dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/crawl/` (e.g., `my_tool.rs`)
//! 2. Define a params struct, a payload builder, and an `ExtractPolicy`
//! 3. Implement `ToolHandler` for the tool
//! 4. Register it in `registry::build_registry`

pub mod definitions;
mod error;
mod handler;
mod registry;

pub use error::ToolError;
pub use handler::ToolHandler;
pub use registry::{ToolRegistry, build_registry};
