//! crawl4ai MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes the
//! crawl4ai content-extraction API as a set of named tools.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the crawl4ai API client, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the tool handler contract, the registry, and one handler
//!     per crawl4ai endpoint
//!
//! # Example
//!
//! ```rust,no_run
//! use crawl4ai_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
