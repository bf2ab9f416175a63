//! Markdown conversion tool.
//!
//! Converts a page to clean markdown via the crawl4ai `/md` endpoint, with
//! optional content-filtering strategies (raw, fit, bm25, llm).

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::core::client::CrawlClient;
use crate::domains::tools::{ToolError, ToolHandler};

use super::common::{ExtractPolicy, error_result, object_schema, success_result};

/// Parameters accepted by the `md` tool.
///
/// Every field except `url` is optional and deliberately NOT defaulted here:
/// absent keys stay absent in the outbound payload, so the defaults declared
/// in the schema are applied by the crawl4ai service itself rather than
/// duplicated in this handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlMarkdownParams {
    /// Target URL to crawl.
    pub url: String,

    /// Content filter strategy: raw, fit, bm25, or llm.
    pub f: Option<String>,

    /// Query string, used by the bm25/llm strategies.
    pub q: Option<String>,

    /// Cache-bust counter.
    pub c: Option<String>,

    /// LLM provider override for the llm strategy.
    pub provider: Option<String>,
}

/// Markdown conversion tool implementation.
#[derive(Clone)]
pub struct CrawlMarkdownTool {
    client: Arc<CrawlClient>,
}

impl CrawlMarkdownTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "md";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Convert webpage to clean markdown format with content filtering options";

    /// `/md` answers with a `markdown` field; an empty or null value means
    /// the conversion produced nothing useful, so fall back to the raw
    /// response for diagnosis.
    const EXTRACT: ExtractPolicy = ExtractPolicy {
        fields: &["markdown"],
        empty_is_miss: true,
    };

    pub fn new(client: Arc<CrawlClient>) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: object_schema(json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Target URL to crawl and convert to markdown"
                    },
                    "c": {
                        "type": "string",
                        "default": "0",
                        "description": "Cache-bust counter for forcing fresh content"
                    },
                    "f": {
                        "type": "string",
                        "default": "fit",
                        "enum": ["raw", "fit", "bm25", "llm"],
                        "description": "Content filter strategy: raw, fit, bm25, or llm"
                    },
                    "q": {
                        "type": "string",
                        "description": "Query string for BM25/LLM content filtering"
                    },
                    "provider": {
                        "type": "string",
                        "description": "LLM provider override (e.g., 'anthropic/claude-3-opus')"
                    }
                },
                "required": ["url"]
            })),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Request body for the `/md` endpoint.
    ///
    /// Optional filter parameters are passed through only when the caller
    /// supplied them.
    fn build_payload(params: &CrawlMarkdownParams) -> Value {
        let mut payload = Map::new();
        payload.insert("url".to_string(), Value::String(params.url.clone()));

        let optional = [
            ("f", &params.f),
            ("q", &params.q),
            ("c", &params.c),
            ("provider", &params.provider),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                payload.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        Value::Object(payload)
    }

    /// Fallible body of the tool: parse arguments, call the API, extract.
    async fn run(&self, arguments: JsonObject) -> Result<String, ToolError> {
        let params: CrawlMarkdownParams = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!(
            "Converting {} to markdown (filter: {})",
            params.url,
            params.f.as_deref().unwrap_or("service default")
        );

        let response = self
            .client
            .call("md", &Self::build_payload(&params))
            .await?;
        let content = Self::EXTRACT.extract(&response);

        debug!("Converted to {} chars of markdown", content.len());
        Ok(content)
    }
}

#[async_trait]
impl ToolHandler for CrawlMarkdownTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> CallToolResult {
        match self.run(arguments).await {
            Ok(content) => success_result(content),
            Err(e) => error_result(&format!("Error converting to markdown: {}", e)),
        }
    }
}
