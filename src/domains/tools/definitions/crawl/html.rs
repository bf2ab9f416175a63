//! HTML extraction tool.
//!
//! Fetches cleaned, preprocessed HTML for a page via the crawl4ai `/html`
//! endpoint, suitable for downstream schema extraction.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::core::client::CrawlClient;
use crate::domains::tools::{ToolError, ToolHandler};

use super::common::{ExtractPolicy, error_result, object_schema, success_result};

/// Parameters accepted by the `html` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlHtmlParams {
    /// Target URL to crawl.
    pub url: String,
}

/// HTML extraction tool implementation.
#[derive(Clone)]
pub struct CrawlHtmlTool {
    client: Arc<CrawlClient>,
}

impl CrawlHtmlTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "html";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get cleaned and preprocessed HTML content for further processing";

    /// Depending on version the API answers with `cleaned_html` or plain
    /// `html`; probe both before falling back to the raw response.
    const EXTRACT: ExtractPolicy = ExtractPolicy {
        fields: &["cleaned_html", "html"],
        empty_is_miss: false,
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
                        "description": "Target URL to crawl and extract HTML from"
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

    /// Request body for the `/html` endpoint.
    fn build_payload(params: &CrawlHtmlParams) -> Value {
        json!({ "url": params.url })
    }

    /// Fallible body of the tool: parse arguments, call the API, extract.
    async fn run(&self, arguments: JsonObject) -> Result<String, ToolError> {
        let params: CrawlHtmlParams = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!("Extracting HTML from {}", params.url);

        let response = self
            .client
            .call("html", &Self::build_payload(&params))
            .await?;
        let content = Self::EXTRACT.extract(&response);

        debug!("Extracted {} chars of HTML", content.len());
        Ok(content)
    }
}

#[async_trait]
impl ToolHandler for CrawlHtmlTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> CallToolResult {
        match self.run(arguments).await {
            Ok(content) => success_result(content),
            Err(e) => error_result(&format!("Error extracting HTML: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CrawlerConfig;
    use rmcp::model::RawContent;

    fn tool_for(base_url: &str) -> CrawlHtmlTool {
        let config = CrawlerConfig {
            base_url: base_url.to_string(),
            api_token: None,
            timeout_secs: 5,
        };
        CrawlHtmlTool::new(Arc::new(CrawlClient::new(&config).unwrap()))
    }

    fn result_text(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_schema_shape() {
        let tool = CrawlHtmlTool::to_tool();
        assert_eq!(tool.name, "html");

        let schema = tool.input_schema;
        assert_eq!(schema.get("required"), Some(&json!(["url"])));
        let properties = schema.get("properties").and_then(|p| p.as_object()).unwrap();
        assert_eq!(properties.len(), 1);
        assert!(properties.contains_key("url"));
    }

    #[test]
    fn test_build_payload() {
        let params = CrawlHtmlParams {
            url: "http://example.com".to_string(),
        };
        assert_eq!(
            CrawlHtmlTool::build_payload(&params),
            json!({"url": "http://example.com"})
        );
    }

    #[tokio::test]
    async fn test_missing_url_yields_error_result() {
        // Argument parsing fails before any network I/O happens.
        let tool = tool_for("http://127.0.0.1:1");
        let result = tool.call(JsonObject::new()).await;

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("Error extracting HTML:"), "got: {}", text);
        assert!(text.contains("url"));
    }

    #[tokio::test]
    async fn test_extra_keys_ignored() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/html")
            .match_body(mockito::Matcher::Json(json!({"url": "http://x"})))
            .with_status(200)
            .with_body(r#"{"cleaned_html": "<p>x</p>"}"#)
            .create_async()
            .await;

        let tool = tool_for(&server.url());
        let result = tool
            .call(args(json!({"url": "http://x", "unexpected": true})))
            .await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "<p>x</p>");
    }

    #[tokio::test]
    async fn test_prefers_cleaned_html() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/html")
            .with_status(200)
            .with_body(r#"{"cleaned_html": "<p>x</p>", "html": "<p>full</p>"}"#)
            .create_async()
            .await;

        let tool = tool_for(&server.url());
        let result = tool.call(args(json!({"url": "http://x"}))).await;
        assert_eq!(result_text(&result), "<p>x</p>");
    }

    #[tokio::test]
    async fn test_falls_back_to_html_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/html")
            .with_status(200)
            .with_body(r#"{"html": "<p>y</p>"}"#)
            .create_async()
            .await;

        let tool = tool_for(&server.url());
        let result = tool.call(args(json!({"url": "http://x"}))).await;
        assert_eq!(result_text(&result), "<p>y</p>");
    }

    #[tokio::test]
    async fn test_api_error_surfaces_in_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/html")
            .with_status(500)
            .with_body("crawler exploded")
            .create_async()
            .await;

        let tool = tool_for(&server.url());
        let result = tool.call(args(json!({"url": "http://x"}))).await;

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("Error extracting HTML:"), "got: {}", text);
        assert!(text.contains("500"));
        assert!(text.contains("crawler exploded"));
    }
}
