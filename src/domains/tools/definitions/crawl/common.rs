//! Common utilities shared across crawl4ai tools.
//!
//! This module provides response-field extraction, result construction, and
//! schema helpers used by every tool in this group.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::Value;
use tracing::warn;

/// Ordered field-probing rule for pulling text out of a loosely-structured
/// crawl4ai response.
///
/// The response shape is not contractually fixed across endpoints or API
/// versions, so each tool declares which fields to probe, in order, and the
/// terminal fallback is always a string rendering of the whole response.
/// Extraction therefore never fails.
pub struct ExtractPolicy {
    /// Candidate fields, probed in order.
    pub fields: &'static [&'static str],

    /// Treat a present-but-empty (or null) field as a miss and keep probing.
    pub empty_is_miss: bool,
}

impl ExtractPolicy {
    /// Extract the relevant text from a response.
    pub fn extract(&self, response: &Value) -> String {
        let Some(map) = response.as_object() else {
            return stringify(response);
        };

        for field in self.fields {
            if let Some(value) = map.get(*field) {
                let text = stringify(value);
                if self.empty_is_miss && text.is_empty() {
                    continue;
                }
                return text;
            }
        }

        stringify(response)
    }
}

/// Render a JSON value as plain text.
///
/// Strings yield their contents (not a quoted literal), null yields the
/// empty string, everything else serializes compactly.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a tool input schema from a `json!` object literal.
pub fn object_schema(schema: Value) -> Arc<JsonObject> {
    match schema {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}
