//! HTTP client for the crawl4ai API.
//!
//! Single chokepoint for reaching the remote crawl4ai service. Every tool
//! call goes through [`CrawlClient::call`], which performs exactly one
//! `POST {base}/{endpoint}` round trip with a JSON body and returns the
//! parsed response. No retries, no caching.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use super::config::CrawlerConfig;

/// How much of an error response body to keep in error messages.
const ERROR_BODY_LIMIT: usize = 300;

/// Errors from the crawl4ai API client.
///
/// All variants are recoverable from the caller's perspective: a failing API
/// call surfaces as an error value, never as a panic.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or completed (connect failure, timeout).
    #[error("request to /{endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status code.
    #[error("/{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON from /{endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the crawl4ai REST API.
///
/// Wraps a [`reqwest::Client`] (internally reference-counted, cheap to clone
/// and safe to share across concurrent tool invocations) together with the
/// configured base URL and optional bearer token.
#[derive(Debug, Clone)]
pub struct CrawlClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl CrawlClient {
    /// Create a client from the crawler configuration.
    ///
    /// The configured timeout applies to every request, bounding how long a
    /// single hung crawl can occupy a tool call.
    pub fn new(config: &CrawlerConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("crawl4ai-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `payload` to `{base}/{endpoint}` and return the parsed JSON body.
    ///
    /// Fails on network errors, non-success status codes, and bodies that are
    /// not JSON. The response shape is not validated beyond being JSON; the
    /// calling tool owns field extraction.
    #[instrument(skip(self, payload))]
    pub async fn call(&self, endpoint: &str, payload: &Value) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let mut request = self.http.post(&url).json(payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ClientError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        response.json().await.map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// Bound the error body so a huge HTML error page does not flood results.
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_LIMIT {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_for(server_url: &str, token: Option<&str>) -> CrawlClient {
        let config = CrawlerConfig {
            base_url: server_url.to_string(),
            api_token: token.map(|t| t.to_string()),
            timeout_secs: 5,
        };
        CrawlClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = client_for("http://localhost:11235/", None);
        assert_eq!(client.base_url(), "http://localhost:11235");
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(ERROR_BODY_LIMIT + 50);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), ERROR_BODY_LIMIT + 3);
    }

    #[tokio::test]
    async fn test_call_returns_parsed_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/md")
            .match_body(mockito::Matcher::Json(json!({"url": "http://example.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"markdown": "# Title"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let result = client
            .call("md", &json!({"url": "http://example.com"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"markdown": "# Title"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/html")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("test-token"));
        client.call("html", &json!({"url": "http://x"})).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/html")
            .with_status(500)
            .with_body("internal failure")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .call("html", &json!({"url": "http://x"}))
            .await
            .unwrap_err();

        match &err {
            ClientError::Status { status, body, .. } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "internal failure");
            }
            other => panic!("expected Status error, got {:?}", other),
        }
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal failure"));
    }

    #[tokio::test]
    async fn test_call_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/md")
            .with_status(200)
            .with_body("this is not json")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .call("md", &json!({"url": "http://x"}))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_call_connection_refused() {
        // Port 1 is essentially never listening on loopback.
        let client = client_for("http://127.0.0.1:1", None);
        let err = client
            .call("html", &json!({"url": "http://x"}))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Request { .. }));
    }
}
