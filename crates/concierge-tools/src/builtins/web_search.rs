//! Web search tool: SerpAPI Google results
//!
//! One GET per invocation, no retries. Every outcome, including a missing API
//! key or a failed request, is rendered as text for the model.

use crate::error::{Error, Result};
use crate::registry::{Capability, CapabilityCategory, CapabilityDescriptor};
use concierge_llm::util::mask_api_key;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Maximum number of results rendered into the digest
pub const MAX_RESULTS: usize = 3;

/// Default SerpAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/search";

/// Default search engine selector
pub const DEFAULT_ENGINE: &str = "google";

/// HTTP timeout for the search request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Returned when no API key is configured
pub const UNAVAILABLE_MESSAGE: &str =
    "Web search is not available. Please add SERPAPI_API_KEY to your .env file.";

/// Search backend configuration
#[derive(Clone)]
pub struct SearchConfig {
    /// SerpAPI key; `None` disables search
    pub api_key: Option<String>,
    /// Endpoint URL
    pub base_url: String,
    /// Engine selector (`engine` query parameter)
    pub engine: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .field("base_url", &self.base_url)
            .field("engine", &self.engine)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchConfig {
    /// Create a configuration with the given key
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Read the key from `SERPAPI_API_KEY`
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("SERPAPI_API_KEY").ok())
    }

    /// Set the endpoint URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the engine selector
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a key is present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// A single search result entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result snippet
    pub snippet: String,
}

/// Outcome of one search, before it is rendered for the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Up to `MAX_RESULTS` organic results, in backend order
    Results {
        /// Original query
        query: String,
        /// Results
        results: Vec<SearchResult>,
    },
    /// No API key configured
    Unavailable,
    /// Backend answered without organic results
    NoResults {
        /// Original query
        query: String,
    },
    /// Request or response handling failed
    TransportError(String),
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl SearchOutcome {
    /// Interpret a backend JSON body
    #[must_use]
    pub fn from_body(query: &str, body: &str) -> Self {
        let response: SerpApiResponse = match serde_json::from_str(body) {
            Ok(r) => r,
            Err(e) => return Self::TransportError(format!("invalid response: {e}")),
        };

        let results: Vec<SearchResult> = response
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RESULTS)
            .map(|r| SearchResult {
                title: r.title.unwrap_or_default(),
                snippet: r.snippet.unwrap_or_default(),
            })
            .collect();

        if results.is_empty() {
            Self::NoResults {
                query: query.to_string(),
            }
        } else {
            Self::Results {
                query: query.to_string(),
                results,
            }
        }
    }

    /// Render as the digest handed to the model
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Results { query, results } => {
                let blocks: Vec<String> = results
                    .iter()
                    .map(|r| format!("Title: {}\nSnippet: {}", r.title, r.snippet))
                    .collect();
                format!("Search results for '{}':\n\n{}", query, blocks.join("\n\n"))
            }
            Self::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
            Self::NoResults { query } => format!("No search results found for '{}'.", query),
            Self::TransportError(detail) => format!("Error performing web search: {}", detail),
        }
    }
}

/// SerpAPI-backed web search capability
pub struct WebSearchTool {
    descriptor: CapabilityDescriptor,
    client: reqwest::Client,
    config: SearchConfig,
}

impl WebSearchTool {
    /// Create a new web search tool
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        let descriptor = CapabilityDescriptor::new(
            "web_search",
            "Search the web for current information. Use this for current weather, \
             prices, recent events, newly opened places and other up-to-date facts.",
            CapabilityCategory::Search,
        )
        .with_input("query", "Search query string");

        Ok(Self {
            descriptor,
            client,
            config,
        })
    }

    /// Run one search
    #[instrument(skip(self), fields(engine = %self.config.engine))]
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("Search requested without SERPAPI_API_KEY");
            return SearchOutcome::Unavailable;
        };

        let start = Instant::now();
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", query),
                ("api_key", api_key),
                ("engine", self.config.engine.as_str()),
                ("num", "3"),
            ])
            .send()
            .await;

        let outcome = match response {
            Ok(resp) => {
                let status = resp.status();
                match resp.text().await {
                    Ok(body) if status.is_success() => SearchOutcome::from_body(query, &body),
                    Ok(body) => SearchOutcome::TransportError(format!(
                        "HTTP {}: {}",
                        status,
                        backend_error(&body)
                    )),
                    Err(e) => SearchOutcome::TransportError(e.without_url().to_string()),
                }
            }
            // reqwest embeds the full URL, including the key, in its errors
            Err(e) => SearchOutcome::TransportError(e.without_url().to_string()),
        };

        match &outcome {
            SearchOutcome::TransportError(detail) => {
                warn!(error = %detail, "Web search failed");
            }
            other => {
                debug!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    found = matches!(other, SearchOutcome::Results { .. }),
                    "Web search completed"
                );
            }
        }

        outcome
    }
}

/// Extract SerpAPI's `error` field from a failure body
fn backend_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| concierge_llm::util::truncate_safe(body, 200).to_string())
}

#[async_trait::async_trait]
impl Capability for WebSearchTool {
    fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, input: &str) -> String {
        self.search(input).await.render()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn organic(n: usize) -> String {
        let results: Vec<serde_json::Value> = (1..=n)
            .map(|i| serde_json::json!({"title": format!("T{i}"), "snippet": format!("S{i}")}))
            .collect();
        serde_json::json!({ "organic_results": results }).to_string()
    }

    #[test]
    fn test_first_three_results_in_order() {
        let outcome = SearchOutcome::from_body("cubbon park", &organic(5));
        let digest = outcome.render();
        assert_eq!(
            digest,
            "Search results for 'cubbon park':\n\n\
             Title: T1\nSnippet: S1\n\n\
             Title: T2\nSnippet: S2\n\n\
             Title: T3\nSnippet: S3"
        );
        assert!(!digest.contains("T4"));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let body = r#"{"organic_results": [{"title": "Only title"}, {"snippet": null}]}"#;
        let outcome = SearchOutcome::from_body("q", body);
        assert_eq!(
            outcome,
            SearchOutcome::Results {
                query: "q".to_string(),
                results: vec![
                    SearchResult {
                        title: "Only title".to_string(),
                        snippet: String::new()
                    },
                    SearchResult {
                        title: String::new(),
                        snippet: String::new()
                    },
                ],
            }
        );
    }

    #[test]
    fn test_no_results() {
        for body in [r#"{"organic_results": []}"#, r#"{"search_metadata": {}}"#] {
            let outcome = SearchOutcome::from_body("rooftop bars", body);
            assert_eq!(
                outcome.render(),
                "No search results found for 'rooftop bars'."
            );
        }
    }

    #[test]
    fn test_invalid_body_is_transport_error() {
        let outcome = SearchOutcome::from_body("q", "<html>oops</html>");
        assert!(matches!(outcome, SearchOutcome::TransportError(_)));
        assert!(outcome
            .render()
            .starts_with("Error performing web search: "));
    }

    #[test]
    fn test_backend_error_field() {
        assert_eq!(backend_error(r#"{"error": "Invalid API key."}"#), "Invalid API key.");
        assert_eq!(backend_error("plain failure"), "plain failure");
    }

    #[test]
    fn test_descriptor() {
        let tool = WebSearchTool::new(SearchConfig::default()).unwrap();
        let def = tool.descriptor();
        assert_eq!(def.name, "web_search");
        assert_eq!(def.category, CapabilityCategory::Search);
        assert_eq!(def.input_name, "query");
    }

    #[test]
    fn test_config_ignores_blank_key_and_masks_debug() {
        assert!(!SearchConfig::new(Some("  ".to_string())).is_configured());

        let config = SearchConfig::new(Some("serp-1234567890abcdef".to_string()));
        assert!(config.is_configured());
        assert!(!format!("{:?}", config).contains("1234567890"));
    }

    #[tokio::test]
    async fn test_unavailable_without_key() {
        let tool = WebSearchTool::new(SearchConfig::new(None)).unwrap();
        for query in ["", "weather in Bangalore", "'; DROP TABLE"] {
            assert_eq!(tool.invoke(query).await, UNAVAILABLE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_rendered() {
        let config = SearchConfig::new(Some("serp-test-key-0000".to_string()))
            .with_base_url("not a url")
            .with_timeout(Duration::from_secs(2));
        let tool = WebSearchTool::new(config).unwrap();

        let outcome = tool.search("").await;
        assert!(matches!(outcome, SearchOutcome::TransportError(_)));

        let text = tool.invoke("anything").await;
        assert!(text.starts_with("Error performing web search: "));
        assert!(!text.contains("serp-test-key-0000"));
    }

    /// Serve one canned HTTP reply on a local port; yields the request line
    async fn serve_once(
        status: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}/search"), handle)
    }

    fn local_tool(base_url: String) -> WebSearchTool {
        let config = SearchConfig::new(Some("serp-local-key-1234".to_string()))
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        WebSearchTool::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_success_reply_is_rendered() {
        let (url, server) = serve_once("200 OK", organic(4)).await;
        let tool = local_tool(url);

        let text = tool.invoke("lalbagh flower show").await;
        assert_eq!(
            text,
            "Search results for 'lalbagh flower show':\n\n\
             Title: T1\nSnippet: S1\n\n\
             Title: T2\nSnippet: S2\n\n\
             Title: T3\nSnippet: S3"
        );

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /search?"));
        assert!(request_line.contains("q=lalbagh+flower+show"));
        assert!(request_line.contains("engine=google"));
        assert!(request_line.contains("num=3"));
    }

    #[tokio::test]
    async fn test_error_status_carries_backend_message() {
        let body = r#"{"error": "Invalid API key."}"#.to_string();
        let (url, server) = serve_once("401 Unauthorized", body).await;
        let tool = local_tool(url);

        let outcome = tool.search("metro timings").await;
        assert_eq!(
            outcome,
            SearchOutcome::TransportError("HTTP 401 Unauthorized: Invalid API key.".to_string())
        );
        assert_eq!(
            outcome.render(),
            "Error performing web search: HTTP 401 Unauthorized: Invalid API key."
        );
        server.await.unwrap();
    }
}
