//! Web search via the Serper API.
//!
//! Thin client over https://google.serper.dev supporting the search, news,
//! images, and places endpoints.

use crate::error::{MdanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

const SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Serper endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Search,
    News,
    Images,
    Places,
}

impl SearchKind {
    fn path(&self) -> &'static str {
        match self {
            SearchKind::Search => "search",
            SearchKind::News => "news",
            SearchKind::Images => "images",
            SearchKind::Places => "places",
        }
    }
}

/// A single organic search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub position: usize,
}

/// Parsed response for one query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub search_time: f64,
}

/// Raw Serper payload; only the fields we consume.
#[derive(Debug, Deserialize)]
struct SerperPayload {
    #[serde(default)]
    organic: Vec<SearchResult>,
    #[serde(default, rename = "news")]
    news: Vec<SearchResult>,
}

pub struct SearchTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SearchTool {
    /// Create a search tool. The key comes from the argument or the
    /// SERPER_API_KEY environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("SERPER_API_KEY").ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                MdanError::UserError(
                    "SERPER_API_KEY not found. Set it in mdan.yaml (serper_api_key) \
                     or as an environment variable."
                        .to_string(),
                )
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: SERPER_BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run a query against one of the Serper endpoints.
    pub async fn search(
        &self,
        query: &str,
        num_results: usize,
        kind: SearchKind,
    ) -> Result<SearchResponse> {
        let started = Instant::now();

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, kind.path()))
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": query, "num": num_results }))
            .send()
            .await
            .map_err(|e| MdanError::ToolError(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(MdanError::ToolError(format!(
                "search request failed with status {}",
                response.status()
            )));
        }

        let payload: SerperPayload = response
            .json()
            .await
            .map_err(|e| MdanError::ToolError(format!("invalid search response: {}", e)))?;

        Ok(Self::parse_payload(
            query,
            payload,
            started.elapsed().as_secs_f64(),
        ))
    }

    /// Plain web search.
    pub async fn search_web(&self, query: &str, num_results: usize) -> Result<SearchResponse> {
        self.search(query, num_results, SearchKind::Search).await
    }

    /// News search.
    pub async fn search_news(&self, query: &str, num_results: usize) -> Result<SearchResponse> {
        self.search(query, num_results, SearchKind::News).await
    }

    /// Image search.
    pub async fn search_images(&self, query: &str, num_results: usize) -> Result<SearchResponse> {
        self.search(query, num_results, SearchKind::Images).await
    }

    /// Places search.
    pub async fn search_places(&self, query: &str, num_results: usize) -> Result<SearchResponse> {
        self.search(query, num_results, SearchKind::Places).await
    }

    /// The top result only, if any.
    pub async fn top_result(&self, query: &str) -> Result<Option<SearchResult>> {
        let mut response = self.search_web(query, 1).await?;
        Ok(if response.results.is_empty() {
            None
        } else {
            Some(response.results.remove(0))
        })
    }

    fn parse_payload(query: &str, payload: SerperPayload, search_time: f64) -> SearchResponse {
        let mut results = if payload.organic.is_empty() {
            payload.news
        } else {
            payload.organic
        };

        // Serper positions are 1-based but not always present
        for (idx, result) in results.iter_mut().enumerate() {
            if result.position == 0 {
                result.position = idx + 1;
            }
        }

        let total_results = results.len();
        SearchResponse {
            query: query.to_string(),
            results,
            total_results,
            search_time,
        }
    }

    /// Format a response as readable text for prompt context.
    pub fn format_results(response: &SearchResponse, max_snippet_length: usize) -> String {
        let mut lines = vec![
            format!("Query: {}", response.query),
            format!(
                "Found {} results in {:.2}s",
                response.total_results, response.search_time
            ),
            String::new(),
        ];

        for result in &response.results {
            let mut snippet: String = result.snippet.chars().take(max_snippet_length).collect();
            if result.snippet.chars().count() > max_snippet_length {
                snippet.push_str("...");
            }

            lines.push(format!("{}. {}", result.position, result.title));
            lines.push(format!("   {}", result.link));
            lines.push(format!("   {}", snippet));
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn sample_payload() -> SerperPayload {
        serde_json::from_str(
            r#"{
                "organic": [
                    {"title": "Rust Book", "link": "https://doc.rust-lang.org/book/", "snippet": "The Rust Programming Language", "position": 1},
                    {"title": "Rustlings", "link": "https://github.com/rust-lang/rustlings", "snippet": "Small exercises"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_payload_fills_positions() {
        let response = SearchTool::parse_payload("rust", sample_payload(), 0.12);
        assert_eq!(response.total_results, 2);
        assert_eq!(response.results[0].position, 1);
        // Missing position is derived from the index
        assert_eq!(response.results[1].position, 2);
    }

    #[test]
    fn test_parse_payload_falls_back_to_news() {
        let payload: SerperPayload =
            serde_json::from_str(r#"{"news": [{"title": "t", "link": "l", "snippet": "s"}]}"#)
                .unwrap();
        let response = SearchTool::parse_payload("q", payload, 0.0);
        assert_eq!(response.total_results, 1);
    }

    #[test]
    fn test_format_results_truncates_snippets() {
        let response = SearchTool::parse_payload("rust", sample_payload(), 0.12);
        let formatted = SearchTool::format_results(&response, 10);

        assert!(formatted.contains("Query: rust"));
        assert!(formatted.contains("1. Rust Book"));
        assert!(formatted.contains("The Rust P..."));
    }

    #[test]
    #[serial]
    fn test_new_requires_api_key() {
        unsafe {
            std::env::remove_var("SERPER_API_KEY");
        }
        assert!(SearchTool::new(None).is_err());
        assert!(SearchTool::new(Some("key".to_string())).is_ok());
    }

    #[test]
    #[serial]
    fn test_new_reads_env_key() {
        unsafe {
            std::env::set_var("SERPER_API_KEY", "env-key");
        }
        let tool = SearchTool::new(None).unwrap();
        assert_eq!(tool.api_key, "env-key");
        unsafe {
            std::env::remove_var("SERPER_API_KEY");
        }
    }

    #[test]
    fn test_search_kind_paths() {
        assert_eq!(SearchKind::Search.path(), "search");
        assert_eq!(SearchKind::Places.path(), "places");
    }

    #[test]
    fn test_with_base_url_override() {
        let tool = SearchTool::new(Some("k".to_string()))
            .unwrap()
            .with_base_url("http://localhost:9999");
        assert_eq!(tool.base_url, "http://localhost:9999");
    }
}
