//! Web search and crawl facade (`FIRECRAWL`).

use crate::engine::ToolEngine;
use crate::tools::ToolDescriptor;
use crate::types::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOOLKIT: &str = "FIRECRAWL";

pub const SEARCH: &str = "FIRECRAWL_SEARCH";
pub const SCRAPE: &str = "FIRECRAWL_SCRAPE";
pub const CRAWL: &str = "FIRECRAWL_CRAWL_URLS";
pub const CRAWL_STATUS: &str = "FIRECRAWL_CRAWL_JOB_STATUS";
pub const CANCEL_CRAWL: &str = "FIRECRAWL_CANCEL_CRAWL_JOB";

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(TOOLKIT, SEARCH)
            .describe("Search the web and return ranked results")
            .required(["query"])
            .default_value("limit", 5),
        ToolDescriptor::new(TOOLKIT, SCRAPE)
            .describe("Fetch a single page as markdown")
            .required(["url"])
            .default_value("onlyMainContent", true),
        ToolDescriptor::new(TOOLKIT, CRAWL)
            .describe("Start an asynchronous crawl from a seed URL")
            .required(["url"])
            .default_value("limit", 10),
        ToolDescriptor::new(TOOLKIT, CRAWL_STATUS)
            .describe("Poll a crawl job")
            .required(["id"]),
        ToolDescriptor::new(TOOLKIT, CANCEL_CRAWL)
            .describe("Cancel a running crawl job")
            .required(["id"]),
    ]
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    /// Forwarded to the executor as-is; no local deadline is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Serialize)]
struct UrlParams<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct JobParams<'a> {
    id: &'a str,
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default, alias = "data")]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapedPage {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrawlJob {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrawlStatus {
    pub status: String,
    #[serde(default)]
    pub completed: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl CrawlStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "failed" | "cancelled")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CancelledCrawl {
    pub status: String,
}

// =============================================================================
// Facade
// =============================================================================

#[derive(Debug, Clone)]
pub struct WebTools {
    engine: ToolEngine,
}

impl WebTools {
    pub fn new(engine: ToolEngine) -> Self {
        Self { engine }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResults> {
        self.engine.call(TOOLKIT, SEARCH, params).await
    }

    pub async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        self.engine.call(TOOLKIT, SCRAPE, &UrlParams { url }).await
    }

    pub async fn crawl(&self, params: &CrawlParams) -> Result<CrawlJob> {
        self.engine.call(TOOLKIT, CRAWL, params).await
    }

    pub async fn crawl_status(&self, id: &str) -> Result<CrawlStatus> {
        self.engine.call(TOOLKIT, CRAWL_STATUS, &JobParams { id }).await
    }

    pub async fn cancel_crawl(&self, id: &str) -> Result<CancelledCrawl> {
        self.engine.call(TOOLKIT, CANCEL_CRAWL, &JobParams { id }).await
    }
}
