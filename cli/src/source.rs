//! Sources of outline text.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SourceConfig;

/// Something that can hand over the full outline document as text.
#[async_trait]
pub trait OutlineSource: Send + Sync {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Fetch the whole document.
    async fn fetch(&self) -> Result<String>;
}

/// Reads the plain-text extract of a Wikipedia page.
pub struct WikipediaSource {
    config: SourceConfig,
    client: reqwest::Client,
}

impl WikipediaSource {
    /// Create a source from configuration.
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OutlineSource for WikipediaSource {
    fn describe(&self) -> String {
        format!("Wikipedia page {:?}", self.config.page)
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Requesting {} from {}", self.config.page, self.config.api_url);

        let response = self
            .client
            .get(&self.config.api_url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", self.config.page.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.config.api_url))?;

        if !response.status().is_success() {
            bail!(
                "{} returned {} for page {:?}",
                self.config.api_url,
                response.status(),
                self.config.page
            );
        }

        let body: QueryResponse = response
            .json()
            .await
            .context("unexpected response from MediaWiki API")?;

        let page = body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| anyhow!("no pages in response for {:?}", self.config.page))?;

        if page.missing {
            bail!("Wikipedia page {:?} does not exist", page.title);
        }

        let extract = page
            .extract
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow!("Wikipedia page {:?} has no text extract", page.title))?;

        info!("Fetched {} characters from {}", extract.chars().count(), self.describe());
        Ok(extract)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
}

/// Reads the outline document from a local UTF-8 file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OutlineSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read outline from {}", self.path.display()))?;
        info!("Read {} characters from {}", text.chars().count(), self.describe());
        Ok(text)
    }
}
