//! Translation providers.
//!
//! A provider turns one chunk of text into the target language. The tree
//! translator decides what gets sent and in which order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TranslateError};

/// Request for translating one chunk of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate.
    pub text: String,

    /// Target language code, e.g. `de`.
    pub target_language: String,

    /// Source language code (`None` = detect).
    pub source_language: Option<String>,
}

impl TranslationRequest {
    /// Create a new translation request.
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: None,
        }
    }

    /// Set the source language.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }
}

/// Trait for translation providers.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Translate a single chunk of text.
    async fn translate(&self, request: TranslationRequest) -> Result<String>;

    /// Check if the provider can be used.
    fn is_available(&self) -> bool;
}

/// Google Translate provider using the public `gtx` web endpoint.
pub struct GoogleTranslateProvider {
    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,
}

impl GoogleTranslateProvider {
    /// Default endpoint host.
    pub const DEFAULT_BASE_URL: &'static str = "https://translate.googleapis.com";

    /// Create a new Google provider.
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for GoogleTranslateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, request: TranslationRequest) -> Result<String> {
        let source = request.source_language.as_deref().unwrap_or("auto");

        debug!(
            "Translating {} chars {source} -> {}",
            request.text.chars().count(),
            request.target_language
        );

        let response = self
            .client
            .post(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(TranslateError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslateError::ApiRequest(format!(
                "API error ({status}): {error_text}"
            )));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            TranslateError::InvalidResponse(format!("response is not JSON: {e}"))
        })?;
        parse_segments(&body)
    }

    fn is_available(&self) -> bool {
        !self.base_url.is_empty()
    }
}

/// Join the translated segments of a `gtx` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_segments(body: &Value) -> Result<String> {
    let segments = body.get(0).and_then(Value::as_array).ok_or_else(|| {
        TranslateError::InvalidResponse("no segment list in response".to_string())
    })?;

    segments
        .iter()
        .map(|segment| {
            segment.get(0).and_then(Value::as_str).ok_or_else(|| {
                TranslateError::InvalidResponse(format!("segment without text: {segment}"))
            })
        })
        .collect()
}
