//! Whole-tree translation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lcc_outline::Tree;
use lcc_outline::tree::{Children, child_path, display_path, index_path};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunker::{DEFAULT_MAX_CHUNK_CHARS, split_into_chunks};
use crate::error::{Result, TranslateError};
use crate::provider::{TranslationProvider, TranslationRequest};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Configuration for the tree translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Maximum characters sent to the provider in one request.
    pub max_chunk_chars: usize,

    /// Source language code (`None` = let the provider detect it).
    pub source_language: Option<String>,
}

impl TranslatorConfig {
    /// Set the maximum chunk size.
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    /// Set the source language.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            source_language: None,
        }
    }
}

/// Translates every string value of a tree.
///
/// Keys are left alone. Requests are issued one at a time in document
/// order; the first failure ends the run and no partial tree is returned.
pub struct TreeTranslator {
    provider: Arc<dyn TranslationProvider>,
    config: TranslatorConfig,
}

impl TreeTranslator {
    /// Create a translator with default configuration.
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self::with_config(provider, TranslatorConfig::default())
    }

    /// Create a translator with custom configuration.
    pub fn with_config(provider: Arc<dyn TranslationProvider>, config: TranslatorConfig) -> Self {
        Self { provider, config }
    }

    /// Produce a translated copy of `tree`.
    pub async fn translate_tree(&self, tree: &Tree, target_language: &str) -> Result<Tree> {
        if !self.provider.is_available() {
            return Err(TranslateError::ProviderNotConfigured);
        }

        info!(
            "Translating tree into {target_language} with {}",
            self.provider.name()
        );

        let translated = self
            .translate_node(tree, target_language, String::new())
            .await?;

        info!("Finished translating tree into {target_language}");
        Ok(translated)
    }

    fn translate_node<'a>(
        &'a self,
        node: &'a Tree,
        target_language: &'a str,
        path: String,
    ) -> BoxFuture<'a, Result<Tree>> {
        Box::pin(async move {
            match node {
                Tree::String(text) => Ok(Tree::String(
                    self.translate_text(text, target_language, &path).await?,
                )),
                Tree::Mapping(map) => {
                    let mut translated = Children::with_capacity(map.len());
                    for (key, value) in map {
                        let child = self
                            .translate_node(value, target_language, child_path(&path, key))
                            .await?;
                        translated.insert(key.clone(), child);
                    }
                    Ok(Tree::Mapping(translated))
                }
                Tree::Sequence(items) => {
                    let mut translated = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        translated.push(
                            self.translate_node(item, target_language, index_path(&path, index))
                                .await?,
                        );
                    }
                    Ok(Tree::Sequence(translated))
                }
                Tree::Null | Tree::Bool(_) | Tree::Number(_) => Ok(node.clone()),
            }
        })
    }

    /// Translate one string, chunk by chunk.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        path: &str,
    ) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chunks = split_into_chunks(text, self.config.max_chunk_chars);
        let total = chunks.len();
        let mut translated = String::with_capacity(text.len());

        for (index, chunk) in chunks.into_iter().enumerate() {
            let mut request = TranslationRequest::new(chunk, target_language);
            if let Some(source) = &self.config.source_language {
                request = request.with_source_language(source.clone());
            }

            let piece = self.provider.translate(request).await.map_err(|source| {
                TranslateError::TranslationFailure {
                    path: display_path(path),
                    chunk: index + 1,
                    chunks: total,
                    source: Box::new(source),
                }
            })?;

            translated.push_str(&piece);
        }

        debug!("Translated {} in {total} chunk(s)", display_path(path));
        Ok(translated)
    }
}
