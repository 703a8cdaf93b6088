//! Configuration for the `lcc` command.
//!
//! Everything can come from an optional TOML file; every section and field
//! falls back to its default. Command-line flags are applied on top.

use std::path::Path;

use anyhow::{Context, Result};
use lcc_materialize::MaterializeConfig;
use lcc_outline::OutlineBoundaries;
use lcc_translate::{DEFAULT_MAX_CHUNK_CHARS, GoogleTranslateProvider, TranslatorConfig};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LccConfig {
    /// Markers delimiting the outline in the source text.
    pub outline: OutlineBoundaries,

    /// Where the outline text comes from.
    pub source: SourceConfig,

    /// Translation settings.
    pub translate: TranslateConfig,

    /// Directory materialization settings.
    pub materialize: MaterializeConfig,
}

impl LccConfig {
    /// Load the configuration file at `path`, or the defaults if there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Configuration for the Wikipedia outline source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// MediaWiki API endpoint.
    pub api_url: String,

    /// Title of the page holding the outline.
    pub page: String,

    /// User agent sent with requests.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            page: "Library of Congress Classification".to_string(),
            user_agent: concat!("lcc/", env!("CARGO_PKG_VERSION"), " (outline toolkit)")
                .to_string(),
        }
    }
}

/// Configuration for translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Translation endpoint base URL.
    pub endpoint: String,

    /// Maximum characters per request.
    pub max_chunk_chars: usize,

    /// Source language (`None` = detect).
    pub source_language: Option<String>,
}

impl TranslateConfig {
    /// Settings for the tree translator.
    pub fn translator_config(&self) -> TranslatorConfig {
        let config = TranslatorConfig::default().with_max_chunk_chars(self.max_chunk_chars);
        match &self.source_language {
            Some(language) => config.with_source_language(language.clone()),
            None => config,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: GoogleTranslateProvider::DEFAULT_BASE_URL.to_string(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            source_language: None,
        }
    }
}
